//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::cart::Cart;
use crate::models::{PaymentLine, PaymentReceipt, Product};

/// Bottom navigation tabs
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Installments,
    Shop,
    Activities,
    Support,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Installments, Tab::Shop, Tab::Activities, Tab::Support];

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Installments => "Fees",
            Tab::Shop => "Shop",
            Tab::Activities => "Activity",
            Tab::Support => "Support",
        }
    }
}

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    pub tab: Tab,
    /// Merchandise selected for checkout
    pub cart: Cart,
    /// Page size reported by the backend config
    pub page_size: u32,
    /// Receipt of the most recent successful payment
    pub last_receipt: Option<PaymentReceipt>,
    /// One-shot message for the alert banner
    pub notice: Option<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            page_size: paged_list::DEFAULT_PAGE_SIZE,
            ..Default::default()
        }
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

pub fn store_add_to_cart(store: &AppStore, product: Product) {
    store.cart().write().add(product);
}

pub fn store_increment(store: &AppStore, product_id: u32) {
    store.cart().write().increment(product_id);
}

pub fn store_decrement(store: &AppStore, product_id: u32) {
    store.cart().write().decrement(product_id);
}

pub fn store_remove_from_cart(store: &AppStore, product_id: u32) {
    store.cart().write().remove(product_id);
}

/// Record a successful payment; `paid` lists the merchandise it covered
pub fn store_payment_succeeded(store: &AppStore, receipt: PaymentReceipt, paid: &[PaymentLine]) {
    if !paid.is_empty() {
        store.cart().write().settle_paid(paid);
    }
    store
        .notice()
        .set(Some(format!("Payment received. Reference: {}", receipt.reference)));
    store.last_receipt().set(Some(receipt));
}

pub fn store_notify(store: &AppStore, message: impl Into<String>) {
    store.notice().set(Some(message.into()));
}

pub fn store_dismiss_notice(store: &AppStore) {
    store.notice().set(None);
}
