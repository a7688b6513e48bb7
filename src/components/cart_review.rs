//! Cart Review Sheet
//!
//! Line editing plus checkout. Lines are locked while a payment is in
//! flight. A declined payment closes the sheet and raises a notice; the cart
//! is left as it was.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_sheet::SheetConfig;

use super::BottomSheet;
use crate::cart::CartItem;
use crate::checkout::{checkout, TauriGateway};
use crate::error::AppError;
use crate::models::format_amount;
use crate::store::{
    store_decrement, store_increment, store_notify, store_payment_succeeded, store_remove_from_cart, use_app_store,
    AppStateStoreFields,
};

#[component]
pub fn CartReviewSheet(#[prop(into)] visible: Signal<bool>, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let store = use_app_store();
    let (submitting, set_submitting) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);

    Effect::new(move |_| {
        if visible.get() {
            set_error.set(None);
        }
    });

    let pay = move |_| {
        if submitting.get_untracked() {
            return;
        }
        set_submitting.set(true);
        set_error.set(None);
        // Work on a copy; the store is only touched once the outcome is known
        let mut pending = store.cart().get_untracked();
        let paid = pending.lines();
        spawn_local(async move {
            let outcome = checkout(&mut pending, &TauriGateway).await;
            set_submitting.set(false);
            match outcome {
                Ok(receipt) => {
                    log::info!("[cart] checkout accepted: {}", receipt.reference);
                    store_payment_succeeded(&store, receipt, &paid);
                    on_close.run(());
                }
                Err(AppError::TerminalPayment(message)) => {
                    log::warn!("[cart] checkout rejected: {}", message);
                    store_notify(&store, format!("Payment failed: {}", message));
                    on_close.run(());
                }
                Err(e) => set_error.set(Some(e.user_message())),
            }
        });
    };

    view! {
        <BottomSheet visible=visible on_close=on_close title="Your cart" config=SheetConfig::default()>
            <div class="cart-lines">
                <For
                    each=move || store.cart().with(|c| c.items().cloned().collect::<Vec<CartItem>>())
                    key=|item: &CartItem| (item.product_id(), item.quantity)
                    let:item
                >
                    <CartLine item=item locked=submitting />
                </For>
            </div>
            <Show when=move || store.cart().with(|c| c.is_empty())>
                <p class="cart-empty">"Your cart is empty"</p>
            </Show>
            <div class="cart-total">
                <span>"Total"</span>
                <span>{move || format_amount(store.cart().with(|c| c.total()))}</span>
            </div>
            <Show when=move || error.get().is_some()>
                <div class="inline-error">{move || error.get().unwrap_or_default()}</div>
            </Show>
            <div class="sheet-actions">
                <button
                    class="primary"
                    disabled=move || submitting.get() || store.cart().with(|c| c.is_empty())
                    on:click=pay
                >
                    {move || if submitting.get() { "Paying..." } else { "Checkout" }}
                </button>
            </div>
        </BottomSheet>
    }
}

#[component]
fn CartLine(item: CartItem, #[prop(into)] locked: Signal<bool>) -> impl IntoView {
    let store = use_app_store();
    let id = item.product_id();

    view! {
        <div class="cart-line">
            <div class="row-main">
                <div class="row-title">{item.product.name.clone()}</div>
                <div class="row-sub">{format!("{} × {}", format_amount(item.unit_price()), item.quantity)}</div>
            </div>
            <div class="stepper">
                <button disabled=move || locked.get() on:click=move |_| store_decrement(&store, id)>"−"</button>
                <span>{item.quantity}</span>
                <button disabled=move || locked.get() on:click=move |_| store_increment(&store, id)>"+"</button>
            </div>
            <div class="row-amount">{format_amount(item.subtotal())}</div>
            <button
                class="remove-button"
                disabled=move || locked.get()
                on:click=move |_| store_remove_from_cart(&store, id)
            >
                "Remove"
            </button>
        </div>
    }
}
