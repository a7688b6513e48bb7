//! Shop Screen
//!
//! Paged merchandise catalogue. Rows add to the cart; the cart button opens
//! the review sheet.

use leptos::prelude::*;
use paged_list::{Filters, FnFetcher, ListConfig};

use super::list_view::{paged_body, RefreshButton, SearchBar};
use super::CartReviewSheet;
use crate::commands;
use crate::models::{format_amount, Product};
use crate::paging::use_paged_list;
use crate::store::{store_add_to_cart, store_decrement, use_app_store, AppStateStoreFields};

#[component]
pub fn MerchandiseList() -> impl IntoView {
    let store = use_app_store();
    let config = ListConfig {
        page_size: store.page_size().get_untracked(),
        ..ListConfig::default()
    };
    let list = use_paged_list(FnFetcher(commands::list_merchandise), config, Filters::new());
    let (cart_open, set_cart_open) = signal(false);

    view! {
        <section class="screen shop">
            <div class="screen-toolbar">
                <SearchBar
                    value=Signal::derive(move || list.search())
                    on_input=Callback::new(move |text: String| list.set_search(text))
                    placeholder="Search uniforms, books..."
                />
                <RefreshButton
                    refreshing=Signal::derive(move || list.is_refreshing())
                    on_refresh=Callback::new(move |_: ()| list.refresh())
                />
            </div>

            {paged_body(
                list,
                "No products available",
                |p: &Product| p.id,
                |product: Product| view! { <ProductRow product=product /> },
            )}

            <button
                class="cart-fab"
                disabled=move || store.cart().with(|c| c.is_empty())
                on:click=move |_| set_cart_open.set(true)
            >
                {move || {
                    let (count, total) = store.cart().with(|c| (c.count(), c.total()));
                    format!("Cart ({}) · {}", count, format_amount(total))
                }}
            </button>

            <CartReviewSheet
                visible=cart_open
                on_close=Callback::new(move |_: ()| set_cart_open.set(false))
            />
        </section>
    }
}

#[component]
fn ProductRow(product: Product) -> impl IntoView {
    let store = use_app_store();
    let id = product.id;
    let name = product.name.clone();
    let description = product.description.clone();
    let price = format_amount(product.unit_price);
    let quantity = Memo::new(move |_| store.cart().with(|c| c.quantity_of(id)));

    view! {
        <div class="list-row product-row">
            <div class="row-main">
                <div class="row-title">{name}</div>
                <div class="row-sub">{description}</div>
            </div>
            <div class="row-side">
                <div class="row-amount">{price}</div>
                {move || {
                    if quantity.get() == 0 {
                        let product = product.clone();
                        view! {
                            <button class="add-button" on:click=move |_| store_add_to_cart(&store, product.clone())>
                                "Add"
                            </button>
                        }
                        .into_any()
                    } else {
                        let product = product.clone();
                        view! {
                            <div class="stepper">
                                <button on:click=move |_| store_decrement(&store, id)>"−"</button>
                                <span>{move || quantity.get()}</span>
                                <button on:click=move |_| store_add_to_cart(&store, product.clone())>"+"</button>
                            </div>
                        }
                        .into_any()
                    }
                }}
            </div>
        </div>
    }
}
