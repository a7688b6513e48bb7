//! Installments Screen
//!
//! Paged, searchable list of a parent's installments with status/child
//! filters and per-row payment.

use leptos::prelude::*;
use paged_list::{Filters, FnFetcher, ListConfig};

use super::filter_sheet::{filter_summary, remember_children, InstallmentFilterSheet};
use super::list_view::{paged_body, RefreshButton, SearchBar};
use super::PaymentSheet;
use crate::commands;
use crate::models::{format_amount, Installment, InstallmentStatus};
use crate::paging::use_paged_list;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn InstallmentList() -> impl IntoView {
    let store = use_app_store();
    let config = ListConfig {
        page_size: store.page_size().get_untracked(),
        ..ListConfig::default()
    };
    let list = use_paged_list(FnFetcher(commands::list_installments), config, Filters::new());

    let (filters_open, set_filters_open) = signal(false);
    let (pay_open, set_pay_open) = signal(false);
    let (paying, set_paying) = signal::<Option<Installment>>(None);

    // Every child seen so far, so filtering to one keeps the others selectable
    let child_options = RwSignal::new(Vec::<(u32, String)>::new());
    Effect::new(move |_| {
        list.with(|s| {
            let mut seen = child_options.get_untracked();
            if remember_children(&mut seen, &s.items) {
                child_options.set(seen);
            }
        });
    });

    let on_pay = Callback::new(move |installment: Installment| {
        set_paying.set(Some(installment));
        set_pay_open.set(true);
    });

    view! {
        <section class="screen installments">
            <div class="screen-toolbar">
                <SearchBar
                    value=Signal::derive(move || list.search())
                    on_input=Callback::new(move |text: String| list.set_search(text))
                    placeholder="Search child, school or term"
                />
                <button class="filter-button" on:click=move |_| set_filters_open.set(true)>
                    {move || filter_summary(&list.filters())}
                </button>
                <RefreshButton
                    refreshing=Signal::derive(move || list.is_refreshing())
                    on_refresh=Callback::new(move |_: ()| list.refresh())
                />
            </div>

            {paged_body(
                list,
                "No installments match",
                |i: &Installment| i.id,
                move |installment: Installment| view! { <InstallmentRow installment=installment on_pay=on_pay /> },
            )}

            <InstallmentFilterSheet
                visible=filters_open
                on_close=Callback::new(move |_: ()| set_filters_open.set(false))
                current=Signal::derive(move || list.filters())
                child_options=child_options
                on_apply=Callback::new(move |filters: Filters| list.apply_filters(filters))
            />
            <PaymentSheet
                visible=pay_open
                installment=paying
                on_close=Callback::new(move |_: ()| set_pay_open.set(false))
                on_paid=Callback::new(move |_: ()| list.refresh())
            />
        </section>
    }
}

#[component]
fn InstallmentRow(installment: Installment, #[prop(into)] on_pay: Callback<Installment>) -> impl IntoView {
    let status_class = match installment.status {
        InstallmentStatus::Paid => "badge badge-paid",
        InstallmentStatus::Unpaid => "badge badge-unpaid",
        InstallmentStatus::Overdue => "badge badge-overdue",
    };
    let payable = installment.is_payable();
    let due = installment.due_date.format("%d %b %Y").to_string();
    let amount = format_amount(installment.amount);
    let title = format!("{} · {}", installment.child_name, installment.label);
    let school = installment.school_name.clone();
    let status_label = installment.status.label();

    view! {
        <div class="list-row installment-row">
            <div class="row-main">
                <div class="row-title">{title}</div>
                <div class="row-sub">{school}" · due "{due}</div>
            </div>
            <div class="row-side">
                <div class="row-amount">{amount}</div>
                <span class=status_class>{status_label}</span>
                {payable
                    .then(|| {
                        view! {
                            <button class="pay-button" on:click=move |_| on_pay.run(installment.clone())>
                                "Pay"
                            </button>
                        }
                    })}
            </div>
        </div>
    }
}
