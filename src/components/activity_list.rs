//! Activity Screen
//!
//! Collecting agent's feed of payments, cash collections and notes.

use leptos::prelude::*;
use paged_list::{Filters, FnFetcher, ListConfig};

use super::list_view::{paged_body, RefreshButton, SearchBar};
use crate::commands;
use crate::models::{format_amount, Activity, ActivityKind};
use crate::paging::use_paged_list;
use crate::store::{use_app_store, AppStateStoreFields};

const KIND_FILTER: &str = "kind";

const KINDS: [(Option<&str>, &str); 4] = [
    (None, "All"),
    (Some("payment"), "Payments"),
    (Some("collection"), "Collections"),
    (Some("note"), "Notes"),
];

fn kind_filters(kind: Option<&str>) -> Filters {
    let mut filters = Filters::new();
    if let Some(kind) = kind {
        filters.insert(KIND_FILTER.to_string(), kind.to_string());
    }
    filters
}

#[component]
pub fn ActivityList() -> impl IntoView {
    let store = use_app_store();
    let config = ListConfig {
        page_size: store.page_size().get_untracked(),
        ..ListConfig::default()
    };
    let list = use_paged_list(FnFetcher(commands::list_activities), config, Filters::new());

    view! {
        <section class="screen activities">
            <div class="screen-toolbar">
                <SearchBar
                    value=Signal::derive(move || list.search())
                    on_input=Callback::new(move |text: String| list.set_search(text))
                    placeholder="Search parent or description"
                />
                <RefreshButton
                    refreshing=Signal::derive(move || list.is_refreshing())
                    on_refresh=Callback::new(move |_: ()| list.refresh())
                />
            </div>
            <div class="chip-row">
                {KINDS
                    .into_iter()
                    .map(|(kind, label)| {
                        let active = move || list.with(|s| s.filters.get(KIND_FILTER).map(String::as_str) == kind);
                        view! {
                            <button
                                class="chip"
                                class:active=active
                                on:click=move |_| list.apply_filters(kind_filters(kind))
                            >
                                {label}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>

            {paged_body(
                list,
                "No activity yet",
                |a: &Activity| a.id,
                |activity: Activity| view! { <ActivityRow activity=activity /> },
            )}
        </section>
    }
}

#[component]
fn ActivityRow(activity: Activity) -> impl IntoView {
    let icon = match activity.kind {
        ActivityKind::Payment => "💳",
        ActivityKind::Collection => "💵",
        ActivityKind::Note => "📝",
    };
    let when = activity.created_at.format("%d %b %H:%M").to_string();
    let who = activity.parent_name.clone().unwrap_or_default();

    view! {
        <div class="list-row activity-row">
            <span class="row-icon">{icon}</span>
            <div class="row-main">
                <div class="row-title">{activity.description.clone()}</div>
                <div class="row-sub">{who}" "{when}</div>
            </div>
            {activity.amount.map(|amount| view! { <div class="row-amount">{format_amount(amount)}</div> })}
        </div>
    }
}
