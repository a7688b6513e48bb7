//! Bottom Navigation and Notice Banner

use leptos::prelude::*;

use crate::store::{store_dismiss_notice, use_app_store, AppStateStoreFields, Tab};

#[component]
pub fn BottomNav() -> impl IntoView {
    let store = use_app_store();

    view! {
        <nav class="bottom-nav">
            {Tab::ALL
                .into_iter()
                .map(|tab| {
                    view! {
                        <button
                            class="nav-item"
                            class:active=move || store.tab().get() == tab
                            on:click=move |_| store.tab().set(tab)
                        >
                            {tab.label()}
                            {(tab == Tab::Shop)
                                .then(|| {
                                    view! {
                                        <Show when=move || store.cart().with(|c| !c.is_empty())>
                                            <span class="nav-badge">{move || store.cart().with(|c| c.count())}</span>
                                        </Show>
                                    }
                                })}
                        </button>
                    }
                })
                .collect_view()}
        </nav>
    }
}

/// One-shot alert for payment outcomes and confirmations
#[component]
pub fn NoticeBanner() -> impl IntoView {
    let store = use_app_store();

    view! {
        <Show when=move || store.notice().with(|n| n.is_some())>
            <div class="notice-banner" role="alert">
                <span>{move || store.notice().get().unwrap_or_default()}</span>
                <button on:click=move |_| store_dismiss_notice(&store)>"OK"</button>
            </div>
        </Show>
    }
}
