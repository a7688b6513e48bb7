//! List View Building Blocks
//!
//! Scroll-to-end detection, footer row, full-screen error, search box, and
//! the body shared by every paged screen.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

use crate::paging::{keyed_rows, FooterStatus, ListHandle, ListPhase, RowKey};

/// Distance from the bottom (px) at which the next page is requested
const LOAD_MORE_THRESHOLD_PX: i32 = 120;

/// Scrollable container that reports reaching its end
#[component]
pub fn ScrollArea(#[prop(into)] on_end: Callback<()>, children: Children) -> impl IntoView {
    let on_scroll = move |ev: web_sys::Event| {
        let Some(el) = ev.target().and_then(|t| t.dyn_into::<web_sys::Element>().ok()) else {
            return;
        };
        if el.scroll_top() + el.client_height() >= el.scroll_height() - LOAD_MORE_THRESHOLD_PX {
            on_end.run(());
        }
    };

    view! {
        <div class="list-scroll" on:scroll=on_scroll>
            {children()}
        </div>
    }
}

#[component]
pub fn ListFooter(#[prop(into)] footer: Signal<FooterStatus>, #[prop(into)] on_retry: Callback<()>) -> impl IntoView {
    move || match footer.get() {
        FooterStatus::Hidden => ().into_any(),
        FooterStatus::LoadingMore => view! { <div class="list-footer">"Loading more..."</div> }.into_any(),
        FooterStatus::End => view! { <div class="list-footer list-end">"No more results"</div> }.into_any(),
        FooterStatus::Failed(message) => view! {
            <div class="list-footer list-error">
                <span>{message}</span>
                <button on:click=move |_| on_retry.run(())>"Retry"</button>
            </div>
        }
        .into_any(),
    }
}

/// Full-screen error for a failed first load
#[component]
pub fn FailedView(message: String, #[prop(into)] on_retry: Callback<()>) -> impl IntoView {
    view! {
        <div class="list-failed">
            <p>{message}</p>
            <button on:click=move |_| on_retry.run(())>"Try again"</button>
        </div>
    }
}

#[component]
pub fn SearchBar(
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_input: Callback<String>,
    #[prop(into)] placeholder: String,
) -> impl IntoView {
    view! {
        <input
            class="search-bar"
            type="search"
            placeholder=placeholder
            prop:value=move || value.get()
            on:input=move |ev| on_input.run(event_target_value(&ev))
        />
    }
}

/// Pull-to-refresh stand-in: a button plus the refreshing indicator
#[component]
pub fn RefreshButton(#[prop(into)] refreshing: Signal<bool>, #[prop(into)] on_refresh: Callback<()>) -> impl IntoView {
    view! {
        <button
            class="refresh-button"
            disabled=move || refreshing.get()
            on:click=move |_| on_refresh.run(())
        >
            {move || if refreshing.get() { "Refreshing..." } else { "Refresh" }}
        </button>
    }
}

/// Body of a paged screen: loading, error, empty, or rows plus footer.
///
/// Only re-rendered when the phase changes, so appending a page keeps the
/// scroll position.
pub fn paged_body<T, KF, V, RF>(list: ListHandle<T>, empty_text: &'static str, key: KF, row: RF) -> impl IntoView
where
    T: Clone + Send + Sync + 'static,
    KF: Fn(&T) -> u32 + Clone + Send + Sync + 'static,
    V: IntoView + 'static,
    RF: Fn(T) -> V + Clone + Send + Sync + 'static,
{
    let phase = Memo::new(move |_| list.phase());
    let footer = Signal::derive(move || list.footer());
    let on_end = Callback::new(move |_: ()| list.load_more());
    let on_retry = Callback::new(move |_: ()| list.retry());

    move || match phase.get() {
        ListPhase::InitialLoading => view! { <div class="list-loading">"Loading..."</div> }.into_any(),
        ListPhase::FailedEmpty(message) => view! { <FailedView message=message on_retry=on_retry /> }.into_any(),
        ListPhase::Empty => view! { <div class="list-empty">{empty_text}</div> }.into_any(),
        ListPhase::Ready => {
            let key = key.clone();
            let row = row.clone();
            view! {
                <ScrollArea on_end=on_end>
                    <For
                        each=move || keyed_rows(list.items(), &key)
                        key=|(row_key, _): &(RowKey, T)| *row_key
                        children=move |(_, item): (RowKey, T)| row(item)
                    />
                    <ListFooter footer=footer on_retry=on_retry />
                </ScrollArea>
            }
            .into_any()
        }
    }
}
