//! Support Screen
//!
//! The user's support requests, plus a sheet to file a new one.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_sheet::{SheetConfig, SheetHeight};
use paged_list::{Filters, FnFetcher, ListConfig};

use super::list_view::{paged_body, RefreshButton};
use super::BottomSheet;
use crate::commands;
use crate::error::AppError;
use crate::models::SupportRequest;
use crate::paging::use_paged_list;
use crate::store::{store_notify, use_app_store, AppStateStoreFields};

/// Local checks before anything is sent
pub fn validate_support_form(subject: &str, message: &str) -> Result<(), AppError> {
    if subject.trim().is_empty() {
        return Err(AppError::Validation("Please enter a subject".to_string()));
    }
    if message.trim().is_empty() {
        return Err(AppError::Validation("Please describe the problem".to_string()));
    }
    Ok(())
}

#[component]
pub fn SupportView() -> impl IntoView {
    let store = use_app_store();
    let config = ListConfig {
        page_size: store.page_size().get_untracked(),
        ..ListConfig::default()
    };
    let list = use_paged_list(FnFetcher(commands::list_support_requests), config, Filters::new());
    let (form_open, set_form_open) = signal(false);

    view! {
        <section class="screen support">
            <div class="screen-toolbar">
                <button class="primary" on:click=move |_| set_form_open.set(true)>"New request"</button>
                <RefreshButton
                    refreshing=Signal::derive(move || list.is_refreshing())
                    on_refresh=Callback::new(move |_: ()| list.refresh())
                />
            </div>

            {paged_body(
                list,
                "No support requests",
                |r: &SupportRequest| r.id,
                |request: SupportRequest| view! { <SupportRow request=request /> },
            )}

            <DiagnosticsPanel />

            <SupportFormSheet
                visible=form_open
                on_close=Callback::new(move |_: ()| set_form_open.set(false))
                on_created=Callback::new(move |_: ()| list.refresh())
            />
        </section>
    }
}

/// Recent app log lines, to paste into a support request
#[component]
fn DiagnosticsPanel() -> impl IntoView {
    let (lines, set_lines) = signal::<Option<Vec<String>>>(None);

    let load = move |_| {
        spawn_local(async move {
            match commands::get_recent_logs().await {
                Ok(loaded) => set_lines.set(Some(loaded)),
                Err(e) => set_lines.set(Some(vec![e.user_message()])),
            }
        });
    };

    view! {
        <details class="diagnostics">
            <summary on:click=load>"App logs"</summary>
            <pre class="diagnostics-log">
                {move || lines.get().map(|l| l.join("\n")).unwrap_or_else(|| "Loading...".to_string())}
            </pre>
        </details>
    }
}

#[component]
fn SupportRow(request: SupportRequest) -> impl IntoView {
    let when = request.created_at.format("%d %b %Y").to_string();
    view! {
        <div class="list-row support-row">
            <div class="row-main">
                <div class="row-title">{request.subject.clone()}</div>
                <div class="row-sub">{when}</div>
            </div>
            <span class="badge">{request.status.label()}</span>
        </div>
    }
}

#[component]
fn SupportFormSheet(
    #[prop(into)] visible: Signal<bool>,
    #[prop(into)] on_close: Callback<()>,
    #[prop(into)] on_created: Callback<()>,
) -> impl IntoView {
    let store = use_app_store();
    let (subject, set_subject) = signal(String::new());
    let (message, set_message) = signal(String::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (sending, set_sending) = signal(false);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if sending.get_untracked() {
            return;
        }
        let (subject_text, message_text) = (subject.get_untracked(), message.get_untracked());
        if let Err(e) = validate_support_form(&subject_text, &message_text) {
            set_error.set(Some(e.user_message()));
            return;
        }
        set_sending.set(true);
        set_error.set(None);
        spawn_local(async move {
            let outcome = commands::create_support_request(&subject_text, &message_text).await;
            set_sending.set(false);
            match outcome {
                Ok(created) => {
                    log::info!("[support] request {} created", created.id);
                    set_subject.set(String::new());
                    set_message.set(String::new());
                    store_notify(&store, "Support request sent");
                    on_created.run(());
                    on_close.run(());
                }
                Err(e) => set_error.set(Some(e.user_message())),
            }
        });
    };

    let config = SheetConfig {
        height: SheetHeight::Full,
        ..SheetConfig::default()
    };

    view! {
        <BottomSheet visible=visible on_close=on_close title="New support request" config=config>
            <form class="support-form" on:submit=submit>
                <input
                    type="text"
                    placeholder="Subject"
                    prop:value=move || subject.get()
                    on:input=move |ev| set_subject.set(event_target_value(&ev))
                />
                <textarea
                    placeholder="How can we help?"
                    prop:value=move || message.get()
                    on:input=move |ev| set_message.set(event_target_value(&ev))
                ></textarea>
                <Show when=move || error.get().is_some()>
                    <div class="inline-error">{move || error.get().unwrap_or_default()}</div>
                </Show>
                <button class="primary" type="submit" disabled=move || sending.get()>
                    {move || if sending.get() { "Sending..." } else { "Send" }}
                </button>
            </form>
        </BottomSheet>
    }
}
