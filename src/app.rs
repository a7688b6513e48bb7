//! SchoolPay Frontend App
//!
//! Tabbed mobile layout: one screen at a time above the bottom navigation.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::commands;
use crate::components::{ActivityList, BottomNav, InstallmentList, MerchandiseList, NoticeBanner, SupportView};
use crate::store::{AppState, AppStateStoreFields, Tab};

/// Bearer token handed over by the host page as `?token=...`
fn token_from_location() -> Option<String> {
    let search = web_sys::window()?.location().search().ok()?;
    let params = web_sys::UrlSearchParams::new_with_str(&search).ok()?;
    params.get("token").filter(|t| !t.is_empty())
}

#[component]
pub fn App() -> impl IntoView {
    let store = Store::new(AppState::new());
    provide_context(store);

    // Screens wait for the session so their first fetch is authorized
    let (ready, set_ready) = signal(false);

    spawn_local(async move {
        let token = token_from_location();
        if let Err(e) = commands::set_auth_token(token.as_deref()).await {
            log::error!("set_auth_token failed: {}", e);
        }
        match commands::get_api_config().await {
            Ok(config) => {
                log::info!("API {} page size {}", config.base_url, config.page_size);
                store.page_size().set(config.page_size.max(1));
            }
            Err(e) => log::error!("get_api_config failed: {}", e),
        }
        set_ready.set(true);
    });

    view! {
        <div class="app-layout">
            <NoticeBanner />
            <main class="main-content">
                <Show when=move || ready.get() fallback=|| view! { <div class="list-loading">"Loading..."</div> }>
                    {move || match store.tab().get() {
                        Tab::Installments => view! { <InstallmentList /> }.into_any(),
                        Tab::Shop => view! { <MerchandiseList /> }.into_any(),
                        Tab::Activities => view! { <ActivityList /> }.into_any(),
                        Tab::Support => view! { <SupportView /> }.into_any(),
                    }}
                </Show>
            </main>
            <BottomNav />
        </div>
    }
}
