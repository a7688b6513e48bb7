//! SchoolPay Backend
//!
//! Layered architecture:
//! - domain: Records exchanged with the REST API
//! - api: HTTP client, config and the remote collections
//! - commands: Tauri command handlers

use std::path::PathBuf;
use std::sync::Arc;

use tauri::Manager;

mod api;
mod commands;
mod domain;

use api::{ApiClient, ApiConfig, PageSource, PaymentService, RemoteCollection, SupportService};
use domain::{Activity, ApiResult, Installment, Product, SupportRequest};

/// Application state shared across commands
pub struct AppState {
    pub api: Arc<ApiClient>,
    pub installments: Arc<dyn PageSource<Installment>>,
    pub merchandise: Arc<dyn PageSource<Product>>,
    pub activities: Arc<dyn PageSource<Activity>>,
    pub support_requests: Arc<dyn PageSource<SupportRequest>>,
    pub payments: Arc<dyn PaymentService>,
    pub support: Arc<dyn SupportService>,
}

impl AppState {
    /// Bind every collection to the REST API described by `config`
    pub fn connect(config: ApiConfig) -> ApiResult<Self> {
        let api = Arc::new(ApiClient::new(config)?);
        Ok(Self {
            installments: Arc::new(RemoteCollection::new(api.clone(), "installments")),
            merchandise: Arc::new(RemoteCollection::new(api.clone(), "merchandise")),
            activities: Arc::new(RemoteCollection::new(api.clone(), "activities")),
            support_requests: Arc::new(RemoteCollection::new(api.clone(), "support-requests")),
            payments: api.clone(),
            support: api.clone(),
            api,
        })
    }
}

/// Load the API config, falling back to defaults when the file is unusable
fn load_config(config_dir: Option<PathBuf>) -> ApiConfig {
    let Some(dir) = config_dir else {
        let _ = rolling_logger::warn("No app config dir, using default API config");
        return ApiConfig::default();
    };
    match ApiConfig::load(&dir) {
        Ok(config) => config,
        Err(e) => {
            let _ = rolling_logger::error(&format!("Bad API config, using defaults: {}", e));
            ApiConfig::default()
        }
    }
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .setup(|app| {
            // Single instance check - must be first!
            #[cfg(desktop)]
            app.handle().plugin(tauri_plugin_single_instance::init(|_app, _args, _cwd| {
                if let Some(window) = _app.get_webview_window("main") {
                    let _ = window.set_focus();
                }
            }))?;

            let app_handle = app.handle().clone();

            // Initialize logging
            let log_dir = app_handle.path().app_log_dir()?;
            if let Err(e) = rolling_logger::init_logger(log_dir, "SchoolPay") {
                eprintln!("Failed to init rolling logger: {}", e);
            }

            let config = load_config(app_handle.path().app_config_dir().ok());
            let _ = rolling_logger::info(&format!(
                "API {} (timeout {}s, page size {})",
                config.base_url, config.timeout_secs, config.page_size
            ));

            let state = AppState::connect(config)?;
            app.manage(state);
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // Paginated lists
            commands::list_installments,
            commands::list_merchandise,
            commands::list_activities,
            commands::list_support_requests,
            // Actions
            commands::submit_payment,
            commands::create_support_request,
            // Session / diagnostics
            commands::set_auth_token,
            commands::get_api_config,
            commands::get_recent_logs,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
