//! Tauri Commands for session and diagnostics

use paged_list::FetchError;
use tauri::State;

use crate::api::ApiConfig;
use crate::AppState;

/// Store the bearer token handed over by the host app; blank clears it
#[tauri::command]
pub async fn set_auth_token(state: State<'_, AppState>, token: Option<String>) -> Result<(), FetchError> {
    let signed_in = token.as_deref().map(|t| !t.trim().is_empty()).unwrap_or(false);
    state.api.set_token(token).await;
    let _ = rolling_logger::info(if signed_in { "Auth token set" } else { "Auth token cleared" });
    Ok(())
}

/// Effective API config, so the front end can size its pages
#[tauri::command]
pub fn get_api_config(state: State<'_, AppState>) -> ApiConfig {
    state.api.config().clone()
}

/// Recent log lines for the diagnostics view
#[tauri::command]
pub fn get_recent_logs() -> Vec<String> {
    rolling_logger::recent_lines()
}
