//! Tauri Commands for support requests

use paged_list::FetchError;
use tauri::State;

use crate::domain::{NewSupportRequest, SupportRequest};
use crate::AppState;

/// Open a support ticket. Listing goes through `list_support_requests`.
#[tauri::command]
pub async fn create_support_request(
    state: State<'_, AppState>,
    subject: String,
    message: String,
) -> Result<SupportRequest, FetchError> {
    let request = NewSupportRequest { subject, message };
    let created = state.support.create(&request).await.map_err(|e| {
        let _ = rolling_logger::warn(&format!("Support request failed: {}", e));
        FetchError::from(e)
    })?;
    let _ = rolling_logger::info(&format!("Support request {} created", created.id));
    Ok(created)
}
