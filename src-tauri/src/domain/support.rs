//! Support Request Entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::{ApiError, ApiResult};

/// Longest subject the backend accepts
pub const MAX_SUBJECT_LEN: usize = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SupportStatus {
    #[default]
    Open,
    InProgress,
    Resolved,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportRequest {
    pub id: u32,
    pub subject: String,
    pub message: String,
    #[serde(default)]
    pub status: SupportStatus,
    pub created_at: DateTime<Utc>,
}

/// Body of a new support request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSupportRequest {
    pub subject: String,
    pub message: String,
}

impl NewSupportRequest {
    /// Trimmed copy, or an error describing the first problem
    pub fn validated(&self) -> ApiResult<Self> {
        let subject = self.subject.trim();
        let message = self.message.trim();
        if subject.is_empty() {
            return Err(ApiError::InvalidInput("Subject is required".to_string()));
        }
        if subject.chars().count() > MAX_SUBJECT_LEN {
            return Err(ApiError::InvalidInput(format!(
                "Subject must be at most {} characters",
                MAX_SUBJECT_LEN
            )));
        }
        if message.is_empty() {
            return Err(ApiError::InvalidInput("Message is required".to_string()));
        }
        Ok(Self {
            subject: subject.to_string(),
            message: message.to_string(),
        })
    }
}
