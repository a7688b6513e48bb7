//! Fetch errors reported by a page fetcher

use serde::{Deserialize, Serialize};

/// A failed remote call.
///
/// `status` is the HTTP-like status when the server answered, `None` for
/// transport failures. The list controller treats every variant the same way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchError {
    pub status: Option<u16>,
    pub message: String,
}

impl FetchError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }

    /// Network, timeout and 5xx failures are worth retrying
    pub fn is_transient(&self) -> bool {
        match self.status {
            None => true,
            Some(status) => status >= 500 || status == 408 || status == 429,
        }
    }

    /// Message suitable for an inline error row
    pub fn user_message(&self) -> String {
        match self.status {
            None => format!("Network error: {}", self.message),
            Some(status) if status >= 500 => "The server is unavailable, please try again".to_string(),
            Some(_) if !self.message.is_empty() => self.message.clone(),
            Some(status) => format!("Request failed ({})", status),
        }
    }
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.status {
            Some(status) => write!(f, "HTTP {}: {}", status, self.message),
            None => write!(f, "Transport error: {}", self.message),
        }
    }
}

impl std::error::Error for FetchError {}

impl From<String> for FetchError {
    fn from(message: String) -> Self {
        FetchError::transport(message)
    }
}
