//! Domain Layer - Errors
//!
//! Failures talking to the remote API, plus local validation.

use paged_list::FetchError;
use serde::{Deserialize, Serialize};

/// Common result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApiError {
    /// Server answered with a non-success status
    Status { status: u16, message: String },
    /// Connection, TLS or timeout failure
    Transport(String),
    /// Response body did not match the expected shape
    Decode(String),
    /// Rejected locally before anything was sent
    InvalidInput(String),
    /// No bearer token has been supplied yet
    Unauthenticated,
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Unauthenticated => Some(401),
            ApiError::InvalidInput(_) => Some(400),
            ApiError::Transport(_) | ApiError::Decode(_) => None,
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Status { status, message } => write!(f, "HTTP {}: {}", status, message),
            ApiError::Transport(msg) => write!(f, "Transport error: {}", msg),
            ApiError::Decode(msg) => write!(f, "Unexpected response: {}", msg),
            ApiError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            ApiError::Unauthenticated => write!(f, "Not signed in"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else if let Some(status) = e.status() {
            ApiError::Status {
                status: status.as_u16(),
                message: e.to_string(),
            }
        } else {
            ApiError::Transport(e.to_string())
        }
    }
}

/// Shape handed to the front end over IPC
impl From<ApiError> for FetchError {
    fn from(e: ApiError) -> Self {
        let message = match &e {
            ApiError::Status { message, .. } => message.clone(),
            ApiError::InvalidInput(msg) => msg.clone(),
            other => other.to_string(),
        };
        FetchError {
            status: e.status(),
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_keeps_server_message() {
        let err: FetchError = ApiError::Status {
            status: 422,
            message: "Installment already paid".to_string(),
        }
        .into();
        assert_eq!(err.status, Some(422));
        assert_eq!(err.message, "Installment already paid");
    }

    #[test]
    fn test_transport_error_has_no_status() {
        let err: FetchError = ApiError::Transport("connection refused".to_string()).into();
        assert_eq!(err.status, None);
        assert!(err.is_transient());
    }

    #[test]
    fn test_unauthenticated_maps_to_401() {
        let err: FetchError = ApiError::Unauthenticated.into();
        assert_eq!(err.status, Some(401));
        assert!(!err.is_transient());
    }
}
