//! Frontend Errors
//!
//! Transient fetch failures are shown inline with a retry; validation and
//! terminal payment failures are shown once and need user action.

use paged_list::FetchError;

#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    /// Network / 5xx. Retrying the same action may succeed.
    TransientFetch(FetchError),
    /// Rejected locally, nothing was sent
    Validation(String),
    /// The payment provider or server refused the payment
    TerminalPayment(String),
}

impl AppError {
    /// Classify an error returned by the payment command
    pub fn from_payment(err: FetchError) -> Self {
        if err.is_transient() {
            AppError::TransientFetch(err)
        } else {
            AppError::TerminalPayment(err.user_message())
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::TransientFetch(_))
    }

    pub fn user_message(&self) -> String {
        match self {
            AppError::TransientFetch(e) => e.user_message(),
            AppError::Validation(msg) | AppError::TerminalPayment(msg) => msg.clone(),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::TransientFetch(e) => write!(f, "{}", e),
            AppError::Validation(msg) => write!(f, "Invalid: {}", msg),
            AppError::TerminalPayment(msg) => write!(f, "Payment failed: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<FetchError> for AppError {
    fn from(e: FetchError) -> Self {
        AppError::TransientFetch(e)
    }
}
