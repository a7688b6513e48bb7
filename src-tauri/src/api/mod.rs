//! API Layer
//!
//! Access to the SchoolPay REST backend.

mod client;
mod config;
mod traits;

#[cfg(test)]
mod tests;

pub use client::{ApiClient, RemoteCollection};
pub use config::ApiConfig;
pub use traits::{PageSource, PaymentService, SupportService};
