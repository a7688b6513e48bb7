//! API Layer - Core Traits
//!
//! Abstract read/write access to the remote collections, so commands can be
//! exercised against in-memory sources.

use async_trait::async_trait;
use paged_list::{PageRequest, PageResult};

use crate::domain::{ApiResult, NewSupportRequest, PaymentIntent, PaymentReceipt, SupportRequest};

/// A paginated, filterable remote collection
#[async_trait]
pub trait PageSource<T>: Send + Sync {
    async fn fetch_page(&self, request: &PageRequest) -> ApiResult<PageResult<T>>;
}

/// Payment endpoint
#[async_trait]
pub trait PaymentService: Send + Sync {
    async fn submit(&self, intent: &PaymentIntent) -> ApiResult<PaymentReceipt>;
}

/// Support request endpoint (writes only; reads go through [`PageSource`])
#[async_trait]
pub trait SupportService: Send + Sync {
    async fn create(&self, request: &NewSupportRequest) -> ApiResult<SupportRequest>;
}
