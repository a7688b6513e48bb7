//! List Commands
//!
//! One page fetcher per remote collection.

use paged_list::{FetchError, PageRequest, PageResult};
use serde::Serialize;

use super::call;
use crate::models::{Activity, Installment, Product, SupportRequest};

#[derive(Serialize)]
struct RequestArgs<'a> {
    request: &'a PageRequest,
}

pub async fn list_installments(request: PageRequest) -> Result<PageResult<Installment>, FetchError> {
    call("list_installments", &RequestArgs { request: &request }).await
}

pub async fn list_merchandise(request: PageRequest) -> Result<PageResult<Product>, FetchError> {
    call("list_merchandise", &RequestArgs { request: &request }).await
}

pub async fn list_activities(request: PageRequest) -> Result<PageResult<Activity>, FetchError> {
    call("list_activities", &RequestArgs { request: &request }).await
}

pub async fn list_support_requests(request: PageRequest) -> Result<PageResult<SupportRequest>, FetchError> {
    call("list_support_requests", &RequestArgs { request: &request }).await
}
