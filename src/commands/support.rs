//! Support Commands

use paged_list::FetchError;
use serde::Serialize;

use super::call;
use crate::models::SupportRequest;

#[derive(Serialize)]
struct CreateSupportArgs<'a> {
    subject: &'a str,
    message: &'a str,
}

pub async fn create_support_request(subject: &str, message: &str) -> Result<SupportRequest, FetchError> {
    call("create_support_request", &CreateSupportArgs { subject, message }).await
}
