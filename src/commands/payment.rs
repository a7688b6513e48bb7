//! Payment Commands

use paged_list::FetchError;
use serde::Serialize;

use super::call;
use crate::models::{PaymentIntent, PaymentReceipt};

#[derive(Serialize)]
struct IntentArgs<'a> {
    intent: &'a PaymentIntent,
}

pub async fn submit_payment(intent: &PaymentIntent) -> Result<PaymentReceipt, FetchError> {
    call("submit_payment", &IntentArgs { intent }).await
}
