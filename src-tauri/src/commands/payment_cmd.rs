//! Tauri Commands for payments

use paged_list::FetchError;
use tauri::State;

use crate::api::PaymentService;
use crate::domain::{PaymentIntent, PaymentPurpose, PaymentReceipt};
use crate::AppState;

pub(crate) async fn submit_with(
    service: &dyn PaymentService,
    intent: PaymentIntent,
) -> Result<PaymentReceipt, FetchError> {
    let what = match &intent.purpose {
        PaymentPurpose::Installment { installment_id } => format!("installment {}", installment_id),
        PaymentPurpose::Merchandise { lines } => format!("{} merchandise line(s)", lines.len()),
    };

    match service.submit(&intent).await {
        Ok(receipt) => {
            let _ = rolling_logger::info(&format!(
                "Payment of {:.2} for {} accepted: {}",
                intent.amount, what, receipt.reference
            ));
            Ok(receipt)
        }
        Err(e) => {
            let _ = rolling_logger::error(&format!("Payment for {} failed: {}", what, e));
            Err(e.into())
        }
    }
}

/// Submit one payment intent (an installment or a merchandise basket)
#[tauri::command]
pub async fn submit_payment(
    state: State<'_, AppState>,
    intent: PaymentIntent,
) -> Result<PaymentReceipt, FetchError> {
    submit_with(state.payments.as_ref(), intent).await
}
