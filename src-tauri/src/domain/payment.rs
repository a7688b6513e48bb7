//! Payment Intent / Receipt
//!
//! One checkout: either a single installment or a merchandise basket.

use serde::{Deserialize, Serialize};

use super::error::{ApiError, ApiResult};

/// Allowed rounding gap between the declared amount and the line total
const AMOUNT_TOLERANCE: f64 = 0.005;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentLine {
    pub product_id: u32,
    pub quantity: u32,
    pub unit_price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PaymentPurpose {
    #[serde(rename_all = "camelCase")]
    Installment { installment_id: u32 },
    Merchandise { lines: Vec<PaymentLine> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntent {
    pub purpose: PaymentPurpose,
    pub amount: f64,
    #[serde(default)]
    pub description: String,
}

impl PaymentIntent {
    /// Local checks before the intent is sent
    pub fn validate(&self) -> ApiResult<()> {
        if !(self.amount > 0.0) {
            return Err(ApiError::InvalidInput("Amount must be greater than zero".to_string()));
        }
        if let PaymentPurpose::Merchandise { lines } = &self.purpose {
            if lines.is_empty() {
                return Err(ApiError::InvalidInput("Cart is empty".to_string()));
            }
            if lines.iter().any(|l| l.quantity == 0 || l.unit_price < 0.0) {
                return Err(ApiError::InvalidInput("Invalid cart line".to_string()));
            }
            let total: f64 = lines.iter().map(|l| l.unit_price * l.quantity as f64).sum();
            if (total - self.amount).abs() > AMOUNT_TOLERANCE {
                return Err(ApiError::InvalidInput(format!(
                    "Amount {:.2} does not match cart total {:.2}",
                    self.amount, total
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentReceipt {
    pub reference: String,
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn basket(amount: f64) -> PaymentIntent {
        PaymentIntent {
            purpose: PaymentPurpose::Merchandise {
                lines: vec![
                    PaymentLine { product_id: 1, quantity: 2, unit_price: 500.0 },
                    PaymentLine { product_id: 2, quantity: 1, unit_price: 250.0 },
                ],
            },
            amount,
            description: String::new(),
        }
    }

    #[test]
    fn test_basket_total_must_match() {
        assert!(basket(1250.0).validate().is_ok());
        assert!(matches!(basket(1000.0).validate(), Err(ApiError::InvalidInput(_))));
    }

    #[test]
    fn test_zero_amount_rejected() {
        let intent = PaymentIntent {
            purpose: PaymentPurpose::Installment { installment_id: 3 },
            amount: 0.0,
            description: String::new(),
        };
        assert!(intent.validate().is_err());
    }

    #[test]
    fn test_purpose_is_tagged_on_the_wire() {
        let intent = PaymentIntent {
            purpose: PaymentPurpose::Installment { installment_id: 3 },
            amount: 100.0,
            description: "Term 1".to_string(),
        };
        let json = serde_json::to_value(&intent).unwrap();
        assert_eq!(json["purpose"]["type"], "installment");
        assert_eq!(json["purpose"]["installmentId"], 3);
    }
}
