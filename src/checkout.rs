//! Checkout
//!
//! Turns the cart (or a single installment) into a payment intent and
//! submits it once. The cart is cleared only after the server accepts.

use async_trait::async_trait;
use paged_list::FetchError;

use crate::cart::Cart;
use crate::commands;
use crate::error::AppError;
use crate::models::{format_amount, Installment, PaymentIntent, PaymentPurpose, PaymentReceipt};

/// Remote payment endpoint
#[async_trait(?Send)]
pub trait PaymentGateway {
    async fn submit(&self, intent: &PaymentIntent) -> Result<PaymentReceipt, FetchError>;
}

/// Gateway backed by the `submit_payment` command
pub struct TauriGateway;

#[async_trait(?Send)]
impl PaymentGateway for TauriGateway {
    async fn submit(&self, intent: &PaymentIntent) -> Result<PaymentReceipt, FetchError> {
        commands::submit_payment(intent).await
    }
}

/// Intent for the current cart, or a validation error when there is
/// nothing to pay
pub fn cart_intent(cart: &Cart) -> Result<PaymentIntent, AppError> {
    if cart.is_empty() {
        return Err(AppError::Validation("Your cart is empty".to_string()));
    }
    let amount = cart.total();
    if !(amount > 0.0) {
        return Err(AppError::Validation("Cart total must be greater than zero".to_string()));
    }
    Ok(PaymentIntent {
        purpose: PaymentPurpose::Merchandise { lines: cart.lines() },
        amount,
        description: cart.items_summary(),
    })
}

pub fn installment_intent(installment: &Installment) -> Result<PaymentIntent, AppError> {
    if !installment.is_payable() {
        return Err(AppError::Validation(format!("{} is already paid", installment.label)));
    }
    Ok(PaymentIntent {
        purpose: PaymentPurpose::Installment {
            installment_id: installment.id,
        },
        amount: installment.amount,
        description: format!(
            "{} - {} ({})",
            installment.child_name,
            installment.label,
            format_amount(installment.amount)
        ),
    })
}

/// Pay for the cart. Clears it on success, leaves it untouched otherwise.
pub async fn checkout<G: PaymentGateway + ?Sized>(
    cart: &mut Cart,
    gateway: &G,
) -> Result<PaymentReceipt, AppError> {
    let intent = cart_intent(cart)?;
    let receipt = gateway.submit(&intent).await.map_err(AppError::from_payment)?;
    cart.clear();
    Ok(receipt)
}

pub async fn pay_installment<G: PaymentGateway + ?Sized>(
    installment: &Installment,
    gateway: &G,
) -> Result<PaymentReceipt, AppError> {
    let intent = installment_intent(installment)?;
    gateway.submit(&intent).await.map_err(AppError::from_payment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{InstallmentStatus, Product};
    use chrono::NaiveDate;
    use std::cell::RefCell;

    struct MockGateway {
        outcome: Result<PaymentReceipt, FetchError>,
        calls: RefCell<Vec<PaymentIntent>>,
    }

    impl MockGateway {
        fn accepting() -> Self {
            Self {
                outcome: Ok(PaymentReceipt {
                    reference: "SP-42".to_string(),
                    status: "succeeded".to_string(),
                }),
                calls: RefCell::new(Vec::new()),
            }
        }

        fn failing(err: FetchError) -> Self {
            Self {
                outcome: Err(err),
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    #[async_trait(?Send)]
    impl PaymentGateway for MockGateway {
        async fn submit(&self, intent: &PaymentIntent) -> Result<PaymentReceipt, FetchError> {
            self.calls.borrow_mut().push(intent.clone());
            self.outcome.clone()
        }
    }

    fn product(id: u32, price: f64) -> Product {
        Product {
            id,
            name: format!("Product {}", id),
            description: String::new(),
            unit_price: price,
            school_name: "Northside".to_string(),
            image_url: None,
        }
    }

    fn filled_cart() -> Cart {
        let mut cart = Cart::new();
        cart.add(product(1, 500.0));
        cart.add(product(1, 500.0));
        cart.add(product(2, 250.0));
        cart
    }

    #[tokio::test]
    async fn test_successful_checkout_clears_cart() {
        let mut cart = filled_cart();
        let gateway = MockGateway::accepting();

        let receipt = checkout(&mut cart, &gateway).await.unwrap();
        assert_eq!(receipt.reference, "SP-42");
        assert!(cart.is_empty());

        let calls = gateway.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].amount, 1250.0);
        assert!(matches!(&calls[0].purpose, PaymentPurpose::Merchandise { lines } if lines.len() == 2));
    }

    #[tokio::test]
    async fn test_declined_checkout_keeps_cart() {
        let mut cart = filled_cart();
        let before = cart.clone();
        let gateway = MockGateway::failing(FetchError::new(402, "Card declined"));

        let err = checkout(&mut cart, &gateway).await.unwrap_err();
        assert_eq!(err, AppError::TerminalPayment("Card declined".to_string()));
        assert_eq!(cart, before);
    }

    #[tokio::test]
    async fn test_network_failure_is_retryable_and_keeps_cart() {
        let mut cart = filled_cart();
        let gateway = MockGateway::failing(FetchError::transport("offline"));

        let err = checkout(&mut cart, &gateway).await.unwrap_err();
        assert!(err.is_retryable());
        assert_eq!(cart.count(), 3);
    }

    #[tokio::test]
    async fn test_zero_total_never_reaches_gateway() {
        let mut cart = Cart::new();
        cart.add(product(9, 0.0));
        let gateway = MockGateway::accepting();

        let err = checkout(&mut cart, &gateway).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(gateway.calls.borrow().is_empty());
        assert_eq!(cart.count(), 1);
    }

    #[tokio::test]
    async fn test_paid_installment_is_rejected_locally() {
        let mut installment = Installment {
            id: 3,
            child_id: 1,
            child_name: "Ada".to_string(),
            school_name: "Northside".to_string(),
            label: "Term 1 - 1/3".to_string(),
            amount: 15000.0,
            due_date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            status: InstallmentStatus::Paid,
        };
        let gateway = MockGateway::accepting();
        assert!(matches!(
            pay_installment(&installment, &gateway).await,
            Err(AppError::Validation(_))
        ));

        installment.status = InstallmentStatus::Unpaid;
        let receipt = pay_installment(&installment, &gateway).await.unwrap();
        assert_eq!(receipt.reference, "SP-42");
        assert_eq!(
            gateway.calls.borrow()[0].purpose,
            PaymentPurpose::Installment { installment_id: 3 }
        );
    }
}
