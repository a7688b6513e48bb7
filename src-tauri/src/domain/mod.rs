//! Domain Layer
//!
//! Records exchanged with the SchoolPay REST API.
//! This layer has no I/O (serde and chrono only).

mod activity;
mod error;
mod installment;
mod payment;
mod product;
mod support;

pub use activity::{Activity, ActivityKind};
pub use error::{ApiError, ApiResult};
pub use installment::{Installment, InstallmentStatus};
pub use payment::{PaymentIntent, PaymentLine, PaymentPurpose, PaymentReceipt};
pub use product::Product;
pub use support::{NewSupportRequest, SupportRequest, SupportStatus};
