//! Frontend Models
//!
//! Data structures matching backend records.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InstallmentStatus {
    #[default]
    Unpaid,
    Paid,
    Overdue,
}

impl InstallmentStatus {
    pub const ALL: [InstallmentStatus; 3] = [
        InstallmentStatus::Unpaid,
        InstallmentStatus::Overdue,
        InstallmentStatus::Paid,
    ];

    /// Value sent in the `status` filter
    pub fn as_str(&self) -> &'static str {
        match self {
            InstallmentStatus::Unpaid => "unpaid",
            InstallmentStatus::Paid => "paid",
            InstallmentStatus::Overdue => "overdue",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            InstallmentStatus::Unpaid => "Unpaid",
            InstallmentStatus::Paid => "Paid",
            InstallmentStatus::Overdue => "Overdue",
        }
    }
}

/// Installment (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Installment {
    pub id: u32,
    pub child_id: u32,
    pub child_name: String,
    pub school_name: String,
    pub label: String,
    pub amount: f64,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub status: InstallmentStatus,
}

impl Installment {
    pub fn is_payable(&self) -> bool {
        self.status != InstallmentStatus::Paid && self.amount > 0.0
    }
}

/// Merchandise product (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub unit_price: f64,
    pub school_name: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Payment,
    Collection,
    Note,
}

/// Agent activity feed entry (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: u32,
    pub kind: ActivityKind,
    pub description: String,
    #[serde(default)]
    pub parent_name: Option<String>,
    #[serde(default)]
    pub amount: Option<f64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SupportStatus {
    #[default]
    Open,
    InProgress,
    Resolved,
}

impl SupportStatus {
    pub fn label(&self) -> &'static str {
        match self {
            SupportStatus::Open => "Open",
            SupportStatus::InProgress => "In progress",
            SupportStatus::Resolved => "Resolved",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportRequest {
    pub id: u32,
    pub subject: String,
    pub message: String,
    #[serde(default)]
    pub status: SupportStatus,
    pub created_at: DateTime<Utc>,
}

// ========================
// Payments
// ========================

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
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentReceipt {
    pub reference: String,
    pub status: String,
}

/// Effective backend config (matches backend `ApiConfig`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub page_size: u32,
}

/// Amounts are shown with two decimals, no currency symbol
pub fn format_amount(amount: f64) -> String {
    format!("{:.2}", amount)
}
