//! Installment Entity
//!
//! One scheduled partial payment of a school fee, owned by a child.

use chrono::NaiveDate;
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
    pub fn as_str(&self) -> &'static str {
        match self {
            InstallmentStatus::Unpaid => "unpaid",
            InstallmentStatus::Paid => "paid",
            InstallmentStatus::Overdue => "overdue",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Installment {
    pub id: u32,
    pub child_id: u32,
    pub child_name: String,
    pub school_name: String,
    /// e.g. "Term 2 - 3/4"
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

    /// Unpaid and past its due date, regardless of what the server flagged
    pub fn is_overdue_on(&self, today: NaiveDate) -> bool {
        match self.status {
            InstallmentStatus::Paid => false,
            InstallmentStatus::Overdue => true,
            InstallmentStatus::Unpaid => self.due_date < today,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn installment(status: InstallmentStatus) -> Installment {
        Installment {
            id: 7,
            child_id: 1,
            child_name: "Ada".to_string(),
            school_name: "Northside Primary".to_string(),
            label: "Term 1 - 1/3".to_string(),
            amount: 15000.0,
            due_date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            status,
        }
    }

    #[test]
    fn test_deserialize_from_api() {
        let json = r#"{
            "id": 7, "childId": 1, "childName": "Ada", "schoolName": "Northside Primary",
            "label": "Term 1 - 1/3", "amount": 15000, "dueDate": "2026-01-15", "status": "overdue"
        }"#;
        let parsed: Installment = serde_json::from_str(json).unwrap();
        assert_eq!(parsed, installment(InstallmentStatus::Overdue));
    }

    #[test]
    fn test_overdue_rules() {
        let after = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
        let before = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        assert!(installment(InstallmentStatus::Unpaid).is_overdue_on(after));
        assert!(!installment(InstallmentStatus::Unpaid).is_overdue_on(before));
        assert!(!installment(InstallmentStatus::Paid).is_overdue_on(after));
        assert!(!installment(InstallmentStatus::Paid).is_payable());
    }
}
