//! Activity Entity
//!
//! Entries in a collecting agent's activity feed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    /// Parent paid online
    Payment,
    /// Agent recorded a cash collection
    Collection,
    Note,
}

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
