//! Merchandise Product Entity

use serde::{Deserialize, Serialize};

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
