//! Page Request / Page Result
//!
//! Wire shapes exchanged with the page fetcher.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Opaque filter map (e.g. `status` -> `unpaid`, `childId` -> `12`)
pub type Filters = BTreeMap<String, String>;

/// One page query. Built fresh for every fetch and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    pub filters: Filters,
    pub page_number: u32,
    pub page_size: u32,
    pub search: String,
}

impl PageRequest {
    pub fn new(filters: Filters, page_number: u32, page_size: u32, search: impl Into<String>) -> Self {
        Self {
            filters,
            page_number: page_number.max(1),
            page_size: page_size.max(1),
            search: search.into(),
        }
    }
}

/// One page of remote results.
///
/// `total_count` is the server's total for the whole query, not for this page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub total_count: usize,
}

impl<T> PageResult<T> {
    pub fn new(items: Vec<T>, total_count: usize) -> Self {
        Self { items, total_count }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_numbers_are_clamped_to_one() {
        let req = PageRequest::new(Filters::new(), 0, 0, "");
        assert_eq!(req.page_number, 1);
        assert_eq!(req.page_size, 1);
    }

    #[test]
    fn test_request_serializes_camel_case() {
        let mut filters = Filters::new();
        filters.insert("status".to_string(), "unpaid".to_string());
        let req = PageRequest::new(filters, 2, 10, "ada");

        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["pageNumber"], 2);
        assert_eq!(json["pageSize"], 10);
        assert_eq!(json["filters"]["status"], "unpaid");
    }

    #[test]
    fn test_result_deserializes_total_count() {
        let json = r#"{"items":[1,2,3],"totalCount":25}"#;
        let page: PageResult<u32> = serde_json::from_str(json).unwrap();
        assert_eq!(page.items, vec![1, 2, 3]);
        assert_eq!(page.total_count, 25);
    }
}
