//! Tauri Commands for paginated lists
//!
//! Every list screen pages through one of these. Errors cross IPC as
//! `FetchError` so the front end can tell transient from terminal.

use paged_list::{FetchError, PageRequest, PageResult};
use tauri::State;

use crate::api::PageSource;
use crate::domain::{Activity, Installment, Product, SupportRequest};
use crate::AppState;

/// Fetch one page, logging failures
pub(crate) async fn fetch_list<T>(
    name: &str,
    source: &dyn PageSource<T>,
    request: PageRequest,
) -> Result<PageResult<T>, FetchError> {
    match source.fetch_page(&request).await {
        Ok(page) => {
            log::debug!(
                "{} page {}: {} of {}",
                name,
                request.page_number,
                page.items.len(),
                page.total_count
            );
            Ok(page)
        }
        Err(e) => {
            let _ = rolling_logger::warn(&format!("{} page {} failed: {}", name, request.page_number, e));
            Err(e.into())
        }
    }
}

#[tauri::command]
pub async fn list_installments(
    state: State<'_, AppState>,
    request: PageRequest,
) -> Result<PageResult<Installment>, FetchError> {
    fetch_list("installments", state.installments.as_ref(), request).await
}

#[tauri::command]
pub async fn list_merchandise(
    state: State<'_, AppState>,
    request: PageRequest,
) -> Result<PageResult<Product>, FetchError> {
    fetch_list("merchandise", state.merchandise.as_ref(), request).await
}

#[tauri::command]
pub async fn list_activities(
    state: State<'_, AppState>,
    request: PageRequest,
) -> Result<PageResult<Activity>, FetchError> {
    fetch_list("activities", state.activities.as_ref(), request).await
}

#[tauri::command]
pub async fn list_support_requests(
    state: State<'_, AppState>,
    request: PageRequest,
) -> Result<PageResult<SupportRequest>, FetchError> {
    fetch_list("support requests", state.support_requests.as_ref(), request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ApiError, ApiResult};
    use async_trait::async_trait;

    /// Serves a fixed catalogue, honouring page number and size
    struct Catalogue(Vec<Product>);

    #[async_trait]
    impl PageSource<Product> for Catalogue {
        async fn fetch_page(&self, request: &PageRequest) -> ApiResult<PageResult<Product>> {
            let start = ((request.page_number - 1) * request.page_size) as usize;
            let items = self
                .0
                .iter()
                .skip(start)
                .take(request.page_size as usize)
                .cloned()
                .collect();
            Ok(PageResult::new(items, self.0.len()))
        }
    }

    struct Offline;

    #[async_trait]
    impl PageSource<Product> for Offline {
        async fn fetch_page(&self, _request: &PageRequest) -> ApiResult<PageResult<Product>> {
            Err(ApiError::Transport("network unreachable".to_string()))
        }
    }

    fn product(id: u32) -> Product {
        Product {
            id,
            name: format!("Item {}", id),
            description: String::new(),
            unit_price: 100.0,
            school_name: "Northside".to_string(),
            image_url: None,
        }
    }

    #[tokio::test]
    async fn test_fetch_list_pages_through_source() {
        let source = Catalogue((1..=12).map(product).collect());
        let request = PageRequest::new(Default::default(), 2, 5, "");

        let page = fetch_list("merchandise", &source, request).await.unwrap();
        let ids: Vec<u32> = page.items.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![6, 7, 8, 9, 10]);
        assert_eq!(page.total_count, 12);
    }

    #[tokio::test]
    async fn test_fetch_list_converts_errors() {
        let request = PageRequest::new(Default::default(), 1, 5, "");
        let err = fetch_list("merchandise", &Offline, request).await.unwrap_err();
        assert_eq!(err.status, None);
        assert!(err.is_transient());
    }
}
