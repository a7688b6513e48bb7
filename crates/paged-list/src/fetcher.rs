//! Page Fetcher - the remote collaborator a list is bound to

use std::future::Future;

use async_trait::async_trait;

use crate::error::FetchError;
use crate::request::{PageRequest, PageResult};

/// Retrieves one page of remote results.
///
/// Runs on a single-threaded executor (the UI thread), so futures are not
/// required to be `Send`.
#[async_trait(?Send)]
pub trait PageFetcher<T> {
    async fn fetch_page(&self, request: PageRequest) -> Result<PageResult<T>, FetchError>;
}

/// Adapts an async closure into a [`PageFetcher`]
pub struct FnFetcher<F>(pub F);

#[async_trait(?Send)]
impl<T, F, Fut> PageFetcher<T> for FnFetcher<F>
where
    T: 'static,
    F: Fn(PageRequest) -> Fut,
    Fut: Future<Output = Result<PageResult<T>, FetchError>> + 'static,
{
    async fn fetch_page(&self, request: PageRequest) -> Result<PageResult<T>, FetchError> {
        (self.0)(request).await
    }
}

#[async_trait(?Send)]
impl<T, F> PageFetcher<T> for Box<F>
where
    F: PageFetcher<T> + ?Sized,
{
    async fn fetch_page(&self, request: PageRequest) -> Result<PageResult<T>, FetchError> {
        (**self).fetch_page(request).await
    }
}
