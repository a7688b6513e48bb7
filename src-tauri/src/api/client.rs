//! REST Client
//!
//! Thin reqwest wrapper: bearer auth, page queries, error-body mapping.

use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use paged_list::{PageRequest, PageResult};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use super::config::ApiConfig;
use super::traits::{PageSource, PaymentService, SupportService};
use crate::domain::{
    ApiError, ApiResult, NewSupportRequest, PaymentIntent, PaymentReceipt, SupportRequest,
};

/// Longest raw (non-JSON) error body surfaced to the user
const MAX_PLAIN_ERROR_LEN: usize = 200;

pub struct ApiClient {
    http: reqwest::Client,
    config: ApiConfig,
    token: RwLock<Option<String>>,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(Self::with_http(config, http))
    }

    pub(crate) fn with_http(config: ApiConfig, http: reqwest::Client) -> Self {
        Self {
            http,
            config,
            token: RwLock::new(None),
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Replace (or clear, with `None`/blank) the bearer token
    pub async fn set_token(&self, token: Option<String>) {
        let token = token.map(|t| t.trim().to_string()).filter(|t| !t.is_empty());
        *self.token.write().await = token;
    }

    pub async fn has_token(&self) -> bool {
        self.token.read().await.is_some()
    }

    async fn authorize(&self, builder: RequestBuilder) -> ApiResult<RequestBuilder> {
        match self.token.read().await.as_deref() {
            Some(token) => Ok(builder.bearer_auth(token)),
            None => Err(ApiError::Unauthenticated),
        }
    }

    pub async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        request: &PageRequest,
    ) -> ApiResult<PageResult<T>> {
        let url = self.config.endpoint(path);
        log::debug!("GET {} page {} size {}", url, request.page_number, request.page_size);
        let builder = self.http.get(&url).query(&page_query(request));
        let response = self.authorize(builder).await?.send().await?;
        decode(response).await
    }

    pub async fn post_json<B, R>(&self, path: &str, body: &B) -> ApiResult<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.config.endpoint(path);
        log::debug!("POST {}", url);
        let builder = self.http.post(&url).json(body);
        let response = self.authorize(builder).await?.send().await?;
        decode(response).await
    }
}

/// Flatten a page request into query pairs; filters sit alongside paging keys
pub(crate) fn page_query(request: &PageRequest) -> Vec<(String, String)> {
    let mut pairs = vec![
        ("pageNumber".to_string(), request.page_number.to_string()),
        ("pageSize".to_string(), request.page_size.to_string()),
    ];
    let search = request.search.trim();
    if !search.is_empty() {
        pairs.push(("search".to_string(), search.to_string()));
    }
    for (key, value) in &request.filters {
        if !value.is_empty() {
            pairs.push((key.clone(), value.clone()));
        }
    }
    pairs
}

async fn decode<R: DeserializeOwned>(response: Response) -> ApiResult<R> {
    let status = response.status();
    if status.is_success() {
        return response
            .json::<R>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()));
    }
    let body = response.text().await.unwrap_or_default();
    let message = error_message(status, &body);
    log::warn!("HTTP {} from server: {}", status.as_u16(), message);
    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// Best human-readable message for a failed response
pub(crate) fn error_message(status: StatusCode, body: &str) -> String {
    let from_json = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message.or(b.error))
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty());
    if let Some(message) = from_json {
        return message;
    }

    let plain = body.trim();
    if !plain.is_empty() && plain.len() <= MAX_PLAIN_ERROR_LEN && !plain.starts_with('<') {
        return plain.to_string();
    }

    status
        .canonical_reason()
        .unwrap_or("Request failed")
        .to_string()
}

// ========================
// Endpoint bindings
// ========================

/// One paginated REST collection, e.g. `installments`
pub struct RemoteCollection<T> {
    client: Arc<ApiClient>,
    path: &'static str,
    _item: PhantomData<fn() -> T>,
}

impl<T> RemoteCollection<T> {
    pub fn new(client: Arc<ApiClient>, path: &'static str) -> Self {
        Self {
            client,
            path,
            _item: PhantomData,
        }
    }
}

#[async_trait]
impl<T> PageSource<T> for RemoteCollection<T>
where
    T: DeserializeOwned + Send + 'static,
{
    async fn fetch_page(&self, request: &PageRequest) -> ApiResult<PageResult<T>> {
        self.client.get_page(self.path, request).await
    }
}

#[async_trait]
impl PaymentService for ApiClient {
    async fn submit(&self, intent: &PaymentIntent) -> ApiResult<PaymentReceipt> {
        intent.validate()?;
        self.post_json("payments", intent).await
    }
}

#[async_trait]
impl SupportService for ApiClient {
    async fn create(&self, request: &NewSupportRequest) -> ApiResult<SupportRequest> {
        let request = request.validated()?;
        self.post_json("support-requests", &request).await
    }
}
