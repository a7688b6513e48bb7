//! API Layer Tests
//!
//! Config loading against a temp dir, and the client against a one-shot
//! local HTTP server.

use std::sync::Arc;

use paged_list::{Filters, PageRequest};
use reqwest::StatusCode;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use super::client::{error_message, page_query};
use super::*;
use crate::domain::{ApiError, Installment, InstallmentStatus, NewSupportRequest};

/// Serve exactly one response, handing back the raw request head
async fn serve_once(status_line: &'static str, body: &'static str) -> (String, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut head = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            head.extend_from_slice(&chunk[..n]);
            if head.windows(4).any(|w| w == b"\r\n\r\n") {
                break;
            }
        }
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
        let _ = tx.send(String::from_utf8_lossy(&head).to_string());
    });

    (format!("http://{}", addr), rx)
}

fn client_for(base_url: String) -> ApiClient {
    let config = ApiConfig {
        base_url,
        ..ApiConfig::default()
    };
    let http = reqwest::Client::builder().no_proxy().build().unwrap();
    ApiClient::with_http(config, http)
}

fn request(page: u32, search: &str, filters: &[(&str, &str)]) -> PageRequest {
    let filters: Filters = filters
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    PageRequest::new(filters, page, 5, search)
}

// ========================
// Config
// ========================

#[test]
fn test_config_defaults_when_file_missing() {
    let dir = TempDir::new().unwrap();
    let config = ApiConfig::load_with_override(dir.path(), None).unwrap();
    assert_eq!(config, ApiConfig::default());
}

#[test]
fn test_config_reads_file_and_normalizes() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("api_config.json"),
        r#"{ "baseUrl": "https://pay.example.org/api/", "pageSize": 0 }"#,
    )
    .unwrap();

    let config = ApiConfig::load_with_override(dir.path(), None).unwrap();
    assert_eq!(config.base_url, "https://pay.example.org/api");
    assert_eq!(config.page_size, 1);
    assert_eq!(config.timeout_secs, 30);
    assert_eq!(config.endpoint("/installments"), "https://pay.example.org/api/installments");
}

#[test]
fn test_config_env_override_wins() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("api_config.json"), r#"{ "baseUrl": "https://a.example" }"#).unwrap();

    let config = ApiConfig::load_with_override(dir.path(), Some("http://10.0.2.2:8080")).unwrap();
    assert_eq!(config.base_url, "http://10.0.2.2:8080");

    let blank = ApiConfig::load_with_override(dir.path(), Some("  ")).unwrap();
    assert_eq!(blank.base_url, "https://a.example");
}

#[test]
fn test_config_rejects_malformed_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("api_config.json"), "{ not json").unwrap();
    assert!(matches!(
        ApiConfig::load_with_override(dir.path(), None),
        Err(ApiError::InvalidInput(_))
    ));
}

// ========================
// Query / error mapping
// ========================

#[test]
fn test_page_query_skips_blank_search_and_filters() {
    let pairs = page_query(&request(3, "  ", &[("status", "unpaid"), ("childId", "")]));
    assert_eq!(
        pairs,
        vec![
            ("pageNumber".to_string(), "3".to_string()),
            ("pageSize".to_string(), "5".to_string()),
            ("status".to_string(), "unpaid".to_string()),
        ]
    );
}

#[test]
fn test_error_message_sources() {
    assert_eq!(
        error_message(StatusCode::UNPROCESSABLE_ENTITY, r#"{"message":"Installment already paid"}"#),
        "Installment already paid"
    );
    assert_eq!(error_message(StatusCode::BAD_REQUEST, r#"{"error":"bad page"}"#), "bad page");
    assert_eq!(error_message(StatusCode::BAD_GATEWAY, "upstream down"), "upstream down");
    assert_eq!(
        error_message(StatusCode::SERVICE_UNAVAILABLE, "<html>oops</html>"),
        "Service Unavailable"
    );
}

// ========================
// Client over HTTP
// ========================

#[tokio::test]
async fn test_get_page_sends_bearer_and_query() {
    let (base, head) = serve_once(
        "200 OK",
        r#"{"items":[{"id":1,"childId":2,"childName":"Ada","schoolName":"Northside","label":"Term 1 - 1/3","amount":15000,"dueDate":"2026-01-15","status":"unpaid"}],"totalCount":11}"#,
    )
    .await;
    let client = client_for(base);
    client.set_token(Some(" secret-token ".to_string())).await;

    let page = client
        .get_page::<Installment>("installments", &request(2, "ada", &[("status", "unpaid")]))
        .await
        .unwrap();

    assert_eq!(page.total_count, 11);
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].status, InstallmentStatus::Unpaid);

    let head = head.await.unwrap().to_lowercase();
    assert!(head.starts_with("get /installments?"));
    assert!(head.contains("pagenumber=2"));
    assert!(head.contains("pagesize=5"));
    assert!(head.contains("search=ada"));
    assert!(head.contains("status=unpaid"));
    assert!(head.contains("authorization: bearer secret-token"));
}

#[tokio::test]
async fn test_non_success_maps_to_status_error() {
    let (base, _head) = serve_once("500 Internal Server Error", r#"{"message":"database offline"}"#).await;
    let client = Arc::new(client_for(base));
    client.set_token(Some("t".to_string())).await;

    let source = RemoteCollection::<Installment>::new(client, "installments");
    let err = source.fetch_page(&request(1, "", &[])).await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Status {
            status: 500,
            message: "database offline".to_string()
        }
    );
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let (base, _head) = serve_once("200 OK", r#"{"rows":[]}"#).await;
    let client = client_for(base);
    client.set_token(Some("t".to_string())).await;

    let err = client
        .get_page::<Installment>("installments", &request(1, "", &[]))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn test_missing_token_fails_before_sending() {
    let client = client_for("http://127.0.0.1:9".to_string());
    assert!(!client.has_token().await);

    let err = client
        .get_page::<Installment>("installments", &request(1, "", &[]))
        .await
        .unwrap_err();
    assert_eq!(err, ApiError::Unauthenticated);
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // Bind then drop to get a port nothing listens on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(format!("http://{}", addr));
    client.set_token(Some("t".to_string())).await;
    let err = client
        .get_page::<Installment>("installments", &request(1, "", &[]))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}

#[tokio::test]
async fn test_support_validation_runs_before_network() {
    let client = client_for("http://127.0.0.1:9".to_string());
    client.set_token(Some("t".to_string())).await;

    let err = SupportService::create(
        &client,
        &NewSupportRequest {
            subject: String::new(),
            message: "hello".to_string(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput(_)));
}
