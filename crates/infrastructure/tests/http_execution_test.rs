//! Integration tests for request execution over real sockets.
//!
//! Each test starts an axum server on an ephemeral local port and drives it
//! through `ExecuteRequest` with the reqwest adapter and file-backed history.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::extract::RawQuery;
use axum::http::{HeaderMap, Method, StatusCode, header};
use axum::response::{IntoResponse, Redirect};
use axum::routing::{any, get};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tempfile::tempdir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use courier_application::ExecuteRequest;
use courier_domain::request::{
    BodyType, Header, HttpMethod, QueryParam, RequestBody, RequestDescriptor,
};
use courier_domain::{ExecutionResult, ExecutorSettings, FailureKind};
use courier_infrastructure::{FileHistoryRepository, ReqwestHttpClient, SystemClock};

async fn echo(
    method: Method,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: String,
) -> Json<Value> {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    Json(json!({
        "method": method.as_str(),
        "query": query,
        "content_type": header("content-type"),
        "x_keep": header("x-keep"),
        "x_skip": header("x-skip"),
        "body": body,
    }))
}

fn router() -> Router {
    Router::new()
        .route("/users", get(|| async { Json(json!({"users": [{"id": 1}]})) }))
        .route(
            "/missing",
            get(|| async { (StatusCode::NOT_FOUND, "no such thing") }),
        )
        .route(
            "/broken",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        )
        .route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "too late"
            }),
        )
        .route("/loop", get(|| async { Redirect::temporary("/loop") }))
        .route(
            "/bad-gzip",
            get(|| async {
                (
                    [(header::CONTENT_ENCODING, "gzip")],
                    "this is definitely not gzip",
                )
                    .into_response()
            }),
        )
        .route("/echo", any(echo))
}

async fn spawn_server() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router()).await.unwrap();
    });
    format!("http://{addr}")
}

fn fast_settings() -> ExecutorSettings {
    ExecutorSettings {
        timeout_ms: 2_000,
        connect_timeout_ms: 1_000,
        retry_backoff_ms: 20,
        ..ExecutorSettings::default()
    }
}

fn executor(
    data_dir: &Path,
    settings: ExecutorSettings,
) -> (
    ExecuteRequest<ReqwestHttpClient>,
    Arc<FileHistoryRepository>,
) {
    let client = ReqwestHttpClient::from_settings(&settings).unwrap();
    let history = Arc::new(FileHistoryRepository::new(data_dir, settings.history_limit));
    let executor = ExecuteRequest::new(
        Arc::new(client),
        history.clone(),
        Arc::new(SystemClock::new()),
        settings,
    );
    (executor, history)
}

#[tokio::test]
async fn test_get_json_returns_raw_body() {
    let base = spawn_server().await;
    let dir = tempdir().unwrap();
    let (executor, history) = executor(dir.path(), fast_settings());

    let outcome = executor
        .execute(&RequestDescriptor::get(format!("{base}/users")))
        .await;

    let response = outcome.expect("request should succeed");
    assert_eq!(response.status, 200);
    assert_eq!(response.body, r#"{"users":[{"id":1}]}"#);
    assert_eq!(response.size_bytes, response.body.len());
    assert_eq!(response.content_type(), Some("application/json"));

    let records = history.recent(10).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].status, Some(200));
}

#[tokio::test]
async fn test_error_statuses_are_successful_executions() {
    let base = spawn_server().await;
    let dir = tempdir().unwrap();
    let (executor, history) = executor(dir.path(), fast_settings());

    let missing = executor
        .execute(&RequestDescriptor::get(format!("{base}/missing")))
        .await
        .unwrap();
    assert_eq!(missing.status, 404);
    assert_eq!(missing.body, "no such thing");

    let broken = executor
        .execute(&RequestDescriptor::get(format!("{base}/broken")))
        .await;
    let result = ExecutionResult::from_outcome(&broken);
    assert!(result.success);
    assert_eq!(result.status, Some(500));
    assert_eq!(result.body.as_deref(), Some("boom"));

    assert_eq!(history.recent(10).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_slow_server_times_out() {
    let base = spawn_server().await;
    let dir = tempdir().unwrap();
    let settings = ExecutorSettings {
        timeout_ms: 300,
        connect_timeout_ms: 200,
        ..fast_settings()
    };
    let (executor, history) = executor(dir.path(), settings);

    let failure = executor
        .execute(&RequestDescriptor::get(format!("{base}/slow")))
        .await
        .unwrap_err();

    assert_eq!(failure.kind, FailureKind::Timeout);
    assert_eq!(failure.message, "Request timed out.");
    assert!(failure.elapsed_ms >= 300);
    assert!(failure.elapsed_ms < 5_000);

    let records = history.recent(10).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].status, None);
}

#[tokio::test]
async fn test_refused_connection_is_retried_then_reported() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let dir = tempdir().unwrap();
    let (executor, history) = executor(dir.path(), fast_settings());

    let failure = executor
        .execute(&RequestDescriptor::get(format!("http://{addr}/")))
        .await
        .unwrap_err();

    assert_eq!(failure.kind, FailureKind::ConnectionRefused);
    assert_eq!(failure.message, "Failed to connect to server.");
    // Two retries with a 20 ms backoff each.
    assert!(failure.elapsed_ms >= 40);
    assert_eq!(history.recent(10).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_unresolvable_host() {
    let dir = tempdir().unwrap();
    let (executor, _history) = executor(dir.path(), fast_settings());

    let failure = executor
        .execute(&RequestDescriptor::get("http://courier-test-host.invalid/"))
        .await
        .unwrap_err();

    assert_eq!(failure.kind, FailureKind::DnsResolution);
    assert_eq!(failure.message, "Could not resolve host.");
}

#[tokio::test]
async fn test_redirect_loop_stops_at_limit() {
    let base = spawn_server().await;
    let dir = tempdir().unwrap();
    let (executor, _history) = executor(dir.path(), fast_settings());

    let failure = executor
        .execute(&RequestDescriptor::get(format!("{base}/loop")))
        .await
        .unwrap_err();

    assert_eq!(failure.kind, FailureKind::TooManyRedirects);
    assert_eq!(failure.message, "Too many redirects (limit 5).");
}

#[tokio::test]
async fn test_garbled_content_encoding() {
    let base = spawn_server().await;
    let dir = tempdir().unwrap();
    let (executor, _history) = executor(dir.path(), fast_settings());

    let failure = executor
        .execute(&RequestDescriptor::get(format!("{base}/bad-gzip")))
        .await
        .unwrap_err();

    assert_eq!(failure.kind, FailureKind::ContentEncoding);
    assert_eq!(failure.message, "Content encoding error.");
}

/// Serves one response that promises more body than it delivers.
async fn spawn_truncating_server() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = [0_u8; 4096];
        let _ = socket.read(&mut request).await.unwrap();
        socket
            .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 1000\r\n\r\npartial")
            .await
            .unwrap();
        socket.shutdown().await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn test_truncated_body_is_a_connection_error() {
    let base = spawn_truncating_server().await;
    let dir = tempdir().unwrap();
    let (executor, history) = executor(dir.path(), fast_settings());

    let failure = executor
        .execute(&RequestDescriptor::get(format!("{base}/")))
        .await
        .unwrap_err();

    assert_eq!(failure.kind, FailureKind::Connection);
    assert!(
        failure.message.starts_with("Connection error: "),
        "unexpected message: {}",
        failure.message
    );
    assert_eq!(history.recent(10).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_inactive_entries_are_not_sent() {
    let base = spawn_server().await;
    let dir = tempdir().unwrap();
    let (executor, _history) = executor(dir.path(), fast_settings());

    let descriptor = RequestDescriptor::new(HttpMethod::Get, format!("{base}/echo"))
        .with_header(Header::new("X-Keep", "yes"))
        .with_header(Header::inactive("X-Skip", "no"))
        .with_query_param(QueryParam::new("page", "2"))
        .with_query_param(QueryParam::inactive("debug", "true"));

    let response = executor.execute(&descriptor).await.unwrap();
    let echoed: Value = serde_json::from_str(&response.body).unwrap();

    assert_eq!(echoed["method"], "GET");
    assert_eq!(echoed["query"], "page=2");
    assert_eq!(echoed["x_keep"], "yes");
    assert_eq!(echoed["x_skip"], Value::Null);
}

#[tokio::test]
async fn test_json_and_form_bodies() {
    let base = spawn_server().await;
    let dir = tempdir().unwrap();
    let (executor, _history) = executor(dir.path(), fast_settings());

    let json_request = RequestDescriptor::new(HttpMethod::Post, format!("{base}/echo"))
        .with_body(RequestBody::json(r#"{ "name": "Ada" }"#));
    let response = executor.execute(&json_request).await.unwrap();
    let echoed: Value = serde_json::from_str(&response.body).unwrap();
    assert_eq!(echoed["method"], "POST");
    assert_eq!(echoed["content_type"], "application/json");
    let sent: Value = serde_json::from_str(echoed["body"].as_str().unwrap()).unwrap();
    assert_eq!(sent, json!({"name": "Ada"}));

    let form_request = RequestDescriptor::new(HttpMethod::Put, format!("{base}/echo"))
        .with_body(RequestBody::new(BodyType::FormUrlEncoded, "a=1&b=two+words"));
    let response = executor.execute(&form_request).await.unwrap();
    let echoed: Value = serde_json::from_str(&response.body).unwrap();
    assert_eq!(echoed["method"], "PUT");
    assert_eq!(
        echoed["content_type"],
        "application/x-www-form-urlencoded"
    );
    assert_eq!(echoed["body"], "a=1&b=two+words");
}

#[tokio::test]
async fn test_get_sends_raw_body_but_not_json() {
    let base = spawn_server().await;
    let dir = tempdir().unwrap();
    let (executor, _history) = executor(dir.path(), fast_settings());

    let raw = RequestDescriptor::new(HttpMethod::Get, format!("{base}/echo"))
        .with_body(RequestBody::raw("search terms"));
    let response = executor.execute(&raw).await.unwrap();
    let echoed: Value = serde_json::from_str(&response.body).unwrap();
    assert_eq!(echoed["body"], "search terms");
    assert_eq!(echoed["content_type"], "text/plain");

    let json_body = RequestDescriptor::new(HttpMethod::Get, format!("{base}/echo"))
        .with_body(RequestBody::json(r#"{"ignored": true}"#));
    let response = executor.execute(&json_body).await.unwrap();
    let echoed: Value = serde_json::from_str(&response.body).unwrap();
    assert_eq!(echoed["body"], "");
    assert_eq!(echoed["content_type"], Value::Null);
}

#[tokio::test]
async fn test_invalid_url_is_recorded_without_network() {
    let dir = tempdir().unwrap();
    let (executor, history) = executor(dir.path(), fast_settings());

    let failure = executor
        .execute(&RequestDescriptor::get("ftp://files.example.com/a.txt"))
        .await
        .unwrap_err();

    assert_eq!(failure.kind, FailureKind::InvalidUrl);
    let records = history.recent(10).await.unwrap();
    assert_eq!(records.len(), 1);
    assert!(!records[0].succeeded());
}
