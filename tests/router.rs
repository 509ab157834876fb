//! In-process router tests: middleware, wire format and edge cases.

use std::io::Write;
use std::sync::{Arc, Mutex};

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use tracing_subscriber::fmt::MakeWriter;

use rain_tracker::store::RecordStore;
use rain_tracker::{HttpServer, MemoryStore, RainConfig};

mod common;

fn router_with(store: Arc<dyn RecordStore>, config: RainConfig) -> Router {
    HttpServer::new(config, store).router()
}

fn post(user: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::post("/api/v1/rain").header("content-type", "application/json");
    if let Some(user) = user {
        builder = builder.header("x-userid", user);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get(user: &str) -> Request<Body> {
    Request::get("/api/v1/rain")
        .header("x-userid", user)
        .body(Body::empty())
        .unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_listing_wire_format() {
    let store = Arc::new(MemoryStore::new());
    let router = router_with(store, RainConfig::default());

    let response = router.clone().oneshot(post(Some("u1"), r#"{"rain":true}"#)).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = router.oneshot(get("u1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    let items = body["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["rain"], true);
    assert_eq!(items[0].as_object().unwrap().len(), 2);

    let ts = items[0]["timestamp"].as_str().unwrap();
    assert!(ts.ends_with('Z'));
    assert!(chrono::DateTime::parse_from_rfc3339(ts).is_ok());
}

#[tokio::test]
async fn test_null_body_is_missing() {
    let store = Arc::new(MemoryStore::new());
    let router = router_with(store.clone(), RainConfig::default());

    let response = router.oneshot(post(Some("u1"), "null")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await, json!({ "error": "Request body is required" }));
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_malformed_body_rejected() {
    let store = Arc::new(MemoryStore::new());
    let router = router_with(store.clone(), RainConfig::default());

    for raw in [r#"{"rain":"yes"}"#, "{}", "{ broken"] {
        let response = router.clone().oneshot(post(Some("u1"), raw)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert!(body["error"].as_str().unwrap().contains("\"rain\""));
    }
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_owner_error_takes_precedence() {
    let store = Arc::new(MemoryStore::new());
    let router = router_with(store.clone(), RainConfig::default());

    for (user, body) in [(None, ""), (Some(" "), "{ broken"), (None, "null")] {
        let response = router.clone().oneshot(post(user, body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await, json!({ "error": "x-userId header is required" }));
    }
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_request_id_propagated() {
    let router = router_with(Arc::new(MemoryStore::new()), RainConfig::default());

    let request = Request::get("/api/v1/rain")
        .header("x-userid", "u1")
        .header("x-request-id", "trace-me-123")
        .body(Body::empty())
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.headers()["x-request-id"], "trace-me-123");

    let response = router.oneshot(get("u1")).await.unwrap();
    let generated = response.headers()["x-request-id"].to_str().unwrap();
    assert!(uuid::Uuid::parse_str(generated).is_ok());
}

#[tokio::test]
async fn test_body_limit_enforced() {
    let store = Arc::new(MemoryStore::new());
    let mut config = RainConfig::default();
    config.security.max_body_size = 16;
    let router = router_with(store.clone(), config);

    let padded = format!(r#"{{"rain":true{}}}"#, " ".repeat(64));
    let response = router.oneshot(post(Some("u1"), &padded)).await.unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_unsupported_method() {
    let router = router_with(Arc::new(MemoryStore::new()), RainConfig::default());

    let request = Request::delete("/api/v1/rain")
        .header("x-userid", "u1")
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_store_failure_status() {
    let store = Arc::new(common::FailingStore::default());
    let router = router_with(store, RainConfig::default());

    let response = router.oneshot(get("u1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json_body(response).await,
        json!({ "error": "Internal server error occurred while retrieving data" })
    );
}

/// Collects formatted log output for assertions.
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = LogBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[tokio::test]
async fn test_service_logs_carry_request_id() {
    let logs = LogBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::INFO)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let router = router_with(Arc::new(MemoryStore::new()), RainConfig::default());
    let request = Request::get("/api/v1/rain")
        .header("x-userid", "u1")
        .header("x-request-id", "rid-list-42")
        .body(Body::empty())
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let failing = router_with(Arc::new(common::FailingStore::default()), RainConfig::default());
    let request = Request::post("/api/v1/rain")
        .header("x-userid", "u2")
        .header("x-request-id", "rid-record-43")
        .body(Body::from(r#"{"rain":true}"#))
        .unwrap();
    let response = failing.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let output = logs.contents();
    let retrieving = output
        .lines()
        .find(|l| l.contains("Retrieving rain data"))
        .expect("service did not log the listing");
    assert!(retrieving.contains("rid-list-42"), "missing request id: {}", retrieving);

    let failure = output
        .lines()
        .find(|l| l.contains("Error recording rain data"))
        .expect("service did not log the store failure");
    assert!(failure.contains("rid-record-43"), "missing request id: {}", failure);
    assert!(failure.contains("user_id=u2"));
}
