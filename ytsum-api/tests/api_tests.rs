//! Integration tests for ytsum-api HTTP endpoints
//!
//! Drives the full router with `oneshot`; the content generator is replaced
//! by an in-process fake so no network is touched.
//!
//! Tests cover:
//! - Health, build info and landing page
//! - Registration and login status codes
//! - Summarize/ask success, validation, quota and upstream failures
//! - Degraded mode (no generator configured)
//! - Isolation between the auth and summarize flows

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tower::util::ServiceExt; // for `oneshot` method
use ytsum_api::generator::{ContentGenerator, GenerationError};
use ytsum_api::summarizer::{Summarizer, DEFAULT_SUMMARY_PROMPT, QUOTA_REMEDIATION};
use ytsum_api::{build_router, AppState};

/// Test helper: generator that records payloads and replays one outcome
struct FakeGenerator {
    outcome: Result<Value, GenerationError>,
    payloads: Mutex<Vec<Value>>,
}

impl FakeGenerator {
    fn replying(text: &str) -> Arc<Self> {
        Self::with_outcome(Ok(json!({
            "candidates": [{"content": {"parts": [{"text": text}]}}]
        })))
    }

    fn with_outcome(outcome: Result<Value, GenerationError>) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            payloads: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> usize {
        self.payloads.lock().unwrap().len()
    }

    fn last_payload(&self) -> Value {
        self.payloads.lock().unwrap().last().cloned().expect("No call recorded")
    }
}

#[async_trait]
impl ContentGenerator for FakeGenerator {
    fn name(&self) -> &str {
        "fake"
    }

    async fn generate_content(&self, _model: &str, payload: &Value) -> Result<Value, GenerationError> {
        self.payloads.lock().unwrap().push(payload.clone());
        self.outcome.clone()
    }
}

/// Test helper: app backed by the given fake generator
fn setup_app(generator: Arc<FakeGenerator>) -> (AppState, Router) {
    let summarizer = Summarizer::new(Some(generator as Arc<dyn ContentGenerator>), "test-model");
    let state = AppState::new(summarizer);
    (state.clone(), build_router(state))
}

/// Test helper: app with no generator (missing API key)
fn setup_degraded_app() -> Router {
    build_router(AppState::new(Summarizer::unavailable("test-model")))
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn json_request(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Test helper: send a request, return status and JSON body
async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).expect("Should parse JSON");
    (status, body)
}

fn credentials(username: &str, password: &str) -> Value {
    json!({"username": username, "password": password})
}

// =============================================================================
// Health / build info / UI
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let (_, app) = setup_app(FakeGenerator::replying("unused"));

    let (status, body) = send(&app, get_request("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "ytsum-api");
    assert_eq!(body["generator"], "ready");
    assert_eq!(body["model"], "test-model");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_health_reports_degraded_mode() {
    let app = setup_degraded_app();

    let (status, body) = send(&app, get_request("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["generator"], "unavailable");
}

#[tokio::test]
async fn test_buildinfo_endpoint() {
    let app = setup_degraded_app();

    let (status, body) = send(&app, get_request("/api/buildinfo")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert!(body["git_hash"].is_string());
    assert!(body["build_timestamp"].is_string());
}

#[tokio::test]
async fn test_landing_page_served() {
    let app = setup_degraded_app();

    let response = app.oneshot(get_request("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"));

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("/api/summarize"));
}

// =============================================================================
// Registration / login
// =============================================================================

#[tokio::test]
async fn test_register_then_login() {
    let (state, app) = setup_app(FakeGenerator::replying("unused"));

    let (status, body) = send(&app, json_request("/api/register", credentials("alice", "pw1"))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "User registered");
    assert!(state.users.contains("alice"));

    let (status, body) = send(&app, json_request("/api/login", credentials("alice", "pw1"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Login successful");
}

#[tokio::test]
async fn test_duplicate_registration_conflicts() {
    let (state, app) = setup_app(FakeGenerator::replying("unused"));

    let (status, _) = send(&app, json_request("/api/register", credentials("alice", "pw1"))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, json_request("/api/register", credentials("alice", "other"))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "User already exists");

    // Original password still works
    let (status, _) = send(&app, json_request("/api/login", credentials("alice", "pw1"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(state.users.len(), 1);
}

#[tokio::test]
async fn test_register_missing_fields() {
    let (state, app) = setup_app(FakeGenerator::replying("unused"));

    for body in [
        json!({"username": "bob"}),
        json!({"password": "pw"}),
        json!({"username": "", "password": "pw"}),
        json!({"username": "bob", "password": ""}),
        json!({}),
    ] {
        let (status, response) = send(&app, json_request("/api/register", body.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{} should be rejected", body);
        assert_eq!(response["status"], "error");
    }

    assert!(state.users.is_empty());
}

#[tokio::test]
async fn test_login_unknown_user() {
    let (_, app) = setup_app(FakeGenerator::replying("unused"));

    let (status, body) = send(&app, json_request("/api/login", credentials("ghost", "pw"))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User not found");
}

#[tokio::test]
async fn test_login_wrong_password() {
    let (_, app) = setup_app(FakeGenerator::replying("unused"));

    send(&app, json_request("/api/register", credentials("alice", "pw1"))).await;
    let (status, body) = send(&app, json_request("/api/login", credentials("alice", "wrong"))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid password");
}

#[tokio::test]
async fn test_login_missing_fields() {
    let (_, app) = setup_app(FakeGenerator::replying("unused"));

    let (status, _) = send(&app, json_request("/api/login", json!({"username": "alice"}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_auth_never_calls_generator() {
    let generator = FakeGenerator::replying("unused");
    let (_, app) = setup_app(generator.clone());

    send(&app, json_request("/api/register", credentials("alice", "pw1"))).await;
    send(&app, json_request("/api/login", credentials("alice", "pw1"))).await;
    send(&app, json_request("/api/login", credentials("alice", "bad"))).await;

    assert_eq!(generator.calls(), 0);
}

// =============================================================================
// Summarize
// =============================================================================

#[tokio::test]
async fn test_summarize_success() {
    let generator = FakeGenerator::replying("- one\n- two\n- three");
    let (_, app) = setup_app(generator.clone());

    let (status, body) = send(
        &app,
        json_request("/api/summarize", json!({"url": "https://youtu.be/dQw4w9WgXcQ"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["summary"], "- one\n- two\n- three");
    assert_eq!(body["url"], "https://youtu.be/dQw4w9WgXcQ");

    let payload = generator.last_payload();
    let parts = &payload["contents"][0]["parts"];
    assert_eq!(payload["contents"][0]["role"], "user");
    assert_eq!(parts[0]["fileData"]["fileUri"], "https://youtu.be/dQw4w9WgXcQ");
    assert_eq!(parts[0]["fileData"]["mimeType"], "video/mp4");
    assert_eq!(parts[1]["text"], DEFAULT_SUMMARY_PROMPT);
}

#[tokio::test]
async fn test_summarize_custom_prompt() {
    let generator = FakeGenerator::replying("short");
    let (_, app) = setup_app(generator.clone());

    let (status, _) = send(
        &app,
        json_request(
            "/api/summarize",
            json!({"url": "www.youtube.com/watch?v=abc", "prompt": "One sentence please"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        generator.last_payload()["contents"][0]["parts"][1]["text"],
        "One sentence please"
    );
}

#[tokio::test]
async fn test_summarize_invalid_input() {
    let generator = FakeGenerator::replying("unused");
    let (_, app) = setup_app(generator.clone());

    for body in [
        json!({}),
        json!({"url": ""}),
        json!({"url": "https://vimeo.com/123"}),
        json!({"url": "https://youtube.com/"}),
        json!({"url": "https://youtu.be/abc", "prompt": ""}),
    ] {
        let (status, response) = send(&app, json_request("/api/summarize", body.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{} should be rejected", body);
        assert_eq!(response["status"], "error");
    }

    assert_eq!(generator.calls(), 0);
}

#[tokio::test]
async fn test_summarize_malformed_json() {
    let (_, app) = setup_app(FakeGenerator::replying("unused"));

    let request = Request::builder()
        .method("POST")
        .uri("/api/summarize")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn test_summarize_without_generator() {
    let app = setup_degraded_app();

    let (status, body) = send(
        &app,
        json_request("/api/summarize", json!({"url": "https://youtu.be/abc"})),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["status"], "error");
    assert!(body["message"].as_str().unwrap().contains("GEMINI_API_KEY"));
}

#[tokio::test]
async fn test_summarize_quota_exceeded() {
    let generator = FakeGenerator::with_outcome(Err(GenerationError::http(
        429,
        "429 RESOURCE_EXHAUSTED. Quota exceeded for metric",
    )));
    let (_, app) = setup_app(generator);

    let (status, body) = send(
        &app,
        json_request("/api/summarize", json!({"url": "https://youtu.be/abc"})),
    )
    .await;

    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    let message = body["message"].as_str().unwrap();
    assert!(message.starts_with("429 RESOURCE_EXHAUSTED. Quota exceeded for metric"));
    assert!(message.ends_with(QUOTA_REMEDIATION));
}

#[tokio::test]
async fn test_summarize_upstream_failure() {
    let generator = FakeGenerator::with_outcome(Err(GenerationError::http(
        400,
        "400 INVALID_ARGUMENT. Video is private",
    )));
    let (_, app) = setup_app(generator);

    let (status, body) = send(
        &app,
        json_request("/api/summarize", json!({"url": "https://youtu.be/abc"})),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "400 INVALID_ARGUMENT. Video is private");
}

#[tokio::test]
async fn test_summarize_leaves_user_store_untouched() {
    let (state, app) = setup_app(FakeGenerator::replying("ok"));

    send(&app, json_request("/api/register", credentials("alice", "pw1"))).await;
    send(
        &app,
        json_request("/api/summarize", json!({"url": "https://youtu.be/abc"})),
    )
    .await;

    assert_eq!(state.users.len(), 1);
    let (status, _) = send(&app, json_request("/api/login", credentials("alice", "pw1"))).await;
    assert_eq!(status, StatusCode::OK);
}

// =============================================================================
// Ask
// =============================================================================

#[tokio::test]
async fn test_ask_success() {
    let generator = FakeGenerator::replying("Paris");
    let (_, app) = setup_app(generator.clone());

    let (status, body) = send(
        &app,
        json_request("/api/ask", json!({"prompt": "Capital of France?"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["response"], "Paris");
    assert_eq!(
        generator.last_payload()["contents"][0]["parts"],
        json!([{"text": "Capital of France?"}])
    );
}

#[tokio::test]
async fn test_ask_requires_prompt() {
    let generator = FakeGenerator::replying("unused");
    let (_, app) = setup_app(generator.clone());

    let (status, _) = send(&app, json_request("/api/ask", json!({}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(generator.calls(), 0);
}

#[tokio::test]
async fn test_unknown_route() {
    let app = setup_degraded_app();

    let response = app.oneshot(get_request("/api/nope")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
