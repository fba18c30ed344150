//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use promptcoach_analytics::CtaNotifier;
use promptcoach_core::clock::Clock;
use promptcoach_event_store::InMemoryEventRepository;
use promptcoach_onboarding::application::session_service::SessionService;
use promptcoach_test_support::{FixedClock, RecordingCtaNotifier};
use tower::ServiceExt;

use promptcoach_api::routes;
use promptcoach_api::state::AppState;

/// Fixed timestamp used across all integration tests.
pub fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock(
        chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2026, 3, 1, 9, 30, 0).unwrap(),
    ))
}

/// Build the full app router with an in-memory event store, a fixed clock,
/// and the given notifier. Uses the same route structure as `main.rs`.
pub fn build_test_app_with_notifier(notifier: Arc<dyn CtaNotifier>) -> Router {
    let service = SessionService::new(
        fixed_clock(),
        Arc::new(InMemoryEventRepository::new()),
        notifier,
    );
    let app_state = AppState::new(service);

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/onboarding", routes::onboarding::router())
        .with_state(app_state)
}

/// Build the full app router with a recording notifier.
pub fn build_test_app() -> Router {
    build_test_app_with_notifier(Arc::new(RecordingCtaNotifier::new()))
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    send(app, request).await
}

/// Send a POST request with an empty body and return the response.
pub async fn post_empty(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

/// Send a DELETE request and return only the status code.
pub async fn delete(app: Router, uri: &str) -> StatusCode {
    let request = Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    response.status()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = if body_bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap()
    };

    (status, json)
}
