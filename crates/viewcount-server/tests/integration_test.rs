//! End-to-end integration tests for the view-counter HTTP API.
//!
//! Tests exercise the full stack: HTTP request -> axum router -> handler ->
//! gate + CounterService -> storage -> HTTP response.
//!
//! Each test creates a fresh AppState backed by an in-memory store seeded
//! with 823. Tests use `tower::ServiceExt::oneshot` to send requests
//! directly to the router without starting a network server; a
//! `MockConnectInfo` layer supplies the peer address, and per-request
//! client IPs are simulated with `X-Forwarded-For`.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::extract::connect_info::MockConnectInfo;
use axum::http::{header, HeaderMap, Request, StatusCode};
use axum::Router;
use serde_json::json;
use tower::ServiceExt;

use viewcount_server::gate::CookieGate;
use viewcount_server::router::build_router;
use viewcount_server::state::AppState;

// ---------------------------------------------------------------------------
// Test helpers
// ---------------------------------------------------------------------------

const SEED: u64 = 823;

/// Creates a fresh router with an in-memory store and the IP gate.
fn test_app() -> Router {
    with_mock_peer(build_router(AppState::in_memory(SEED)))
}

/// Creates a fresh router with an in-memory store and the cookie gate.
fn cookie_app() -> Router {
    let state = AppState::in_memory(SEED)
        .with_gate(Arc::new(CookieGate::new(Duration::from_secs(3600))));
    with_mock_peer(build_router(state))
}

/// Creates a fresh router with no usable backend.
fn unavailable_app(reason: &str) -> Router {
    with_mock_peer(build_router(AppState::unavailable(reason)))
}

fn with_mock_peer(app: Router) -> Router {
    app.layer(MockConnectInfo(SocketAddr::from(([127, 0, 0, 1], 40000))))
}

/// Sends a GET request and returns (status, json).
async fn get_json(app: &Router, path: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value =
        serde_json::from_slice(&body_bytes).unwrap_or(json!(null));
    (status, json)
}

/// Sends `POST /api/views` as `ip`, optionally with a `Cookie` header, and
/// returns (status, json, response headers).
async fn post_views(
    app: &Router,
    ip: &str,
    cookie: Option<&str>,
) -> (StatusCode, serde_json::Value, HeaderMap) {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/views")
        .header("x-forwarded-for", ip);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let response = app
        .clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value =
        serde_json::from_slice(&body_bytes).unwrap_or(json!(null));
    (status, json, headers)
}

// ---------------------------------------------------------------------------
// GET /api/views
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_get_returns_seeded_count() {
    let app = test_app();
    let (status, body) = get_json(&app, "/api/views").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "views": 823 }));
}

#[tokio::test]
async fn test_get_does_not_record_a_visit() {
    let app = test_app();
    for _ in 0..3 {
        let (status, body) = get_json(&app, "/api/views").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["views"], 823);
    }
}

#[tokio::test]
async fn test_unknown_path_is_404() {
    let app = test_app();
    let (status, _) = get_json(&app, "/api/view").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// POST /api/views, IP gate
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_post_new_visitor_increments() {
    let app = test_app();
    let (status, body, _) = post_views(&app, "203.0.113.9", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "views": 824, "isNewVisit": true }));

    let (_, body) = get_json(&app, "/api/views").await;
    assert_eq!(body["views"], 824);
}

#[tokio::test]
async fn test_post_repeat_ip_does_not_increment() {
    let app = test_app();
    let (_, first, _) = post_views(&app, "203.0.113.9", None).await;
    assert_eq!(first, json!({ "views": 824, "isNewVisit": true }));

    let (status, second, _) = post_views(&app, "203.0.113.9", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second, json!({ "views": 824, "isNewVisit": false }));
}

#[tokio::test]
async fn test_post_distinct_ips_each_count() {
    let app = test_app();
    let (_, first, _) = post_views(&app, "203.0.113.9", None).await;
    let (_, second, _) = post_views(&app, "203.0.113.10", None).await;
    assert_eq!(first["views"], 824);
    assert_eq!(second["views"], 825);
    assert_eq!(second["isNewVisit"], true);
}

#[tokio::test]
async fn test_ip_gate_sets_no_cookie() {
    let app = test_app();
    let (_, _, headers) = post_views(&app, "203.0.113.9", None).await;
    assert!(headers.get(header::SET_COOKIE).is_none());
}

// ---------------------------------------------------------------------------
// POST /api/views, cookie gate
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_cookie_gate_first_visit_sets_marker() {
    let app = cookie_app();
    let (status, body, headers) = post_views(&app, "203.0.113.9", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "views": 824, "isNewVisit": true }));

    let set_cookie = headers
        .get(header::SET_COOKIE)
        .expect("marker cookie set")
        .to_str()
        .unwrap();
    assert!(set_cookie.contains("viewed=true"), "{}", set_cookie);
    assert!(set_cookie.contains("Path=/"), "{}", set_cookie);
    assert!(set_cookie.contains("Max-Age=3600"), "{}", set_cookie);
    assert!(set_cookie.contains("SameSite=Lax"), "{}", set_cookie);
}

#[tokio::test]
async fn test_cookie_gate_marked_visitor_not_counted() {
    let app = cookie_app();
    let (_, first, _) = post_views(&app, "203.0.113.9", None).await;
    assert_eq!(first["views"], 824);

    let (status, second, headers) =
        post_views(&app, "203.0.113.9", Some("viewed=true")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second, json!({ "views": 824, "isNewVisit": false }));
    assert!(headers.get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn test_cookie_gate_ignores_client_ip() {
    // Same browser (cookie), different network: not a new visit.
    let app = cookie_app();
    post_views(&app, "203.0.113.9", None).await;
    let (_, body, _) = post_views(&app, "198.51.100.7", Some("viewed=true")).await;
    assert_eq!(body["isNewVisit"], false);

    // Different browser (no cookie), same IP: counts again.
    let (_, body, _) = post_views(&app, "203.0.113.9", None).await;
    assert_eq!(body["isNewVisit"], true);
    assert_eq!(body["views"], 826);
}

// ---------------------------------------------------------------------------
// Unsupported methods
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_unsupported_methods_get_405_plain_text() {
    let app = test_app();
    for method in ["PUT", "DELETE", "PATCH"] {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri("/api/views")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(
            response.status(),
            StatusCode::METHOD_NOT_ALLOWED,
            "method {}",
            method
        );
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body_bytes[..], b"Method not allowed");
    }
}

// ---------------------------------------------------------------------------
// Unconfigured backend
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_get_with_unavailable_store_is_500() {
    let app = unavailable_app("unknown VIEWCOUNT_BACKEND 'redis', expected file/sqlite/memory");
    let (status, body) = get_json(&app, "/api/views").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body["error"],
        "unknown VIEWCOUNT_BACKEND 'redis', expected file/sqlite/memory"
    );
}

#[tokio::test]
async fn test_post_with_unavailable_store_is_500() {
    let app = unavailable_app("store offline");
    let (status, body, _) = post_views(&app, "203.0.113.9", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "store offline");
}

// ---------------------------------------------------------------------------
// Persistence across router instances (file backend)
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_count_survives_restart_with_file_backend() {
    use viewcount_server::config::{BackendConfig, GateConfig, ServerConfig};

    let dir = tempfile::TempDir::new().unwrap();
    let path = dir
        .path()
        .join("views-data.json")
        .to_str()
        .unwrap()
        .to_string();
    let config = ServerConfig {
        port: 0,
        backend: BackendConfig::File { path },
        gate: GateConfig::IpSet,
        seed: SEED,
    };

    {
        let app = with_mock_peer(build_router(AppState::from_config(&config)));
        let (_, body, _) = post_views(&app, "203.0.113.9", None).await;
        assert_eq!(body["views"], 824);
    }

    // A fresh state over the same file sees the persisted count, and the
    // fresh IP set means the same visitor counts again.
    let app = with_mock_peer(build_router(AppState::from_config(&config)));
    let (_, body) = get_json(&app, "/api/views").await;
    assert_eq!(body["views"], 824);

    let (_, body, _) = post_views(&app, "203.0.113.9", None).await;
    assert_eq!(body, json!({ "views": 825, "isNewVisit": true }));
}
