//! Handlers for the `/api/views` resource.

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use tower_cookies::Cookies;

use crate::error::ApiError;
use crate::gate::VisitContext;
use crate::schema::views::{RecordVisitResponse, ViewsResponse};
use crate::state::{AppState, CounterHandle};

/// GET /api/views -- current count without recording a visit.
pub async fn current_views(
    State(state): State<AppState>,
) -> Result<Json<ViewsResponse>, ApiError> {
    let service = match &state.counter {
        CounterHandle::Ready(service) => service,
        CounterHandle::Unavailable(reason) => {
            return Err(ApiError::StoreUnavailable(reason.clone()))
        }
    };

    let views = service.lock().await.current();
    Ok(Json(ViewsResponse { views }))
}

/// POST /api/views -- record a visit and return the updated count.
///
/// The gate decides whether this visitor counts; returning visitors get
/// the current count unchanged with `isNewVisit: false`.
pub async fn record_view(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    cookies: Cookies,
) -> Result<Json<RecordVisitResponse>, ApiError> {
    let service = match &state.counter {
        CounterHandle::Ready(service) => service,
        CounterHandle::Unavailable(reason) => {
            return Err(ApiError::StoreUnavailable(reason.clone()))
        }
    };

    let client_ip = client_ip(&headers, peer);
    let is_new_visit = state.gate.observe(&VisitContext {
        client_ip: &client_ip,
        cookies: &cookies,
    });

    let mut service = service.lock().await;
    let views = if is_new_visit {
        let views = service.increment();
        tracing::info!("new visit from {}, total views: {}", client_ip, views);
        views
    } else {
        let views = service.current();
        tracing::debug!("returning visitor {}, total views: {}", client_ip, views);
        views
    };

    Ok(Json(RecordVisitResponse {
        views,
        is_new_visit,
    }))
}

/// Fallback for unsupported methods on /api/views (405, plain text).
pub async fn method_not_allowed() -> (StatusCode, &'static str) {
    (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}

/// Best-effort client IP: the first `X-Forwarded-For` entry when present
/// (the server is expected to sit behind a reverse proxy), otherwise the
/// peer address.
fn client_ip(headers: &HeaderMap, peer: SocketAddr) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|ip| ip.trim().to_string())
        .filter(|ip| !ip.is_empty())
        .unwrap_or_else(|| peer.ip().to_string())
}
