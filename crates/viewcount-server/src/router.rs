//! Router assembly for the view-counter HTTP API.
//!
//! [`build_router`] wires the `/api/views` resource with cookie, CORS, and
//! tracing middleware layers.

use axum::routing::get;
use axum::Router;
use tower_cookies::CookieManagerLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Builds the complete axum router.
///
/// Unsupported methods on `/api/views` hit the method-router fallback and
/// answer 405 with a plain-text body. CORS is permissive (the counter is
/// embedded in pages served from other origins). TraceLayer provides
/// request-level logging via tracing.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/views",
            get(handlers::views::current_views)
                .post(handlers::views::record_view)
                .fallback(handlers::views::method_not_allowed),
        )
        .layer(CookieManagerLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
