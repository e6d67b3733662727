//! API error types with HTTP status code mapping.
//!
//! [`ApiError`] implements `axum::response::IntoResponse` to produce the
//! wire format clients rely on: a JSON object with a single `error` field.
//! Storage-level failures never surface here; the service layer degrades
//! them to a zero count instead. The only API error is a server that was
//! started without a usable backend.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// API errors with HTTP status code mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No usable storage backend was configured (500).
    #[error("store not configured: {0}")]
    StoreUnavailable(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::StoreUnavailable(reason) => {
                (StatusCode::INTERNAL_SERVER_ERROR, reason.clone())
            }
        };

        let body = serde_json::json!({ "error": message });

        (status, axum::Json(body)).into_response()
    }
}
