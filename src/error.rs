//! Error responses for the HTTP surface.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// API error types. Every variant is a 500; the upstream cause has already
/// been logged by the cache layer.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Failed to fetch data")]
    DataUnavailable,

    #[error("{0}")]
    RefreshFailed(String),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.to_string(),
        };

        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
