//! API error types and JSON error response formatting.
//!
//! Transport-level failures only: missing request fields map to 400,
//! unknown routes to 404, unexpected failures to 500. Business failures
//! (unknown order, locked status) never reach this type — they travel as
//! `success: false` payloads inside 200 responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// JSON error response body: `{"error": "..."}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// API error type mapping to HTTP status codes.
#[derive(Debug)]
pub enum ApiError {
    /// 400 Bad Request - missing or invalid request fields.
    BadRequest(String),
    /// 404 Not Found - no such route.
    NotFound,
    /// 500 Internal Server Error - unexpected failure.
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound => (StatusCode::NOT_FOUND, "Not found".to_string()),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
