//! Command-error to HTTP response mapping
//!
//! Commands report failures as human-readable strings; the HTTP layer is
//! where those become status codes. Missing entities map to 404, upstream AI
//! failures to 502, everything else to 400.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    /// Classify a command-layer error string.
    /// AI client errors all start with "AI "; not-found errors all carry the
    /// phrase "not found".
    pub fn from_command(message: String) -> Self {
        let status = if message.contains("not found") {
            StatusCode::NOT_FOUND
        } else if message.starts_with("AI ") {
            StatusCode::BAD_GATEWAY
        } else {
            StatusCode::BAD_REQUEST
        };
        Self { status, message }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}
