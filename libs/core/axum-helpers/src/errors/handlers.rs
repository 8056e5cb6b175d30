use axum::{http::StatusCode, response::Response};

use super::error_response;

/// Router fallback: JSON 404 for unknown routes.
pub async fn not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}
