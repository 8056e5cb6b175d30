pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::validation::FieldError;

/// Body message for every 5xx caused by an unexpected failure.
pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";

/// Error body with a single message.
///
/// ```json
/// { "error": "Product not found" }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Error body listing every rule violation of a rejected request.
///
/// ```json
/// { "errors": [{ "type": "field", "msg": "Name is required", "path": "name", "location": "body" }] }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ValidationErrorResponse {
    pub errors: Vec<FieldError>,
}

/// Application error type that can be converted to HTTP responses.
///
/// Internal details (database errors, messages of `InternalServerError`) are
/// logged and never sent to the client.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("Validation failed with {} error(s)", .0.len())]
    Validation(Vec<FieldError>),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),

    #[error("Service Unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) | AppError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation(_) => ErrorCode::ValidationError,
            AppError::BadRequest(_) => ErrorCode::InvalidJson,
            AppError::NotFound(_) => ErrorCode::NotFound,
            AppError::Database(_) => ErrorCode::DatabaseError,
            AppError::InternalServerError(_) => ErrorCode::InternalError,
            AppError::ServiceUnavailable(_) => ErrorCode::ServiceUnavailable,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code().code();

        match self {
            AppError::Validation(errors) => {
                tracing::info!(error_code = code, count = errors.len(), "Validation error: {:?}", errors);
                (status, Json(ValidationErrorResponse { errors })).into_response()
            }
            AppError::BadRequest(msg) => {
                tracing::info!(error_code = code, "Bad request: {}", msg);
                error_response(status, msg)
            }
            AppError::NotFound(msg) => {
                tracing::info!(error_code = code, "Not found: {}", msg);
                error_response(status, msg)
            }
            AppError::Database(e) => {
                tracing::error!(error_code = code, "Database error: {:?}", e);
                error_response(status, INTERNAL_SERVER_ERROR)
            }
            AppError::InternalServerError(msg) => {
                tracing::error!(error_code = code, "Internal server error: {}", msg);
                error_response(status, INTERNAL_SERVER_ERROR)
            }
            AppError::ServiceUnavailable(msg) => {
                tracing::warn!(error_code = code, "Service unavailable: {}", msg);
                error_response(status, msg)
            }
        }
    }
}

/// `{ "error": message }` with the given status.
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    let body = Json(ErrorResponse {
        error: message.into(),
    });

    (status, body).into_response()
}
