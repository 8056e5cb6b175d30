//! # Axum Helpers
//!
//! Building blocks shared by the HTTP services.
//!
//! ## Modules
//!
//! - **[`validation`]**: declarative per-field request rules and field errors
//! - **[`extractors`]**: [`ValidatedRequest`], which runs the rules before a handler
//! - **[`errors`]**: [`AppError`] and the JSON error bodies
//! - **[`server`]**: router assembly with API docs, health endpoints, graceful shutdown
//! - **[`http`]**: CORS and security-header middleware

pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;
pub mod validation;

pub use server::{
    HealthCheckFuture, HealthResponse, OPENAPI_JSON_PATH, ShutdownCoordinator, close_postgres,
    create_production_app, create_router, health_router, run_health_checks,
};

pub use http::{create_cors_layer, security_headers};

pub use errors::{AppError, ErrorCode, ErrorResponse, ValidationErrorResponse};

pub use extractors::ValidatedRequest;

pub use validation::{FieldError, Location, RequestRules, Validator};
