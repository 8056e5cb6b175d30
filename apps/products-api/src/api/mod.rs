//! API routes module

pub mod health;
pub mod products;

use axum::{Json, Router, routing::get};
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct WelcomeResponse {
    #[schema(example = "Welcome to the API")]
    pub message: &'static str,
}

/// Create all API routes (nested under `/api` by `create_router`)
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .route("/", get(welcome))
        .nest("/products", products::router(state))
}

/// Readiness endpoint, merged outside the `/api` prefix.
pub fn ready_router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}

/// Welcome message; does not touch the database
#[utoipa::path(
    get,
    path = "/api",
    tag = "General",
    responses(
        (status = 200, description = "Service is up", body = WelcomeResponse)
    )
)]
pub async fn welcome() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: "Welcome to the API",
    })
}
