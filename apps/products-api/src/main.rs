//! Products API - REST server over PostgreSQL

use axum::Router;
use axum_helpers::{close_postgres, create_cors_layer, create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::RetryConfig;
use database::postgres::{connect_or_lazy, run_migrations};
use migration::Migrator;
use std::time::Duration;
use tower_http::services::ServeDir;
use tracing::{error, info};

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    let config = Config::load()?;
    init_tracing(&config.environment);

    // An unreachable database is not fatal: the service starts with a lazy
    // pool and `/ready` reports 503 until the server comes back.
    let (db, connected) = connect_or_lazy(config.database.clone(), RetryConfig::startup()).await?;

    if connected {
        if let Err(e) = run_migrations::<Migrator>(&db, config.app.name).await {
            error!(error = %e, "Database migrations failed");
        }
    }

    let state = AppState { db };
    let app = build_app(&state, &config)?;

    info!(
        "Starting {} v{} on port {}",
        config.app.name, config.app.version, config.server.port
    );

    create_production_app(app, &config.server, Duration::from_secs(30), async move {
        info!("Shutting down: closing database connections");
        close_postgres(state.db, "products").await;
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Products API shutdown complete");
    Ok(())
}

/// Full application router.
///
/// - `/api`, `/api/products/...` with docs at `/docs` and `/redoc`
/// - `/health` (liveness) and `/ready` (database ping)
/// - static files under `/assets`
fn build_app(state: &AppState, config: &Config) -> eyre::Result<Router> {
    let cors = create_cors_layer(&config.frontend_urls)?;
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api::routes(state), cors);

    Ok(router
        .merge(health_router(config.app))
        .merge(api::ready_router(state.clone()))
        .nest_service("/assets", ServeDir::new(&config.assets_dir)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use core_config::{Environment, app_info, server::ServerConfig};
    use database::postgres::PostgresConfig;
    use http_body_util::BodyExt;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase};
    use serde_json::{Value, json};
    use std::path::PathBuf;
    use tower::ServiceExt;

    fn test_config(assets_dir: PathBuf) -> Config {
        Config {
            app: app_info!(),
            environment: Environment::Development,
            server: ServerConfig::default(),
            database: PostgresConfig::new("postgres://localhost/products"),
            frontend_urls: vec!["http://localhost:3000".to_string()],
            assets_dir,
        }
    }

    /// App over a database whose every query fails.
    fn unreachable_db_app(assets_dir: PathBuf) -> Router {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection refused".to_string())])
            .into_connection();
        build_app(&AppState { db }, &test_config(assets_dir)).unwrap()
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, bytes.to_vec())
    }

    #[tokio::test]
    async fn test_welcome_does_not_need_the_database() {
        let (status, body) = get(unreachable_db_app(PathBuf::from("assets")), "/api").await;
        assert_eq!(status, StatusCode::OK);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body, json!({ "message": "Welcome to the API" }));
    }

    #[tokio::test]
    async fn test_ready_reports_unreachable_database() {
        let (status, body) = get(unreachable_db_app(PathBuf::from("assets")), "/ready").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body, json!({ "status": "not ready", "database": "disconnected" }));
    }

    #[tokio::test]
    async fn test_products_fail_with_500_while_database_is_down() {
        let (status, body) = get(unreachable_db_app(PathBuf::from("assets")), "/api/products").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body, json!({ "error": "Internal server error" }));
    }

    #[tokio::test]
    async fn test_health_reports_app_info() {
        let (status, body) = get(unreachable_db_app(PathBuf::from("assets")), "/health").await;
        assert_eq!(status, StatusCode::OK);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["name"], "products_api");
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let (status, body) = get(unreachable_db_app(PathBuf::from("assets")), "/api/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body, json!({ "error": "Not found" }));
    }

    #[tokio::test]
    async fn test_openapi_document_is_served() {
        let (status, body) =
            get(unreachable_db_app(PathBuf::from("assets")), axum_helpers::OPENAPI_JSON_PATH).await;
        assert_eq!(status, StatusCode::OK);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["info"]["title"], "Products REST API");
    }

    #[tokio::test]
    async fn test_assets_are_served() {
        let dir = std::env::temp_dir().join(format!("products-assets-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("hello.txt"), "hello").unwrap();

        let (status, body) = get(unreachable_db_app(dir.clone()), "/assets/hello.txt").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"hello");

        std::fs::remove_dir_all(dir).unwrap();
    }
}
