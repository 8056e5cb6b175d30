use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use super::PostgresConfig;
use crate::common::{RetryConfig, retry, retry_with_backoff};

/// Connect using a PostgresConfig, failing on the first error.
pub async fn connect_from_config(config: PostgresConfig) -> Result<DatabaseConnection, DbErr> {
    connect_with_options(config.into_connect_options()).await
}

async fn connect_with_options(options: ConnectOptions) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(options).await?;
    info!("Successfully connected to PostgreSQL database");
    Ok(db)
}

/// Connect with exponential backoff. `None` uses [`RetryConfig::default`].
pub async fn connect_from_config_with_retry(
    config: PostgresConfig,
    retry_config: Option<RetryConfig>,
) -> Result<DatabaseConnection, DbErr> {
    let options = config.into_connect_options();
    let attempt = || connect_with_options(options.clone());

    match retry_config {
        Some(policy) => retry_with_backoff(attempt, policy).await,
        None => retry(attempt).await,
    }
}

/// Build a pool that opens connections on first use instead of at startup.
///
/// Only a malformed URL fails here; an unreachable server surfaces later as
/// an error on whichever query first needs a connection.
pub async fn connect_lazy(config: PostgresConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = config.into_connect_options();
    options.connect_lazy(true);
    let db = Database::connect(options).await?;
    warn!("Using a lazily connecting PostgreSQL pool");
    Ok(db)
}

/// Connect with retry, falling back to a lazy pool when the server is unreachable.
///
/// Returns the handle and whether the eager connection succeeded. The service
/// keeps running without a reachable database; requests that touch it fail
/// until it comes back.
pub async fn connect_or_lazy(
    config: PostgresConfig,
    retry_config: RetryConfig,
) -> Result<(DatabaseConnection, bool), DbErr> {
    match connect_from_config_with_retry(config.clone(), Some(retry_config)).await {
        Ok(db) => Ok((db, true)),
        Err(e) => {
            error!(error = %e, "Unable to connect to the database");
            let db = connect_lazy(config).await?;
            Ok((db, false))
        }
    }
}

/// Apply every pending migration of `M`.
pub async fn run_migrations<M: MigratorTrait>(
    db: &DatabaseConnection,
    app_name: &str,
) -> Result<(), DbErr> {
    info!("Running {} database migrations...", app_name);
    M::up(db, None).await?;
    info!("Migrations completed successfully for {}", app_name);
    Ok(())
}
