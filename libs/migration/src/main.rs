//! Schema management CLI.
//!
//! Reads `DATABASE_URL` (from the environment or a `.env` file).
//!
//! ```text
//! migration up        apply pending migrations
//! migration status    list applied and pending migrations
//! migration fresh     drop every table and re-apply all migrations (clears all products)
//! migration reset     roll back every migration
//! ```
use migration::Migrator;
use sea_orm_migration::cli;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    cli::run_cli(Migrator).await;
}
