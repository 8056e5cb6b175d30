//! Configuration for Products API

use core_config::{AppInfo, ConfigError, FromEnv, app_info, env_list, env_or_default, server::ServerConfig};
use database::postgres::PostgresConfig;
use std::path::PathBuf;

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: PostgresConfig,
    /// Origins allowed by CORS (`FRONTEND_URL`, comma separated)
    pub frontend_urls: Vec<String>,
    /// Directory served under `/assets` (`ASSETS_DIR`, default `assets`)
    pub assets_dir: PathBuf,
}

impl Config {
    /// Values from a `.env` file never override variables already set.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            app: app_info!(),
            environment: Environment::from_env(),
            server: ServerConfig::from_env()?,
            database: PostgresConfig::from_env()?,
            frontend_urls: env_list("FRONTEND_URL"),
            assets_dir: PathBuf::from(env_or_default("ASSETS_DIR", "assets")),
        })
    }
}
