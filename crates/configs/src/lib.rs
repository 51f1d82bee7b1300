//! Layered configuration: built-in defaults overridden by `APP_*`
//! environment variables (nested keys separated by `__`, e.g.
//! `APP_SERVER__PORT=8080`, `APP_DATABASE__URL=postgres://...`).
//!
//! `.env` files are honored for local development via dotenvy.

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

#[cfg(feature = "db-postgres")]
use secrecy::SecretString;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[cfg(feature = "db-postgres")]
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Connection string; wrapped so it never ends up in logs.
    pub url: SecretString,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    #[cfg(feature = "db-postgres")]
    pub database: DatabaseConfig,
}

pub fn load() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    let config = Config::builder()
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 8080_i64)?
        .set_default("database.max_connections", 5_i64)?
        .add_source(Environment::with_prefix("APP").separator("__"))
        .build()?;
    config.try_deserialize()
}
