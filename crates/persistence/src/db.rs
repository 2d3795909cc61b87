//! Database connection pool management.

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use std::time::Duration;

/// Database configuration.
///
/// `user`, `password` and `host` are optional: with all three unset the
/// driver connects to the local server as the current OS user.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub dbname: String,
    pub user: Option<String>,
    pub password: Option<String>,
    pub host: Option<String>,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
    pub idle_timeout_secs: u64,
}

impl DatabaseConfig {
    /// Builds driver-level connection options from this configuration.
    pub fn connect_options(&self) -> PgConnectOptions {
        let mut options = PgConnectOptions::new().database(&self.dbname);
        if let Some(host) = &self.host {
            options = options.host(host);
        }
        if let Some(user) = &self.user {
            options = options.username(user);
        }
        if let Some(password) = &self.password {
            options = options.password(password);
        }
        options
    }
}

/// Creates a PostgreSQL connection pool with the given configuration.
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .connect_with(config.connect_options())
        .await
}
