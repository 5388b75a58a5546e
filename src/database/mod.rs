pub mod admin_store;
pub mod models;
pub mod schema;
pub mod scheme_store;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use thiserror::Error;

use crate::config::DatabaseConfig;

pub use admin_store::AdminStore;
pub use scheme_store::SchemeStore;

/// Errors surfaced by the stores.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Duplicate(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Connect a pool from config. Called once at startup; the pool is the only
/// shared handle between requests.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .connect(&config.url)
        .await
}

/// Pings the pool to ensure connectivity.
pub async fn health_check(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
