//! Database adapters: connection pool and schema setup.

use std::time::Duration;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::store::StoreError;

const SCHEMA: &str = include_str!("../migrations/0001_create_pantry_items.sql");

/// Open a connection pool; fails fast when the database is unreachable.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<PgPool, StoreError> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
        .map_err(|source| StoreError::Database {
            operation: "connect",
            source,
        })
}

/// Apply the schema. Idempotent; safe to run on every startup.
pub async fn migrate(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::raw_sql(SCHEMA)
        .execute(pool)
        .await
        .map_err(|source| StoreError::Database {
            operation: "migrate",
            source,
        })?;
    tracing::info!("database schema is up to date");
    Ok(())
}
