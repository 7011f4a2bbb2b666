//! Persistence layer for proxy clients.
//!
//! Owns the PostgreSQL pool, the row model, and the repository seam the
//! use-case layer talks to.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

pub mod error;
pub mod models;
pub mod repositories;

pub type DbPool = sqlx::PgPool;

/// Upper bound on open connections.
pub const MAX_CONNECTIONS: u32 = 60;

/// Connections are recycled after this long regardless of activity.
pub const CONNECTION_MAX_LIFETIME: Duration = Duration::from_secs(120);

/// Idle connections above the minimum are closed after this long.
pub const CONNECTION_IDLE_TIMEOUT: Duration = Duration::from_secs(20);

/// Create a connection pool from a database URL.
///
/// Connects eagerly, so an unreachable database fails here rather than on the
/// first request.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    tracing::debug!(
        max_connections = MAX_CONNECTIONS,
        max_lifetime_secs = CONNECTION_MAX_LIFETIME.as_secs(),
        idle_timeout_secs = CONNECTION_IDLE_TIMEOUT.as_secs(),
        "Configuring database pool"
    );
    PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .min_connections(0)
        .max_lifetime(CONNECTION_MAX_LIFETIME)
        .idle_timeout(CONNECTION_IDLE_TIMEOUT)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to confirm the pool can reach the database.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
