//! Connection pool construction and migrations.

use crate::error::SetupError;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;

/// Pool sizing and timeouts.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Connection URL
    pub url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Minimum number of idle connections in the pool
    pub min_connections: u32,
    /// How long to wait for a connection before failing
    pub connect_timeout: Duration,
    /// Connections idle longer than this are closed
    pub idle_timeout: Duration,
}

impl PoolConfig {
    /// Defaults for `url`: 10 connections max, 1 min, 30 s acquire timeout,
    /// 10 min idle timeout.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
        }
    }
}

/// Build a bounded pool and open the first connection.
///
/// # Errors
///
/// Returns [`SetupError::Connect`] if the database is unreachable.
pub async fn connect(config: &PoolConfig) -> Result<PgPool, SetupError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.connect_timeout)
        .idle_timeout(Some(config.idle_timeout))
        .connect(&config.url)
        .await?;

    tracing::info!(
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        "Database pool ready"
    );
    Ok(pool)
}

/// Apply the embedded migrations.
///
/// # Errors
///
/// Returns [`SetupError::Migrate`] if a migration fails.
pub async fn migrate(pool: &PgPool) -> Result<(), SetupError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("Database migrations applied");
    Ok(())
}
