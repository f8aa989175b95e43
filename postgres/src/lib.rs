//! `PostgreSQL` store for the party RSVP collector.
//!
//! [`PostgresStore`] implements every repository trait of
//! `party-rsvp-core` over one `sqlx` connection pool:
//!
//! - RSVP writes run in a single transaction (parent row, then every child)
//! - invite imports use `ON CONFLICT (invite_key) DO NOTHING`
//! - food totals come from a `LEFT JOIN`, so unused choices count zero
//!
//! All queries are built at runtime; no database is needed to compile.
//!
//! # Example
//!
//! ```no_run
//! use party_rsvp_postgres::{PoolConfig, PostgresStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = party_rsvp_postgres::connect(&PoolConfig::new("postgres://localhost/party_rsvp")).await?;
//! party_rsvp_postgres::migrate(&pool).await?;
//! let store = PostgresStore::new(pool);
//! # Ok(())
//! # }
//! ```

mod aggregate;
mod error;
mod event;
mod food;
mod invite;
mod pool;
mod rows;
mod rsvp;

pub use error::SetupError;
pub use pool::{PoolConfig, connect, migrate};

use sqlx::PgPool;

/// `PostgreSQL` implementation of the core repository traits.
#[derive(Clone, Debug)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Wrap an existing pool. Migrations must already have run.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}
