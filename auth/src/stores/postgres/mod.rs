//! `PostgreSQL` admin and session stores.
//!
//! Both tables are created by the `party-rsvp-postgres` migrations.
//!
//! # Example
//!
//! ```no_run
//! use party_rsvp_auth::stores::postgres::{PostgresAdminRepository, PostgresSessionStore};
//! use sqlx::PgPool;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = PgPool::connect("postgresql://localhost/party_rsvp").await?;
//! let admins = PostgresAdminRepository::new(pool.clone());
//! let sessions = PostgresSessionStore::new(pool);
//! # Ok(())
//! # }
//! ```

pub mod admin;
pub mod session;

// Re-exports
pub use admin::PostgresAdminRepository;
pub use session::PostgresSessionStore;

use crate::error::AuthError;

pub(crate) fn db_error(context: &str, error: &sqlx::Error) -> AuthError {
    tracing::error!(error = %error, "{context}");
    AuthError::DatabaseError(format!("{context}: {error}"))
}
