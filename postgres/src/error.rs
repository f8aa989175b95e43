//! Mapping of `sqlx` failures onto the core error taxonomy.

use party_rsvp_core::RsvpError;
use thiserror::Error;

/// Failures while preparing the store at startup.
#[derive(Debug, Error)]
pub enum SetupError {
    /// The pool could not be built or the first connection failed.
    #[error("failed to connect to database: {0}")]
    Connect(#[from] sqlx::Error),

    /// Applying migrations failed.
    #[error("migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

/// Convert a store error into [`RsvpError::Persistence`], logging the source.
///
/// The source is only logged; callers see a generic failure.
pub(crate) fn store_error(operation: &'static str, error: &sqlx::Error) -> RsvpError {
    tracing::error!(operation, error = %error, "Store operation failed");
    metrics::counter!("party_rsvp_store_errors_total", "operation" => operation).increment(1);
    RsvpError::persistence(format!("{operation}: {error}"))
}

/// `true` if `error` is a foreign key violation.
pub(crate) fn is_foreign_key_violation(error: &sqlx::Error) -> bool {
    matches!(error, sqlx::Error::Database(db) if db.is_foreign_key_violation())
}

/// Count column to `u64`; negative counts cannot happen.
pub(crate) fn count(n: i64) -> u64 {
    u64::try_from(n).unwrap_or_default()
}
