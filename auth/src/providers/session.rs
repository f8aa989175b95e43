//! Session store trait.

use crate::error::Result;
use crate::state::SessionRecord;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Session storage keyed by token digest.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Persist a new session.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The store fails → `AuthError::DatabaseError`
    /// - The digest already exists → `AuthError::DatabaseError`
    async fn create_session(&self, session: &SessionRecord) -> Result<()>;

    /// Find a session by token digest, expired or not.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::DatabaseError` if the store fails.
    async fn find_session(&self, token_hash: &str) -> Result<Option<SessionRecord>>;

    /// Delete a session. Deleting an unknown digest is not an error.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::DatabaseError` if the store fails.
    async fn delete_session(&self, token_hash: &str) -> Result<()>;

    /// Delete every session expired at `now`; returns how many were removed.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::DatabaseError` if the store fails.
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64>;
}
