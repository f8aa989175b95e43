//! Admin account repository trait.

use crate::error::Result;
use crate::state::{AdminId, AdminRecord};
use async_trait::async_trait;

/// Admin account storage.
#[async_trait]
pub trait AdminRepository: Send + Sync {
    /// Look up an admin by exact email.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::DatabaseError` if the store fails.
    async fn find_admin_by_email(&self, email: &str) -> Result<Option<AdminRecord>>;

    /// Create an admin, or replace the password hash of an existing one.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::DatabaseError` if the store fails.
    async fn upsert_admin(&self, email: &str, password_hash: &str) -> Result<AdminId>;
}
