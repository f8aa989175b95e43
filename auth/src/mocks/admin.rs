//! Mock admin repository for testing.

use crate::error::{AuthError, Result};
use crate::providers::AdminRepository;
use crate::state::{AdminId, AdminRecord};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock admin repository.
///
/// Uses in-memory storage for testing.
#[derive(Debug, Clone, Default)]
pub struct MockAdminRepository {
    admins: Arc<Mutex<HashMap<String, AdminRecord>>>,
}

impl MockAdminRepository {
    /// Create a new mock admin repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get count of stored admins (for testing).
    ///
    /// # Errors
    ///
    /// Returns error if lock is poisoned.
    pub fn admin_count(&self) -> Result<usize> {
        Ok(self
            .admins
            .lock()
            .map_err(|_| AuthError::InternalError("Mutex lock failed".to_string()))?
            .len())
    }
}

#[async_trait]
impl AdminRepository for MockAdminRepository {
    async fn find_admin_by_email(&self, email: &str) -> Result<Option<AdminRecord>> {
        Ok(self
            .admins
            .lock()
            .map_err(|_| AuthError::InternalError("Mutex lock failed".to_string()))?
            .get(email)
            .cloned())
    }

    async fn upsert_admin(&self, email: &str, password_hash: &str) -> Result<AdminId> {
        let mut admins = self
            .admins
            .lock()
            .map_err(|_| AuthError::InternalError("Mutex lock failed".to_string()))?;

        let next_id = AdminId(i64::try_from(admins.len()).unwrap_or(i64::MAX) + 1);
        let record = admins
            .entry(email.to_string())
            .or_insert_with(|| AdminRecord {
                id: next_id,
                email: email.to_string(),
                password_hash: String::new(),
            });
        record.password_hash = password_hash.to_string();
        Ok(record.id)
    }
}
