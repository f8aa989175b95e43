//! Mock session store for testing.

use crate::error::{AuthError, Result};
use crate::providers::SessionStore;
use crate::state::SessionRecord;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex};

/// Mock session store.
///
/// Uses in-memory storage for testing. Lookups compare digests in constant
/// time, like a real index would not leak timing.
#[derive(Debug, Clone, Default)]
pub struct MockSessionStore {
    sessions: Arc<Mutex<Vec<SessionRecord>>>,
}

impl MockSessionStore {
    /// Create a new mock session store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get count of stored sessions (for testing).
    ///
    /// # Errors
    ///
    /// Returns error if lock is poisoned.
    pub fn session_count(&self) -> Result<usize> {
        Ok(self.lock()?.len())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<SessionRecord>>> {
        self.sessions
            .lock()
            .map_err(|_| AuthError::InternalError("Mutex lock failed".to_string()))
    }
}

fn digest_matches(record: &SessionRecord, token_hash: &str) -> bool {
    constant_time_eq::constant_time_eq(record.token_hash.as_bytes(), token_hash.as_bytes())
}

#[async_trait]
impl SessionStore for MockSessionStore {
    async fn create_session(&self, session: &SessionRecord) -> Result<()> {
        let mut sessions = self.lock()?;
        if sessions.iter().any(|s| digest_matches(s, &session.token_hash)) {
            return Err(AuthError::DatabaseError("Session already exists".to_string()));
        }
        sessions.push(session.clone());
        Ok(())
    }

    async fn find_session(&self, token_hash: &str) -> Result<Option<SessionRecord>> {
        Ok(self
            .lock()?
            .iter()
            .find(|s| digest_matches(s, token_hash))
            .cloned())
    }

    async fn delete_session(&self, token_hash: &str) -> Result<()> {
        self.lock()?.retain(|s| !digest_matches(s, token_hash));
        Ok(())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64> {
        let mut sessions = self.lock()?;
        let before = sessions.len();
        sessions.retain(|s| !s.is_expired(now));
        Ok((before - sessions.len()) as u64)
    }
}
