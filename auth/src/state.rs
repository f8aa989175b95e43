//! Authentication state types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ═══════════════════════════════════════════════════════════════════════
// ID Types
// ═══════════════════════════════════════════════════════════════════════

/// Store id of an admin account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdminId(pub i64);

impl fmt::Display for AdminId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Records
// ═══════════════════════════════════════════════════════════════════════

/// An admin account as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminRecord {
    /// Store id
    pub id: AdminId,
    /// Login email (unique)
    pub email: String,
    /// bcrypt hash
    pub password_hash: String,
}

/// A stored session. The token itself is never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    /// SHA-256 hex digest of the token
    pub token_hash: String,
    /// Owning admin
    pub admin_id: AdminId,
    /// Issue time
    pub created_at: DateTime<Utc>,
    /// The session is rejected at or after this instant
    pub expires_at: DateTime<Utc>,
}

impl SessionRecord {
    /// `true` once `now` has reached `expires_at`.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Results
// ═══════════════════════════════════════════════════════════════════════

/// A freshly issued session, returned once at login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssuedSession {
    /// Bearer token to present on admin requests
    pub token: String,
    /// Expiry instant
    pub expires_at: DateTime<Utc>,
}

/// Identity yielded by a valid token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminIdentity {
    /// Authenticated admin
    pub admin_id: AdminId,
}
