//! Authentication configuration.

use crate::constants::{BCRYPT_COST, DEFAULT_SESSION_TTL_SECS};
use chrono::Duration;

/// Admin authentication settings.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// How long an issued session token stays valid.
    ///
    /// Default: 7 days
    pub session_ttl: Duration,

    /// bcrypt cost used when hashing new passwords.
    ///
    /// Default: 10
    pub bcrypt_cost: u32,
}

impl AuthConfig {
    /// Set session lifetime.
    #[must_use]
    pub const fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = ttl;
        self
    }

    /// Set bcrypt cost.
    #[must_use]
    pub const fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_ttl: Duration::seconds(DEFAULT_SESSION_TTL_SECS),
            bcrypt_cost: BCRYPT_COST,
        }
    }
}
