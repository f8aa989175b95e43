//! Error types for admin authentication.

use thiserror::Error;

/// Result type alias for authentication operations.
pub type Result<T> = std::result::Result<T, AuthError>;

/// Failure modes of the auth gate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    // ═══════════════════════════════════════════════════════════
    // Login
    // ═══════════════════════════════════════════════════════════

    /// Email or password missing from the login request.
    #[error("Missing credentials")]
    MissingCredentials,

    /// Unknown email or wrong password. Deliberately the same error for both.
    #[error("Invalid credentials")]
    InvalidCredentials,

    // ═══════════════════════════════════════════════════════════
    // Sessions
    // ═══════════════════════════════════════════════════════════

    /// No `Authorization: Bearer` header was presented.
    #[error("Missing authorization")]
    MissingToken,

    /// The presented token is not a well-formed session token.
    #[error("Invalid token")]
    MalformedToken,

    /// No session matches the presented token.
    #[error("Invalid token")]
    SessionNotFound,

    /// The session matched but has expired.
    #[error("Session has expired")]
    SessionExpired,

    // ═══════════════════════════════════════════════════════════
    // System Errors
    // ═══════════════════════════════════════════════════════════

    /// Hashing or verifying a password failed.
    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    /// Database operation failed.
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Internal error (should not be exposed to users).
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl AuthError {
    /// Returns `true` if the caller is simply not authenticated.
    ///
    /// # Examples
    ///
    /// ```
    /// # use party_rsvp_auth::AuthError;
    /// assert!(AuthError::SessionExpired.is_unauthorized());
    /// assert!(!AuthError::MissingCredentials.is_unauthorized());
    /// assert!(!AuthError::DatabaseError("down".into()).is_unauthorized());
    /// ```
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials
                | Self::MissingToken
                | Self::MalformedToken
                | Self::SessionNotFound
                | Self::SessionExpired
        )
    }

    /// Returns `true` for failures of the system rather than the caller.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::PasswordHash(_) | Self::DatabaseError(_) | Self::InternalError(_)
        )
    }
}
