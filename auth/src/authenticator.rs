//! Admin login, token validation and logout.

use crate::config::AuthConfig;
use crate::error::{AuthError, Result};
use crate::password::{verify_dummy, verify_password};
use crate::providers::{AdminRepository, SessionStore};
use crate::state::{AdminIdentity, IssuedSession, SessionRecord};
use crate::token::{generate_token, hash_token, is_well_formed};
use party_rsvp_core::environment::Clock;
use std::sync::Arc;

/// The auth gate: "given credentials, return an opaque token; given a
/// token, return an identity or reject".
#[derive(Clone)]
pub struct AdminAuthenticator {
    admins: Arc<dyn AdminRepository>,
    sessions: Arc<dyn SessionStore>,
    clock: Arc<dyn Clock>,
    config: AuthConfig,
}

impl AdminAuthenticator {
    /// Create an authenticator.
    #[must_use]
    pub fn new(
        admins: Arc<dyn AdminRepository>,
        sessions: Arc<dyn SessionStore>,
        clock: Arc<dyn Clock>,
        config: AuthConfig,
    ) -> Self {
        Self {
            admins,
            sessions,
            clock,
            config,
        }
    }

    /// Verify credentials and issue a session token.
    ///
    /// The email is matched exactly after trimming.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Email or password is blank → `AuthError::MissingCredentials`
    /// - Unknown email or wrong password → `AuthError::InvalidCredentials`
    /// - Hashing or the store fails → internal variants
    #[tracing::instrument(skip_all)]
    pub async fn login(&self, email: &str, password: &str) -> Result<IssuedSession> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let Some(admin) = self.admins.find_admin_by_email(email).await? else {
            verify_dummy(password).await;
            tracing::info!("Login rejected: unknown email");
            return Err(AuthError::InvalidCredentials);
        };

        if !verify_password(password, &admin.password_hash).await? {
            tracing::info!(admin_id = %admin.id, "Login rejected: wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        let token = generate_token();
        let now = self.clock.now();
        let session = SessionRecord {
            token_hash: hash_token(&token),
            admin_id: admin.id,
            created_at: now,
            expires_at: now + self.config.session_ttl,
        };
        self.sessions.create_session(&session).await?;

        tracing::info!(admin_id = %admin.id, expires_at = %session.expires_at, "Admin logged in");
        Ok(IssuedSession {
            token,
            expires_at: session.expires_at,
        })
    }

    /// Resolve a bearer token to an admin identity.
    ///
    /// Expired sessions are deleted when presented.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The token is not well-formed → `AuthError::MalformedToken`
    /// - No session matches → `AuthError::SessionNotFound`
    /// - The session has expired → `AuthError::SessionExpired`
    /// - The store fails → `AuthError::DatabaseError`
    pub async fn authenticate(&self, token: &str) -> Result<AdminIdentity> {
        if !is_well_formed(token) {
            return Err(AuthError::MalformedToken);
        }

        let token_hash = hash_token(token);
        let session = self
            .sessions
            .find_session(&token_hash)
            .await?
            .ok_or(AuthError::SessionNotFound)?;

        if session.is_expired(self.clock.now()) {
            self.sessions.delete_session(&token_hash).await?;
            tracing::debug!(admin_id = %session.admin_id, "Expired session removed");
            return Err(AuthError::SessionExpired);
        }

        Ok(AdminIdentity {
            admin_id: session.admin_id,
        })
    }

    /// End the session belonging to `token`.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`Self::authenticate`].
    pub async fn logout(&self, token: &str) -> Result<()> {
        let identity = self.authenticate(token).await?;
        self.sessions.delete_session(&hash_token(token)).await?;
        tracing::info!(admin_id = %identity.admin_id, "Admin logged out");
        Ok(())
    }

    /// Remove every expired session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::DatabaseError` if the store fails.
    pub async fn purge_expired(&self) -> Result<u64> {
        let removed = self.sessions.delete_expired(self.clock.now()).await?;
        if removed > 0 {
            tracing::info!(removed, "Expired admin sessions purged");
        }
        Ok(removed)
    }
}

impl std::fmt::Debug for AdminAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminAuthenticator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
