//! Admin session extractor.
//!
//! Add [`AdminSession`] as a handler parameter to require a valid bearer
//! token. Extraction fails with 401 before the handler body (and so before
//! any store access) runs.
//!
//! ```rust,ignore
//! async fn list_invites(
//!     _admin: AdminSession,
//!     State(state): State<AppState>,
//! ) -> Result<Json<Vec<Invite>>, AppError> { ... }
//! ```

use crate::server::state::AppState;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use party_rsvp_auth::AdminId;
use party_rsvp_web::{AppError, BearerToken};

/// An authenticated admin request.
#[derive(Debug, Clone)]
pub struct AdminSession {
    /// The authenticated admin
    pub admin_id: AdminId,
    /// The presented token, kept for logout
    pub token: String,
}

#[async_trait]
impl FromRequestParts<AppState> for AdminSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let BearerToken(token) = BearerToken::from_request_parts(parts, state).await?;

        let identity = state.authenticator.authenticate(&token).await.map_err(|e| {
            tracing::debug!(error = %e, "Admin token rejected");
            AppError::from(e)
        })?;

        Ok(Self {
            admin_id: identity.admin_id,
            token,
        })
    }
}
