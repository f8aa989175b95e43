//! Admin login and logout handlers.

use crate::auth::middleware::AdminSession;
use crate::server::state::AppState;
use crate::telemetry;
use axum::{Json, extract::State};
use party_rsvp_auth::{AuthError, IssuedSession};
use party_rsvp_web::{AppError, AppJson, ClientIp, CorrelationId};
use serde::{Deserialize, Serialize};

/// Login request body.
///
/// Missing fields decode as empty and are rejected as missing credentials.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    /// Admin email
    pub email: String,
    /// Plain-text password
    pub password: String,
}

/// Plain acknowledgement body.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct OkResponse {
    /// Always `true`
    pub ok: bool,
}

impl OkResponse {
    /// `{"ok": true}`
    pub const OK: Self = Self { ok: true };
}

/// Exchange credentials for a session token.
///
/// # Endpoint
///
/// ```text
/// POST /api/admin/login
/// Content-Type: application/json
///
/// { "email": "host@example.com", "password": "..." }
/// ```
///
/// # Response
///
/// ```json
/// { "token": "...", "expires_at": "2025-01-08T00:00:00Z" }
/// ```
///
/// Unknown email and wrong password both answer 401 `Invalid credentials`.
pub async fn login(
    State(state): State<AppState>,
    correlation_id: CorrelationId,
    client_ip: ClientIp,
    AppJson(request): AppJson<LoginRequest>,
) -> Result<Json<IssuedSession>, AppError> {
    match state.authenticator.login(&request.email, &request.password).await {
        Ok(session) => {
            telemetry::record_login("success");
            tracing::info!(
                correlation_id = %correlation_id.0,
                client_ip = %client_ip.0,
                "Admin session issued"
            );
            Ok(Json(session))
        }
        Err(e) => {
            let outcome = match e {
                AuthError::InvalidCredentials | AuthError::MissingCredentials => "rejected",
                _ => "failed",
            };
            telemetry::record_login(outcome);
            tracing::warn!(
                correlation_id = %correlation_id.0,
                client_ip = %client_ip.0,
                error = %e,
                "Admin login failed"
            );
            Err(e.into())
        }
    }
}

/// Delete the presenting session.
///
/// ```text
/// POST /api/admin/logout
/// Authorization: Bearer <token>
/// ```
pub async fn logout(
    admin: AdminSession,
    State(state): State<AppState>,
) -> Result<Json<OkResponse>, AppError> {
    state.authenticator.logout(&admin.token).await?;
    tracing::info!(admin_id = %admin.admin_id, "Admin logged out");
    Ok(Json(OkResponse::OK))
}
