//! Error type for web handlers.
//!
//! Every handler returns [`AppError`] on failure. Core and auth errors
//! convert into it with `?`, so the status code for each failure kind is
//! decided in exactly one place.

use axum::{
    Json,
    extract::multipart::{MultipartError, MultipartRejection},
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use party_rsvp_auth::AuthError;
use party_rsvp_core::{IntegrityKind, RsvpError};
use serde::Serialize;
use std::fmt;

const GENERIC_INTERNAL_MESSAGE: &str = "An internal error occurred";

/// Application error type for web handlers.
///
/// Serializes as `{"code": "...", "message": "..."}`. The optional source
/// is logged for server errors and never sent to the client.
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
    code: &'static str,
    source: Option<anyhow::Error>,
}

impl AppError {
    /// Create a new application error.
    #[must_use]
    pub fn new(status: StatusCode, message: impl Into<String>, code: &'static str) -> Self {
        Self {
            status,
            message: message.into(),
            code,
            source: None,
        }
    }

    /// Attach an internal source error (logged, not serialized).
    #[must_use]
    pub fn with_source(mut self, source: anyhow::Error) -> Self {
        self.source = Some(source);
        self
    }

    /// 400 with a caller-correctable message.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message, "VALIDATION_ERROR")
    }

    /// 401.
    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message, "UNAUTHORIZED")
    }

    /// 404 for a resource looked up by id.
    #[must_use]
    pub fn not_found(resource: impl fmt::Display, id: impl fmt::Display) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            format!("{resource} with id {id} not found"),
            "NOT_FOUND",
        )
    }

    /// 409.
    #[must_use]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message, "CONFLICT")
    }

    /// 422 for input that references data which does not exist.
    #[must_use]
    pub fn integrity(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, message, "INTEGRITY_ERROR")
    }

    /// 413 when the request body exceeds the configured limit.
    #[must_use]
    pub fn payload_too_large() -> Self {
        Self::new(
            StatusCode::PAYLOAD_TOO_LARGE,
            "Request body too large",
            "PAYLOAD_TOO_LARGE",
        )
    }

    /// 500 with the generic message.
    #[must_use]
    pub fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            GENERIC_INTERNAL_MESSAGE,
            "INTERNAL_SERVER_ERROR",
        )
    }

    /// HTTP status this error responds with.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Machine-readable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.code
    }

    /// Client-facing message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

#[derive(Debug, Serialize)]
struct ErrorResponse<'a> {
    code: &'a str,
    message: &'a str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            match &self.source {
                Some(source) => tracing::error!(
                    status = %self.status,
                    code = self.code,
                    error = %source,
                    "Internal server error"
                ),
                None => tracing::error!(status = %self.status, code = self.code, "Internal server error"),
            }
        }

        let body = ErrorResponse {
            code: self.code,
            message: &self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<RsvpError> for AppError {
    fn from(err: RsvpError) -> Self {
        match err {
            RsvpError::Validation(message) => Self::validation(message),
            RsvpError::Integrity {
                kind: IntegrityKind::UnknownReference,
                message,
            } => Self::integrity(message),
            RsvpError::Integrity {
                kind: IntegrityKind::StillReferenced | IntegrityKind::Duplicate,
                message,
            } => Self::conflict(message),
            RsvpError::NotFound { resource, id } => Self::not_found(resource, id),
            err @ RsvpError::Persistence(_) => Self::internal().with_source(err.into()),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        if err.is_unauthorized() {
            return Self::unauthorized(err.to_string());
        }
        match err {
            AuthError::MissingCredentials => Self::validation("Missing credentials"),
            other => Self::internal().with_source(other.into()),
        }
    }
}

// Extractor rejections keep the decoder's text out of the response; it is
// only logged at debug level.

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(detail = %rejection.body_text(), "JSON body rejected");
        match rejection {
            JsonRejection::JsonDataError(_) => Self::validation("Missing or invalid fields"),
            JsonRejection::JsonSyntaxError(_) => Self::validation("Malformed JSON body"),
            JsonRejection::MissingJsonContentType(_) => {
                Self::validation("Expected Content-Type: application/json")
            }
            other if other.status() == StatusCode::PAYLOAD_TOO_LARGE => Self::payload_too_large(),
            _ => Self::validation("Could not read request body"),
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!(detail = %rejection.body_text(), "Path parameter rejected");
        Self::validation("Invalid path parameter")
    }
}

impl From<MultipartRejection> for AppError {
    fn from(rejection: MultipartRejection) -> Self {
        tracing::debug!(detail = %rejection.body_text(), "Multipart request rejected");
        Self::validation("Expected a multipart/form-data upload")
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        tracing::debug!(detail = %err.body_text(), "Multipart body rejected");
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Self::payload_too_large()
        } else {
            Self::validation("Malformed multipart upload")
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::internal().with_source(err)
    }
}
