//! Error taxonomy for RSVP collection and administration.

use thiserror::Error;

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, RsvpError>;

/// Every failure a core operation can report.
///
/// The variants map onto how a caller should react:
///
/// - [`RsvpError::Validation`]: bad or missing input. Caller-correctable,
///   never retried, message safe to show verbatim.
/// - [`RsvpError::Integrity`]: the input is well-formed but conflicts with
///   stored data (unknown food choice, blocked delete, uniqueness).
/// - [`RsvpError::NotFound`]: an addressed row does not exist.
/// - [`RsvpError::Persistence`]: the store failed. Safe to retry: writes
///   either commit fully or not at all.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RsvpError {
    /// Malformed or missing caller input.
    #[error("{0}")]
    Validation(String),

    /// Input conflicts with stored data.
    #[error("{message}")]
    Integrity {
        /// What conflicted.
        kind: IntegrityKind,
        /// Human-readable explanation.
        message: String,
    },

    /// Addressed resource does not exist.
    #[error("{resource} with id {id} not found")]
    NotFound {
        /// Resource name, e.g. `"Food choice"`.
        resource: &'static str,
        /// Identifier that was looked up.
        id: String,
    },

    /// Store-level failure. The string is for logs only.
    #[error("Persistence failure: {0}")]
    Persistence(String),
}

/// Sub-kinds of [`RsvpError::Integrity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrityKind {
    /// A reference points at a row that does not exist.
    UnknownReference,
    /// The row is still referenced and cannot be removed.
    StillReferenced,
    /// A unique constraint rejected the write.
    Duplicate,
}

impl RsvpError {
    /// Build a validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Build an error for a food choice id that references no row.
    #[must_use]
    pub fn unknown_food_choice(id: impl std::fmt::Display) -> Self {
        Self::Integrity {
            kind: IntegrityKind::UnknownReference,
            message: format!("Food choice {id} does not exist"),
        }
    }

    /// Build an error for a delete blocked by existing references.
    #[must_use]
    pub fn still_referenced(message: impl Into<String>) -> Self {
        Self::Integrity {
            kind: IntegrityKind::StillReferenced,
            message: message.into(),
        }
    }

    /// Build a uniqueness conflict error.
    #[must_use]
    pub fn duplicate(message: impl Into<String>) -> Self {
        Self::Integrity {
            kind: IntegrityKind::Duplicate,
            message: message.into(),
        }
    }

    /// Build a not-found error.
    #[must_use]
    pub fn not_found(resource: &'static str, id: impl std::fmt::Display) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    /// Build a persistence error from any store error.
    #[must_use]
    pub fn persistence(source: impl std::fmt::Display) -> Self {
        Self::Persistence(source.to_string())
    }

    /// Returns `true` if the caller can fix the request and resubmit.
    ///
    /// # Examples
    ///
    /// ```
    /// # use party_rsvp_core::RsvpError;
    /// assert!(RsvpError::validation("Missing name").is_caller_error());
    /// assert!(!RsvpError::persistence("connection reset").is_caller_error());
    /// ```
    #[must_use]
    pub const fn is_caller_error(&self) -> bool {
        !matches!(self, Self::Persistence(_))
    }
}
