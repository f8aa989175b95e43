//! RSVP writer.

use crate::error::Result;
use crate::providers::RsvpRepository;
use crate::types::Rsvp;
use crate::validation::{RsvpPolicy, RsvpSubmission, validate_submission};
use std::sync::Arc;

/// Validates a submission and persists it atomically.
#[derive(Clone)]
pub struct RsvpWriter {
    rsvps: Arc<dyn RsvpRepository>,
    policy: RsvpPolicy,
}

impl RsvpWriter {
    /// Create a writer over `rsvps`.
    #[must_use]
    pub fn new(rsvps: Arc<dyn RsvpRepository>, policy: RsvpPolicy) -> Self {
        Self { rsvps, policy }
    }

    /// Record one household's response.
    ///
    /// Submissions are never deduplicated: the same payload twice yields two
    /// RSVPs.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The submission is invalid → `RsvpError::Validation`, no store call made
    /// - A food choice does not exist → `RsvpError::Integrity`, nothing written
    /// - The store fails → `RsvpError::Persistence`, nothing written
    #[tracing::instrument(skip_all, fields(children = submission.children.len()))]
    pub async fn submit(&self, submission: &RsvpSubmission) -> Result<Rsvp> {
        let new_rsvp = match validate_submission(submission, self.policy) {
            Ok(rsvp) => rsvp,
            Err(e) => {
                tracing::debug!(error = %e, "RSVP rejected by validation");
                return Err(e);
            }
        };

        let rsvp = self.rsvps.create_rsvp(&new_rsvp).await?;

        tracing::info!(
            rsvp_id = %rsvp.id,
            children = rsvp.children.len(),
            "RSVP recorded"
        );
        Ok(rsvp)
    }
}

impl std::fmt::Debug for RsvpWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RsvpWriter")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
