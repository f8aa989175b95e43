//! RSVP repository trait.

use crate::error::Result;
use crate::types::{NewRsvp, Rsvp};
use async_trait::async_trait;

/// RSVP storage.
#[async_trait]
pub trait RsvpRepository: Send + Sync {
    /// Write one RSVP and all of its children in a single transaction.
    ///
    /// Either the parent and every child become visible together, or
    /// nothing does.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - A child references a missing food choice → `RsvpError::Integrity`
    ///   (`UnknownReference`), nothing written
    /// - The store fails → `RsvpError::Persistence`, nothing written
    async fn create_rsvp(&self, rsvp: &NewRsvp) -> Result<Rsvp>;

    /// List all RSVPs with their children, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RsvpError::Persistence` if the store fails.
    async fn list_rsvps(&self) -> Result<Vec<Rsvp>>;
}
