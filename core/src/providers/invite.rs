//! Invite repository trait.

use crate::error::Result;
use crate::types::{InsertOutcome, Invite, NewInvite};
use async_trait::async_trait;

/// Guest list storage.
#[async_trait]
pub trait InviteRepository: Send + Sync {
    /// Insert an invite unless one with the same `invite_key` exists.
    ///
    /// Each call is its own atomic unit. An existing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `RsvpError::Persistence` if the store fails.
    async fn insert_invite_if_absent(&self, invite: &NewInvite) -> Result<InsertOutcome>;

    /// List invites by import time, then id.
    ///
    /// # Errors
    ///
    /// Returns `RsvpError::Persistence` if the store fails.
    async fn list_invites(&self) -> Result<Vec<Invite>>;
}
