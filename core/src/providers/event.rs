//! Event settings repository trait.

use crate::error::Result;
use crate::types::EventSettings;
use async_trait::async_trait;

/// Access to the singleton event settings row.
#[async_trait]
pub trait EventSettingsRepository: Send + Sync {
    /// Load the event settings.
    ///
    /// # Errors
    ///
    /// Returns `RsvpError::Persistence` if the store fails.
    async fn get_event_settings(&self) -> Result<EventSettings>;

    /// Replace every field of the event settings and return the stored row.
    ///
    /// # Errors
    ///
    /// Returns `RsvpError::Persistence` if the store fails.
    async fn replace_event_settings(&self, settings: &EventSettings) -> Result<EventSettings>;
}
