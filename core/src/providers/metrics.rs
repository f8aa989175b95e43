//! Read-only aggregation queries.

use crate::error::Result;
use crate::types::FoodTotal;
use async_trait::async_trait;

/// Counting queries behind the admin dashboard.
#[async_trait]
pub trait MetricsRepository: Send + Sync {
    /// Number of invite rows.
    ///
    /// # Errors
    ///
    /// Returns `RsvpError::Persistence` if the store fails.
    async fn count_invites(&self) -> Result<u64>;

    /// Number of RSVP rows.
    ///
    /// # Errors
    ///
    /// Returns `RsvpError::Persistence` if the store fails.
    async fn count_rsvps(&self) -> Result<u64>;

    /// Children per food choice: one entry for every food choice, zero
    /// counts included, ordered by food choice id.
    ///
    /// # Errors
    ///
    /// Returns `RsvpError::Persistence` if the store fails.
    async fn food_totals(&self) -> Result<Vec<FoodTotal>>;
}
