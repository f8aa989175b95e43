//! Food choice repository trait.

use crate::error::Result;
use crate::types::{FoodChoice, FoodChoiceId};
use async_trait::async_trait;

/// Food choice management.
///
/// Listings are ordered by id ascending.
#[async_trait]
pub trait FoodChoiceRepository: Send + Sync {
    /// List food choices, optionally only the active ones.
    ///
    /// # Errors
    ///
    /// Returns `RsvpError::Persistence` if the store fails.
    async fn list_food_choices(&self, active_only: bool) -> Result<Vec<FoodChoice>>;

    /// Create an active food choice.
    ///
    /// # Errors
    ///
    /// Returns `RsvpError::Persistence` if the store fails.
    async fn create_food_choice(&self, label: &str) -> Result<FoodChoice>;

    /// Update label and active flag.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - No row has this id → `RsvpError::NotFound`
    /// - The store fails → `RsvpError::Persistence`
    async fn update_food_choice(
        &self,
        id: FoodChoiceId,
        label: &str,
        active: bool,
    ) -> Result<FoodChoice>;

    /// Delete a food choice nobody has picked.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - No row has this id → `RsvpError::NotFound`
    /// - Any RSVP child references it → `RsvpError::Integrity` (`StillReferenced`)
    /// - The store fails → `RsvpError::Persistence`
    async fn delete_food_choice(&self, id: FoodChoiceId) -> Result<()>;
}
