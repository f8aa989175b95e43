use crate::PostgresStore;
use crate::error::{is_foreign_key_violation, store_error};
use crate::rows::FoodChoiceRow;
use async_trait::async_trait;
use party_rsvp_core::providers::FoodChoiceRepository;
use party_rsvp_core::{FoodChoice, FoodChoiceId, Result, RsvpError};

#[async_trait]
impl FoodChoiceRepository for PostgresStore {
    async fn list_food_choices(&self, active_only: bool) -> Result<Vec<FoodChoice>> {
        let rows: Vec<FoodChoiceRow> = sqlx::query_as(
            r"
            SELECT id, label, active
            FROM food_choices
            WHERE active OR NOT $1
            ORDER BY id
            ",
        )
        .bind(active_only)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| store_error("list_food_choices", &e))?;

        Ok(rows.into_iter().map(FoodChoice::from).collect())
    }

    async fn create_food_choice(&self, label: &str) -> Result<FoodChoice> {
        let row: FoodChoiceRow = sqlx::query_as(
            "INSERT INTO food_choices (label, active) VALUES ($1, TRUE) RETURNING id, label, active",
        )
        .bind(label)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| store_error("create_food_choice", &e))?;

        tracing::info!(food_choice_id = row.id(), "Food choice created");
        Ok(row.into())
    }

    async fn update_food_choice(
        &self,
        id: FoodChoiceId,
        label: &str,
        active: bool,
    ) -> Result<FoodChoice> {
        let row: Option<FoodChoiceRow> = sqlx::query_as(
            r"
            UPDATE food_choices
            SET label = $2, active = $3
            WHERE id = $1
            RETURNING id, label, active
            ",
        )
        .bind(id.get())
        .bind(label)
        .bind(active)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| store_error("update_food_choice", &e))?;

        row.map(FoodChoice::from)
            .ok_or_else(|| RsvpError::not_found("Food choice", id))
    }

    async fn delete_food_choice(&self, id: FoodChoiceId) -> Result<()> {
        let result = sqlx::query("DELETE FROM food_choices WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await;

        match result {
            Ok(done) if done.rows_affected() == 0 => Err(RsvpError::not_found("Food choice", id)),
            Ok(_) => {
                tracing::info!(food_choice_id = %id, "Food choice deleted");
                Ok(())
            }
            // ON DELETE RESTRICT on rsvp_children.food_choice_id
            Err(e) if is_foreign_key_violation(&e) => Err(RsvpError::still_referenced(
                "Food choice is used by existing RSVPs; deactivate it instead",
            )),
            Err(e) => Err(store_error("delete_food_choice", &e)),
        }
    }
}
