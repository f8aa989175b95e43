use crate::PostgresStore;
use crate::error::{count, store_error};
use crate::rows::FoodTotalRow;
use async_trait::async_trait;
use party_rsvp_core::providers::MetricsRepository;
use party_rsvp_core::{FoodTotal, Result};

#[async_trait]
impl MetricsRepository for PostgresStore {
    async fn count_invites(&self) -> Result<u64> {
        let (n,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM invites")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| store_error("count_invites", &e))?;
        Ok(count(n))
    }

    async fn count_rsvps(&self) -> Result<u64> {
        let (n,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM rsvps")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| store_error("count_rsvps", &e))?;
        Ok(count(n))
    }

    async fn food_totals(&self) -> Result<Vec<FoodTotal>> {
        let rows: Vec<FoodTotalRow> = sqlx::query_as(
            r"
            SELECT f.label, COUNT(c.id) AS count
            FROM food_choices f
            LEFT JOIN rsvp_children c ON c.food_choice_id = f.id
            GROUP BY f.id, f.label
            ORDER BY f.id
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| store_error("food_totals", &e))?;

        Ok(rows.into_iter().map(FoodTotal::from).collect())
    }
}
