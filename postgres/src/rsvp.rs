use crate::PostgresStore;
use crate::error::{is_foreign_key_violation, store_error};
use crate::rows::{RsvpChildRow, RsvpRow};
use async_trait::async_trait;
use party_rsvp_core::providers::RsvpRepository;
use party_rsvp_core::{NewRsvp, Result, Rsvp, RsvpChild, RsvpError, RsvpHeader, assemble_rsvps};

/// Child columns plus the label of the chosen meal.
const CHILD_COLUMNS: &str = r"
    c.id, c.rsvp_id, c.child_name, c.food_choice_id,
    f.label AS food_choice_label,
    c.has_dietary_requirements, c.dietary_requirements
";

#[async_trait]
impl RsvpRepository for PostgresStore {
    async fn create_rsvp(&self, rsvp: &NewRsvp) -> Result<Rsvp> {
        // Dropping the transaction without commit rolls back the parent
        // row together with any children already inserted.
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| store_error("begin_rsvp", &e))?;

        let header: RsvpRow = sqlx::query_as(
            r"
            INSERT INTO rsvps (invite_name_entered, phone)
            VALUES ($1, $2)
            RETURNING id, invite_name_entered, phone, created_at
            ",
        )
        .bind(&rsvp.invite_name_entered)
        .bind(rsvp.phone.as_deref())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| store_error("insert_rsvp", &e))?;
        let header = RsvpHeader::from(header);

        let insert_child = format!(
            r"
            WITH c AS (
                INSERT INTO rsvp_children
                    (rsvp_id, child_name, food_choice_id, has_dietary_requirements, dietary_requirements)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING *
            )
            SELECT {CHILD_COLUMNS}
            FROM c
            JOIN food_choices f ON f.id = c.food_choice_id
            "
        );

        let mut children: Vec<RsvpChild> = Vec::with_capacity(rsvp.children.len());
        for child in &rsvp.children {
            let row: RsvpChildRow = sqlx::query_as(&insert_child)
                .bind(header.id.get())
                .bind(&child.child_name)
                .bind(child.food_choice_id.get())
                .bind(child.dietary_requirements.is_some())
                .bind(child.dietary_requirements.as_deref())
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| {
                    if is_foreign_key_violation(&e) {
                        RsvpError::unknown_food_choice(child.food_choice_id)
                    } else {
                        store_error("insert_rsvp_child", &e)
                    }
                })?;
            children.push(row.into());
        }

        tx.commit()
            .await
            .map_err(|e| store_error("commit_rsvp", &e))?;

        tracing::debug!(rsvp_id = %header.id, children = children.len(), "RSVP committed");

        assemble_rsvps(vec![header], children)
            .into_iter()
            .next()
            .ok_or_else(|| RsvpError::persistence("committed RSVP missing from assembly"))
    }

    async fn list_rsvps(&self) -> Result<Vec<Rsvp>> {
        let headers: Vec<RsvpRow> = sqlx::query_as(
            r"
            SELECT id, invite_name_entered, phone, created_at
            FROM rsvps
            ORDER BY created_at DESC, id DESC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| store_error("list_rsvps", &e))?;

        // Headers are read first: every parent seen here already has all of
        // its children committed. Children of newer parents are dropped by
        // the assembly step.
        let children: Vec<RsvpChildRow> = sqlx::query_as(&format!(
            r"
            SELECT {CHILD_COLUMNS}
            FROM rsvp_children c
            JOIN food_choices f ON f.id = c.food_choice_id
            ORDER BY c.id
            "
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| store_error("list_rsvp_children", &e))?;

        Ok(assemble_rsvps(
            headers.into_iter().map(RsvpHeader::from).collect(),
            children.into_iter().map(RsvpChild::from).collect(),
        ))
    }
}
