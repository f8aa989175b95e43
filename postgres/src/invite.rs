use crate::PostgresStore;
use crate::error::store_error;
use crate::rows::InviteRow;
use async_trait::async_trait;
use party_rsvp_core::providers::InviteRepository;
use party_rsvp_core::{InsertOutcome, Invite, NewInvite, Result};

#[async_trait]
impl InviteRepository for PostgresStore {
    async fn insert_invite_if_absent(&self, invite: &NewInvite) -> Result<InsertOutcome> {
        let done = sqlx::query(
            r"
            INSERT INTO invites (invite_name, invite_key, phone)
            VALUES ($1, $2, $3)
            ON CONFLICT (invite_key) DO NOTHING
            ",
        )
        .bind(&invite.invite_name)
        .bind(&invite.invite_key)
        .bind(invite.phone.as_deref())
        .execute(&self.pool)
        .await
        .map_err(|e| store_error("insert_invite", &e))?;

        Ok(if done.rows_affected() == 0 {
            InsertOutcome::AlreadyPresent
        } else {
            InsertOutcome::Inserted
        })
    }

    async fn list_invites(&self) -> Result<Vec<Invite>> {
        let rows: Vec<InviteRow> = sqlx::query_as(
            r"
            SELECT id, invite_name, phone, created_at
            FROM invites
            ORDER BY created_at, id
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| store_error("list_invites", &e))?;

        Ok(rows.into_iter().map(Invite::from).collect())
    }
}
