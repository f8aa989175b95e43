//! `PostgreSQL` session store.

use super::db_error;
use crate::error::Result;
use crate::providers::SessionStore;
use crate::state::{AdminId, SessionRecord};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

/// `PostgreSQL` session store.
#[derive(Clone, Debug)]
pub struct PostgresSessionStore {
    pool: PgPool,
}

impl PostgresSessionStore {
    /// Create a store over `pool`.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct SessionRow {
    token_hash: String,
    admin_id: i64,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

#[async_trait]
impl SessionStore for PostgresSessionStore {
    async fn create_session(&self, session: &SessionRecord) -> Result<()> {
        sqlx::query(
            r"
            INSERT INTO admin_sessions (token_hash, admin_id, created_at, expires_at)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(&session.token_hash)
        .bind(session.admin_id.0)
        .bind(session.created_at)
        .bind(session.expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to create session", &e))?;
        Ok(())
    }

    async fn find_session(&self, token_hash: &str) -> Result<Option<SessionRecord>> {
        let row: Option<SessionRow> = sqlx::query_as(
            r"
            SELECT token_hash, admin_id, created_at, expires_at
            FROM admin_sessions
            WHERE token_hash = $1
            ",
        )
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to get session", &e))?;

        Ok(row.map(|r| SessionRecord {
            token_hash: r.token_hash,
            admin_id: AdminId(r.admin_id),
            created_at: r.created_at,
            expires_at: r.expires_at,
        }))
    }

    async fn delete_session(&self, token_hash: &str) -> Result<()> {
        sqlx::query("DELETE FROM admin_sessions WHERE token_hash = $1")
            .bind(token_hash)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete session", &e))?;
        Ok(())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64> {
        let done = sqlx::query("DELETE FROM admin_sessions WHERE expires_at <= $1")
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to purge sessions", &e))?;
        Ok(done.rows_affected())
    }
}
