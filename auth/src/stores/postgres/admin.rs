//! `PostgreSQL` admin repository.

use super::db_error;
use crate::error::Result;
use crate::providers::AdminRepository;
use crate::state::{AdminId, AdminRecord};
use async_trait::async_trait;
use sqlx::PgPool;

/// `PostgreSQL` admin repository.
#[derive(Clone, Debug)]
pub struct PostgresAdminRepository {
    pool: PgPool,
}

impl PostgresAdminRepository {
    /// Create a repository over `pool`.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct AdminRow {
    id: i64,
    email: String,
    password_hash: String,
}

#[async_trait]
impl AdminRepository for PostgresAdminRepository {
    async fn find_admin_by_email(&self, email: &str) -> Result<Option<AdminRecord>> {
        let row: Option<AdminRow> =
            sqlx::query_as("SELECT id, email, password_hash FROM admins WHERE email = $1")
                .bind(email)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("Failed to get admin", &e))?;

        Ok(row.map(|r| AdminRecord {
            id: AdminId(r.id),
            email: r.email,
            password_hash: r.password_hash,
        }))
    }

    async fn upsert_admin(&self, email: &str, password_hash: &str) -> Result<AdminId> {
        let (id,): (i64,) = sqlx::query_as(
            r"
            INSERT INTO admins (email, password_hash)
            VALUES ($1, $2)
            ON CONFLICT (email) DO UPDATE SET password_hash = EXCLUDED.password_hash
            RETURNING id
            ",
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to upsert admin", &e))?;

        Ok(AdminId(id))
    }
}
