use anyhow::Result;
use sqlx::SqlitePool;

use crate::database::models::{RoleGrant, ADMIN_ROLE};

#[derive(Clone)]
pub struct RoleRepository {
    pool: SqlitePool,
}

impl RoleRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn has_role(&self, user_id: &str, role: &str) -> Result<bool> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM user_roles WHERE user_id = ?1 AND role = ?2",
        )
        .bind(user_id)
        .bind(role)
        .fetch_one(&self.pool)
        .await?;

        Ok(count > 0)
    }

    pub async fn is_admin(&self, user_id: &str) -> Result<bool> {
        self.has_role(user_id, ADMIN_ROLE).await
    }

    /// Idempotent grant: re-granting an existing (user, role) pair returns
    /// the original row.
    pub async fn grant(&self, user_id: &str, role: &str) -> Result<RoleGrant> {
        let granted_at = chrono::Utc::now().naive_utc();

        sqlx::query(
            r#"
            INSERT INTO user_roles (id, user_id, role, granted_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT (user_id, role) DO NOTHING
            "#,
        )
        .bind(uuid::Uuid::new_v4().to_string())
        .bind(user_id)
        .bind(role)
        .bind(granted_at)
        .execute(&self.pool)
        .await?;

        let grant = sqlx::query_as::<_, RoleGrant>(
            "SELECT * FROM user_roles WHERE user_id = ?1 AND role = ?2",
        )
        .bind(user_id)
        .bind(role)
        .fetch_one(&self.pool)
        .await?;

        Ok(grant)
    }

    /// One-time bootstrap grant. The guard lives in the same statement as
    /// the insert, so concurrent callers cannot both win: the insert only
    /// lands while zero admin rows exist. Returns `None` once bootstrap is
    /// closed.
    pub async fn bootstrap_admin(&self, user_id: &str) -> Result<Option<RoleGrant>> {
        let granted_at = chrono::Utc::now().naive_utc();

        let result = sqlx::query(
            r#"
            INSERT INTO user_roles (id, user_id, role, granted_at)
            SELECT ?1, ?2, ?3, ?4
            WHERE NOT EXISTS (SELECT 1 FROM user_roles WHERE role = ?3)
            "#,
        )
        .bind(uuid::Uuid::new_v4().to_string())
        .bind(user_id)
        .bind(ADMIN_ROLE)
        .bind(granted_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        let grant = sqlx::query_as::<_, RoleGrant>(
            "SELECT * FROM user_roles WHERE user_id = ?1 AND role = ?2",
        )
        .bind(user_id)
        .bind(ADMIN_ROLE)
        .fetch_one(&self.pool)
        .await?;

        Ok(Some(grant))
    }

    pub async fn admin_count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM user_roles WHERE role = ?1")
            .bind(ADMIN_ROLE)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
