use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;

use crate::database::models::{Worker, WorkerInput};

/// Escapes LIKE metacharacters so a search term matches its characters
/// literally.
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[derive(Clone)]
pub struct WorkerRepository {
    pool: SqlitePool,
}

impl WorkerRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, input: &WorkerInput) -> Result<Worker> {
        let worker = Worker::new(input);

        let worker = sqlx::query_as::<_, Worker>(
            r#"
            INSERT INTO workers (id, name, base_salary, shift_hours, overtime_rate_per_hour, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            RETURNING *
            "#,
        )
        .bind(&worker.id)
        .bind(&worker.name)
        .bind(worker.base_salary)
        .bind(worker.shift_hours)
        .bind(worker.overtime_rate_per_hour)
        .bind(worker.created_at)
        .bind(worker.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(worker)
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<Worker>> {
        let worker = sqlx::query_as::<_, Worker>("SELECT * FROM workers WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(worker)
    }

    /// All workers, newest first. A non-empty search term filters by
    /// case-insensitive substring match anywhere in the name; `%` and `_`
    /// in the term are matched literally, not as LIKE wildcards.
    pub async fn get_all(&self, search: Option<&str>) -> Result<Vec<Worker>> {
        let workers = match search.map(str::trim).filter(|s| !s.is_empty()) {
            Some(term) => {
                sqlx::query_as::<_, Worker>(
                    r#"
                    SELECT * FROM workers
                    WHERE name LIKE ?1 ESCAPE '\'
                    ORDER BY created_at DESC
                    "#,
                )
                .bind(format!("%{}%", escape_like(term)))
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Worker>("SELECT * FROM workers ORDER BY created_at DESC")
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        Ok(workers)
    }

    /// Full replace of the mutable fields. Returns `None` when the id is
    /// unknown.
    pub async fn update(&self, id: &str, input: &WorkerInput) -> Result<Option<Worker>> {
        let updated_at = Utc::now().naive_utc();

        let worker = sqlx::query_as::<_, Worker>(
            r#"
            UPDATE workers
            SET name = ?1,
                base_salary = ?2,
                shift_hours = ?3,
                overtime_rate_per_hour = ?4,
                updated_at = ?5
            WHERE id = ?6
            RETURNING *
            "#,
        )
        .bind(input.name.trim())
        .bind(input.base_salary)
        .bind(input.shift_hours)
        .bind(input.overtime_rate_per_hour)
        .bind(updated_at)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(worker)
    }

    /// Deletes the worker and every monthly wage row that references it in
    /// one transaction, so no orphaned ledger entries survive.
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM monthly_wages WHERE worker_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM workers WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(result.rows_affected() > 0)
    }
}
