use anyhow::Result;
use sqlx::SqlitePool;

use crate::database::models::{MonthlyWage, PayrollSummary};

#[derive(Clone)]
pub struct MonthlyWageRepository {
    pool: SqlitePool,
}

impl MonthlyWageRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Keyed write on (worker_id, month, year): replaces the existing row
    /// for the period if one exists, otherwise inserts. The original id and
    /// created_at survive a replace.
    pub async fn upsert(&self, wage: &MonthlyWage) -> Result<MonthlyWage> {
        let wage = sqlx::query_as::<_, MonthlyWage>(
            r#"
            INSERT INTO monthly_wages (
                id, worker_id, month, year, advance, dues,
                days_worked, total_days_in_month, overtime_hours,
                base_wage_calculated, overtime_wage, net_wage,
                created_at, updated_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)
            ON CONFLICT (worker_id, month, year) DO UPDATE SET
                advance = excluded.advance,
                dues = excluded.dues,
                days_worked = excluded.days_worked,
                total_days_in_month = excluded.total_days_in_month,
                overtime_hours = excluded.overtime_hours,
                base_wage_calculated = excluded.base_wage_calculated,
                overtime_wage = excluded.overtime_wage,
                net_wage = excluded.net_wage,
                updated_at = excluded.updated_at
            RETURNING *
            "#,
        )
        .bind(&wage.id)
        .bind(&wage.worker_id)
        .bind(wage.month)
        .bind(wage.year)
        .bind(wage.advance)
        .bind(wage.dues)
        .bind(wage.days_worked)
        .bind(wage.total_days_in_month)
        .bind(wage.overtime_hours)
        .bind(wage.base_wage_calculated)
        .bind(wage.overtime_wage)
        .bind(wage.net_wage)
        .bind(wage.created_at)
        .bind(wage.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(wage)
    }

    pub async fn get_for_period(&self, month: u32, year: i32) -> Result<Vec<MonthlyWage>> {
        let wages = sqlx::query_as::<_, MonthlyWage>(
            r#"
            SELECT * FROM monthly_wages
            WHERE month = ?1 AND year = ?2
            ORDER BY created_at DESC
            "#,
        )
        .bind(month)
        .bind(year)
        .fetch_all(&self.pool)
        .await?;

        Ok(wages)
    }

    pub async fn get_for_worker_period(
        &self,
        worker_id: &str,
        month: u32,
        year: i32,
    ) -> Result<Option<MonthlyWage>> {
        let wage = sqlx::query_as::<_, MonthlyWage>(
            "SELECT * FROM monthly_wages WHERE worker_id = ?1 AND month = ?2 AND year = ?3",
        )
        .bind(worker_id)
        .bind(month)
        .bind(year)
        .fetch_optional(&self.pool)
        .await?;

        Ok(wage)
    }

    /// Aggregate totals for the period. Worker count and base-salary totals
    /// are period-independent; the wage-derived totals sum only the rows of
    /// the given (month, year).
    pub async fn summary(&self, month: u32, year: i32) -> Result<PayrollSummary> {
        let (total_workers, total_base_salary): (i64, f64) = sqlx::query_as(
            "SELECT COUNT(*), COALESCE(SUM(base_salary), 0) FROM workers",
        )
        .fetch_one(&self.pool)
        .await?;

        let (total_advances, total_dues, total_net_wages): (f64, f64, f64) = sqlx::query_as(
            r#"
            SELECT
                COALESCE(SUM(advance), 0),
                COALESCE(SUM(dues), 0),
                COALESCE(SUM(net_wage), 0)
            FROM monthly_wages
            WHERE month = ?1 AND year = ?2
            "#,
        )
        .bind(month)
        .bind(year)
        .fetch_one(&self.pool)
        .await?;

        Ok(PayrollSummary {
            month,
            year,
            total_workers,
            total_base_salary,
            total_advances,
            total_dues,
            total_net_wages,
        })
    }
}
