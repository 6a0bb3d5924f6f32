use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::services::calculator::WageBreakdown;

/// One ledger row per worker per (month, year). `net_wage` and the two
/// intermediate columns are derived by the calculator at write time and are
/// never accepted from clients.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyWage {
    pub id: String,
    pub worker_id: String,
    pub month: i64,
    pub year: i64,
    pub advance: f64,
    pub dues: f64,
    pub days_worked: i64,
    pub total_days_in_month: i64,
    pub overtime_hours: f64,
    pub base_wage_calculated: f64,
    pub overtime_wage: f64,
    pub net_wage: f64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Set-monthly-wage form. Attendance fields are optional: an omitted
/// `total_days_in_month` falls back to the calendar length of the period and
/// omitted `days_worked` means full attendance, which reduces the
/// calculation to the simple base − advance + dues form.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyWageInput {
    pub month: u32,
    pub year: i32,
    #[serde(default)]
    pub advance: f64,
    #[serde(default)]
    pub dues: f64,
    pub days_worked: Option<i64>,
    pub total_days_in_month: Option<i64>,
    #[serde(default)]
    pub overtime_hours: f64,
}

impl MonthlyWageInput {
    pub fn validate(&self) -> Result<(), String> {
        if !(1..=12).contains(&self.month) {
            return Err(format!("Month must be between 1 and 12, got {}", self.month));
        }
        if !(1970..=2100).contains(&self.year) {
            return Err(format!("Year {} is out of range", self.year));
        }
        if self.advance < 0.0 {
            return Err("Advance must not be negative".to_string());
        }
        if self.dues < 0.0 {
            return Err("Dues must not be negative".to_string());
        }
        if self.overtime_hours < 0.0 {
            return Err("Overtime hours must not be negative".to_string());
        }
        Ok(())
    }
}

impl MonthlyWage {
    pub fn new(
        worker_id: &str,
        input: &MonthlyWageInput,
        days_worked: i64,
        total_days_in_month: i64,
        breakdown: &WageBreakdown,
    ) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            worker_id: worker_id.to_string(),
            month: input.month as i64,
            year: input.year as i64,
            advance: input.advance,
            dues: input.dues,
            days_worked,
            total_days_in_month,
            overtime_hours: input.overtime_hours,
            base_wage_calculated: breakdown.base_wage_earned,
            overtime_wage: breakdown.overtime_wage,
            net_wage: breakdown.net_wage,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Aggregate totals for one period. Worker count and salary totals span the
/// whole workforce; advance/dues/net totals cover only the period's rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollSummary {
    pub month: u32,
    pub year: i32,
    pub total_workers: i64,
    pub total_base_salary: f64,
    pub total_advances: f64,
    pub total_dues: f64,
    pub total_net_wages: f64,
}

/// Calendar length of a (month, year) period.
pub fn days_in_month(year: i32, month: u32) -> Option<i64> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((next - first).num_days())
}
