use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Worker {
    pub id: String,
    pub name: String,
    /// Monthly pay at full attendance.
    pub base_salary: f64,
    /// Hours in one regular shift.
    pub shift_hours: i64,
    pub overtime_rate_per_hour: f64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerInput {
    pub name: String,
    pub base_salary: f64,
    #[serde(default = "default_shift_hours")]
    pub shift_hours: i64,
    #[serde(default)]
    pub overtime_rate_per_hour: f64,
}

fn default_shift_hours() -> i64 {
    8
}

impl WorkerInput {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Worker name must not be empty".to_string());
        }
        if self.base_salary < 0.0 {
            return Err("Base salary must not be negative".to_string());
        }
        if self.shift_hours <= 0 {
            return Err("Shift hours must be positive".to_string());
        }
        if self.overtime_rate_per_hour < 0.0 {
            return Err("Overtime rate must not be negative".to_string());
        }
        Ok(())
    }
}

impl Worker {
    pub fn new(input: &WorkerInput) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: input.name.trim().to_string(),
            base_salary: input.base_salary,
            shift_hours: input.shift_hours,
            overtime_rate_per_hour: input.overtime_rate_per_hour,
            created_at: now,
            updated_at: now,
        }
    }
}
