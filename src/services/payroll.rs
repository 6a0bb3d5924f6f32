use crate::database::models::{
    days_in_month, MonthlyWage, MonthlyWageInput, PayrollSummary, Worker,
};
use crate::database::repositories::{MonthlyWageRepository, WorkerRepository};
use crate::error::AppError;
use crate::services::calculator::{self, WageInputs};

/// Orchestrates the set-monthly-wage flow: validate the form, read the
/// worker's current compensation parameters, derive the net wage, and write
/// the period row as a keyed upsert.
#[derive(Clone)]
pub struct PayrollService {
    workers: WorkerRepository,
    wages: MonthlyWageRepository,
}

impl PayrollService {
    pub fn new(workers: WorkerRepository, wages: MonthlyWageRepository) -> Self {
        Self { workers, wages }
    }

    pub async fn set_monthly_wage(
        &self,
        worker_id: &str,
        input: &MonthlyWageInput,
    ) -> Result<MonthlyWage, AppError> {
        input.validate().map_err(AppError::validation)?;

        // Compensation parameters are read here, immediately before the
        // calculation, so a concurrent worker edit cannot leave a net wage
        // computed from parameters staler than this read.
        let worker = self
            .workers
            .get_by_id(worker_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Worker {} not found", worker_id)))?;

        let total_days = match input.total_days_in_month {
            Some(days) => days,
            None => days_in_month(input.year, input.month)
                .ok_or_else(|| AppError::validation("Invalid month/year period"))?,
        };
        // Omitted attendance means full attendance, which reduces the
        // calculation to the simple base − advance + dues form.
        let days_worked = input.days_worked.unwrap_or(total_days);

        let breakdown = calculator::calculate(&WageInputs {
            base_salary: worker.base_salary,
            overtime_rate_per_hour: worker.overtime_rate_per_hour,
            days_worked,
            total_days_in_month: total_days,
            overtime_hours: input.overtime_hours,
            advance: input.advance,
            dues: input.dues,
        })
        .map_err(|e| AppError::validation(e.to_string()))?;

        let record = MonthlyWage::new(&worker.id, input, days_worked, total_days, &breakdown);
        let stored = self.wages.upsert(&record).await?;

        log::info!(
            "Wage set for worker {} period {}/{}: net {}",
            worker.id,
            stored.month,
            stored.year,
            stored.net_wage
        );

        Ok(stored)
    }

    pub async fn wages_for_period(
        &self,
        month: u32,
        year: i32,
    ) -> Result<Vec<MonthlyWage>, AppError> {
        Ok(self.wages.get_for_period(month, year).await?)
    }

    pub async fn wage_for_worker(
        &self,
        worker_id: &str,
        month: u32,
        year: i32,
    ) -> Result<Option<MonthlyWage>, AppError> {
        Ok(self
            .wages
            .get_for_worker_period(worker_id, month, year)
            .await?)
    }

    pub async fn summary(&self, month: u32, year: i32) -> Result<PayrollSummary, AppError> {
        Ok(self.wages.summary(month, year).await?)
    }

    pub async fn worker(&self, worker_id: &str) -> Result<Option<Worker>, AppError> {
        Ok(self.workers.get_by_id(worker_id).await?)
    }
}
