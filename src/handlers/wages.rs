use actix_web::{web, HttpResponse};
use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::{require_admin, Claims};
use crate::currency::format_inr;
use crate::database::models::{MonthlyWageInput, PayrollSummary};
use crate::database::repositories::RoleRepository;
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::services::PayrollService;

/// Period selector shared by the wage list and summary endpoints. Omitted
/// fields default to the current calendar month.
#[derive(Debug, Deserialize)]
pub struct PeriodQuery {
    pub month: Option<u32>,
    pub year: Option<i32>,
}

impl PeriodQuery {
    fn resolve(&self) -> Result<(u32, i32), AppError> {
        let today = Utc::now().date_naive();
        let month = self.month.unwrap_or_else(|| today.month());
        let year = self.year.unwrap_or_else(|| today.year());

        if !(1..=12).contains(&month) {
            return Err(AppError::validation(format!(
                "Month must be between 1 and 12, got {}",
                month
            )));
        }

        Ok((month, year))
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollSummaryView {
    #[serde(flatten)]
    pub summary: PayrollSummary,
    /// en-IN currency strings for direct display.
    pub display: SummaryDisplay,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryDisplay {
    pub total_base_salary: String,
    pub total_advances: String,
    pub total_dues: String,
    pub total_net_wages: String,
}

pub async fn get_monthly_wages(
    claims: Claims,
    role_repo: web::Data<RoleRepository>,
    payroll: web::Data<PayrollService>,
    query: web::Query<PeriodQuery>,
) -> Result<HttpResponse, AppError> {
    require_admin(&claims, &role_repo).await?;

    let (month, year) = query.resolve()?;
    let wages = payroll.wages_for_period(month, year).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(wages)))
}

pub async fn get_payroll_summary(
    claims: Claims,
    role_repo: web::Data<RoleRepository>,
    payroll: web::Data<PayrollService>,
    query: web::Query<PeriodQuery>,
) -> Result<HttpResponse, AppError> {
    require_admin(&claims, &role_repo).await?;

    let (month, year) = query.resolve()?;
    let summary = payroll.summary(month, year).await?;

    let display = SummaryDisplay {
        total_base_salary: format_inr(summary.total_base_salary),
        total_advances: format_inr(summary.total_advances),
        total_dues: format_inr(summary.total_dues),
        total_net_wages: format_inr(summary.total_net_wages),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(PayrollSummaryView { summary, display })))
}

/// Read one worker's ledger row for a period, if set. The wage form uses
/// this to prefill an existing entry.
pub async fn get_worker_wage(
    claims: Claims,
    role_repo: web::Data<RoleRepository>,
    payroll: web::Data<PayrollService>,
    path: web::Path<String>,
    query: web::Query<PeriodQuery>,
) -> Result<HttpResponse, AppError> {
    require_admin(&claims, &role_repo).await?;

    let worker_id = path.into_inner();
    let (month, year) = query.resolve()?;

    // Distinguish "worker unknown" from "no wage set for this period yet".
    if payroll.worker(&worker_id).await?.is_none() {
        return Err(AppError::not_found(format!(
            "Worker {} not found",
            worker_id
        )));
    }

    let wage = payroll.wage_for_worker(&worker_id, month, year).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(wage)))
}

/// Set-monthly-wage: the only way wage rows are created or updated. The net
/// wage is derived server-side from the worker's current parameters; one
/// row per (worker, month, year), replaced on repeat writes.
pub async fn set_monthly_wage(
    claims: Claims,
    role_repo: web::Data<RoleRepository>,
    payroll: web::Data<PayrollService>,
    path: web::Path<String>,
    input: web::Json<MonthlyWageInput>,
) -> Result<HttpResponse, AppError> {
    require_admin(&claims, &role_repo).await?;

    let worker_id = path.into_inner();
    let wage = payroll.set_monthly_wage(&worker_id, &input).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(wage)))
}
