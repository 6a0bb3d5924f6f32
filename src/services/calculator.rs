//! Pure wage arithmetic. No I/O, no rounding; callers persist or format the
//! result. The simple monthly formula (base − advance + dues) is the
//! degenerate case of full attendance with zero overtime.

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CalculationError {
    #[error("total days in month must be between 1 and 31, got {0}")]
    InvalidTotalDays(i64),

    #[error("days worked ({days_worked}) exceeds total days in month ({total_days})")]
    DaysWorkedExceedsMonth { days_worked: i64, total_days: i64 },

    #[error("days worked must not be negative, got {0}")]
    NegativeDaysWorked(i64),
}

/// Inputs for one worker's wage for one period: the worker's current
/// compensation parameters plus the period's attendance and adjustments.
#[derive(Debug, Clone, Copy)]
pub struct WageInputs {
    pub base_salary: f64,
    pub overtime_rate_per_hour: f64,
    pub days_worked: i64,
    pub total_days_in_month: i64,
    pub overtime_hours: f64,
    pub advance: f64,
    pub dues: f64,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WageBreakdown {
    pub daily_wage: f64,
    pub base_wage_earned: f64,
    pub overtime_wage: f64,
    pub net_wage: f64,
}

/// Pro-rated wage with overtime. Attendance bounds are enforced strictly:
/// out-of-range `days_worked` is rejected, not clamped. Monetary inputs are
/// passed through signed, so a negative net wage (worker owes the company)
/// is a valid result.
pub fn calculate(inputs: &WageInputs) -> Result<WageBreakdown, CalculationError> {
    if !(1..=31).contains(&inputs.total_days_in_month) {
        return Err(CalculationError::InvalidTotalDays(inputs.total_days_in_month));
    }
    if inputs.days_worked < 0 {
        return Err(CalculationError::NegativeDaysWorked(inputs.days_worked));
    }
    if inputs.days_worked > inputs.total_days_in_month {
        return Err(CalculationError::DaysWorkedExceedsMonth {
            days_worked: inputs.days_worked,
            total_days: inputs.total_days_in_month,
        });
    }

    let daily_wage = inputs.base_salary / inputs.total_days_in_month as f64;
    // Full attendance pays the base salary to the paisa; pro-rating
    // multiplies before dividing so the quotient is rounded once.
    let base_wage_earned = if inputs.days_worked == inputs.total_days_in_month {
        inputs.base_salary
    } else {
        inputs.base_salary * inputs.days_worked as f64 / inputs.total_days_in_month as f64
    };
    let overtime_wage = inputs.overtime_hours * inputs.overtime_rate_per_hour;
    let net_wage = base_wage_earned - inputs.advance + inputs.dues + overtime_wage;

    Ok(WageBreakdown {
        daily_wage,
        base_wage_earned,
        overtime_wage,
        net_wage,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn full_attendance(base_salary: f64, advance: f64, dues: f64) -> WageInputs {
        WageInputs {
            base_salary,
            overtime_rate_per_hour: 0.0,
            days_worked: 30,
            total_days_in_month: 30,
            overtime_hours: 0.0,
            advance,
            dues,
        }
    }

    #[test]
    fn simple_form_at_full_attendance() {
        let breakdown = calculate(&full_attendance(20000.0, 2000.0, 500.0)).unwrap();
        assert_eq!(breakdown.net_wage, 18500.0);
    }

    #[test]
    fn full_attendance_reduces_to_simple_form() {
        // Includes bases that do not divide evenly by the month length
        // (30000 / 28 is not exactly representable): the base must still
        // come back untouched.
        for (base_salary, total_days) in
            [(24000.0, 30), (30000.0, 28), (30000.0, 31), (12345.67, 29)]
        {
            let inputs = WageInputs {
                base_salary,
                overtime_rate_per_hour: 150.0,
                days_worked: total_days,
                total_days_in_month: total_days,
                overtime_hours: 0.0,
                advance: 3000.0,
                dues: 750.0,
            };
            let breakdown = calculate(&inputs).unwrap();
            assert_eq!(breakdown.base_wage_earned, base_salary);
            assert_eq!(breakdown.net_wage, base_salary - 3000.0 + 750.0);
        }
    }

    #[test]
    fn pro_rated_with_overtime_worked_example() {
        let inputs = WageInputs {
            base_salary: 30000.0,
            overtime_rate_per_hour: 100.0,
            days_worked: 25,
            total_days_in_month: 30,
            overtime_hours: 4.0,
            advance: 1000.0,
            dues: 0.0,
        };
        let breakdown = calculate(&inputs).unwrap();
        assert_eq!(breakdown.daily_wage, 1000.0);
        assert_eq!(breakdown.base_wage_earned, 25000.0);
        assert_eq!(breakdown.overtime_wage, 400.0);
        assert_eq!(breakdown.net_wage, 24400.0);
    }

    #[test]
    fn net_wage_may_go_negative() {
        let breakdown = calculate(&full_attendance(10000.0, 15000.0, 0.0)).unwrap();
        assert_eq!(breakdown.net_wage, -5000.0);
    }

    #[test]
    fn zero_total_days_is_rejected_not_divided() {
        let mut inputs = full_attendance(20000.0, 0.0, 0.0);
        inputs.total_days_in_month = 0;
        inputs.days_worked = 0;
        assert_eq!(
            calculate(&inputs).unwrap_err(),
            CalculationError::InvalidTotalDays(0)
        );
    }

    #[test]
    fn days_worked_beyond_month_is_rejected() {
        let mut inputs = full_attendance(20000.0, 0.0, 0.0);
        inputs.days_worked = 35;
        assert_eq!(
            calculate(&inputs).unwrap_err(),
            CalculationError::DaysWorkedExceedsMonth {
                days_worked: 35,
                total_days: 30
            }
        );
    }

    #[test]
    fn negative_days_worked_is_rejected() {
        let mut inputs = full_attendance(20000.0, 0.0, 0.0);
        inputs.days_worked = -1;
        assert_eq!(
            calculate(&inputs).unwrap_err(),
            CalculationError::NegativeDaysWorked(-1)
        );
    }

    #[test]
    fn partial_attendance_preserves_precision() {
        // 10000 * 7 / 31 is not representable exactly; the quotient is
        // rounded once and never rounded internally beyond that.
        let inputs = WageInputs {
            base_salary: 10000.0,
            overtime_rate_per_hour: 0.0,
            days_worked: 7,
            total_days_in_month: 31,
            overtime_hours: 0.0,
            advance: 0.0,
            dues: 0.0,
        };
        let breakdown = calculate(&inputs).unwrap();
        assert_eq!(breakdown.net_wage, 10000.0 * 7.0 / 31.0);
    }
}
