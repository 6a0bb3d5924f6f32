pub mod calculator;
pub mod payroll;

pub use payroll::PayrollService;
