//! Fixed-rate mortgage arithmetic. Pure functions, no rounding;
//! display formatting is the caller's job.

use crate::error::EngineError;

/// Standard UK first-time-buyer mortgage term
pub const DEFAULT_TERM_YEARS: u32 = 25;

/// Lenders advance at most 4.5x gross annual salary
pub const SALARY_MULTIPLE: f64 = 4.5;

/// Constant monthly repayment for a fixed-rate amortized loan.
///
/// `annual_rate_percent` is a whole percentage: pass 6.0 for 6%. A rate
/// of zero (or below) has no amortization limit and is rejected as
/// `InvalidRate` instead of returning NaN or infinity.
pub fn monthly_payment(
    principal: f64,
    annual_rate_percent: f64,
    term_years: u32,
) -> Result<f64, EngineError> {
    if annual_rate_percent <= 0.0 {
        return Err(EngineError::InvalidRate);
    }
    let r = annual_rate_percent / 100.0 / 12.0;
    let n = (term_years * 12) as i32;
    Ok(principal * r / (1.0 - (1.0 + r).powi(-n)))
}

/// Minimum gross annual salary a lender would accept for a payment.
pub fn required_annual_salary(monthly_payment: f64) -> f64 {
    monthly_payment * 12.0 / SALARY_MULTIPLE
}
