//! Closed-form mortgage amortization math
//!
//! Payment, remaining-balance, and interest formulas shared by the
//! simulation driver and the reporting layer. All rates are annual
//! decimals (0.06 = 6%); terms are in years.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Balances below this are treated as fully amortized.
const BALANCE_EPSILON: f64 = 1e-6;

/// Contract violations in loan parameters.
///
/// These indicate a caller error upstream of input validation and are
/// not recovered locally.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MortgageError {
    #[error(
        "invalid loan parameters: principal={principal}, annual_rate={annual_rate}, term_years={term_years}"
    )]
    InvalidLoanParameters {
        principal: f64,
        annual_rate: f64,
        term_years: f64,
    },
}

fn check_parameters(principal: f64, annual_rate: f64, term_years: f64) -> Result<(), MortgageError> {
    if principal <= 0.0 || annual_rate < 0.0 || term_years <= 0.0 {
        return Err(MortgageError::InvalidLoanParameters {
            principal,
            annual_rate,
            term_years,
        });
    }
    Ok(())
}

/// Standard amortizing monthly payment.
///
/// Uses `monthly_rate = annual_rate / 12` and `n = term_years * 12`.
/// Falls back to linear division (`principal / n`) when the rate is zero.
pub fn monthly_payment(principal: f64, annual_rate: f64, term_years: f64) -> Result<f64, MortgageError> {
    check_parameters(principal, annual_rate, term_years)?;

    let n = (term_years * 12.0).round();
    let monthly_rate = annual_rate / 12.0;

    if monthly_rate == 0.0 {
        return Ok(principal / n);
    }

    let growth = (1.0 + monthly_rate).powf(n);
    Ok(principal * monthly_rate * growth / (growth - 1.0))
}

/// Closed-form remaining balance after `payments_made` payments.
///
/// Clamps `payments_made >= n` to a zero balance; `payments_made == 0`
/// returns the full principal.
pub fn remaining_balance(
    principal: f64,
    annual_rate: f64,
    term_years: f64,
    payments_made: u32,
) -> Result<f64, MortgageError> {
    check_parameters(principal, annual_rate, term_years)?;

    let n = (term_years * 12.0).round();
    let k = payments_made as f64;

    if k <= 0.0 {
        return Ok(principal);
    }
    if k >= n {
        return Ok(0.0);
    }

    let monthly_rate = annual_rate / 12.0;
    if monthly_rate == 0.0 {
        return Ok(principal * (1.0 - k / n));
    }

    let growth_n = (1.0 + monthly_rate).powf(n);
    let growth_k = (1.0 + monthly_rate).powf(k);
    let balance = principal * (growth_n - growth_k) / (growth_n - 1.0);

    if balance < BALANCE_EPSILON {
        Ok(0.0)
    } else {
        Ok(balance)
    }
}

/// Total interest paid over the full term.
pub fn total_interest(principal: f64, annual_rate: f64, term_years: f64) -> Result<f64, MortgageError> {
    let payment = monthly_payment(principal, annual_rate, term_years)?;
    let n = (term_years * 12.0).round();
    Ok(payment * n - principal)
}

/// Lifetime interest difference between the current loan and a
/// replacement loan. Positive means the replacement pays less interest.
pub fn interest_saved(
    current_principal: f64,
    current_rate: f64,
    current_term_years: f64,
    new_principal: f64,
    new_rate: f64,
    new_term_years: f64,
) -> Result<f64, MortgageError> {
    let current = total_interest(current_principal, current_rate, current_term_years)?;
    let new = total_interest(new_principal, new_rate, new_term_years)?;
    Ok(current - new)
}

/// Months until closing costs are recovered by the lower payment.
///
/// Returns `f64::INFINITY` when the new payment is not lower.
pub fn break_even_months(current_payment: f64, new_payment: f64, closing_costs: f64) -> f64 {
    let monthly_savings = current_payment - new_payment;
    if monthly_savings <= 0.0 {
        return f64::INFINITY;
    }
    if closing_costs <= 0.0 {
        return 0.0;
    }
    closing_costs / monthly_savings
}

/// One month of a payment schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizedMonth {
    /// Payment number (1-indexed)
    pub month: u32,
    pub payment: f64,
    pub principal_paid: f64,
    pub interest_paid: f64,
    /// Balance after this payment
    pub balance: f64,
}

/// Full per-month principal/interest split over the loan term.
///
/// The final month is guarded so principal paid never exceeds the
/// remaining balance, and residual balances below epsilon clamp to
/// exactly 0.
pub fn generate_schedule(
    principal: f64,
    annual_rate: f64,
    term_years: f64,
) -> Result<Vec<AmortizedMonth>, MortgageError> {
    let payment = monthly_payment(principal, annual_rate, term_years)?;
    let n = (term_years * 12.0).round() as u32;
    let monthly_rate = annual_rate / 12.0;

    let mut schedule = Vec::with_capacity(n as usize);
    let mut balance = principal;

    for month in 1..=n {
        let interest_paid = balance * monthly_rate;
        let principal_paid = (payment - interest_paid).min(balance);

        balance -= principal_paid;
        if balance < BALANCE_EPSILON {
            balance = 0.0;
        }

        schedule.push(AmortizedMonth {
            month,
            payment: principal_paid + interest_paid,
            principal_paid,
            interest_paid,
            balance,
        });
    }

    Ok(schedule)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_monthly_payment_standard() {
        // 200k at 6% over 30 years
        let payment = monthly_payment(200_000.0, 0.06, 30.0).unwrap();
        assert!((payment - 1199.10).abs() < 0.01, "got {}", payment);
    }

    #[test]
    fn test_monthly_payment_zero_rate() {
        let payment = monthly_payment(120_000.0, 0.0, 10.0).unwrap();
        assert_eq!(payment, 1000.0);
    }

    #[test]
    fn test_monthly_payment_rejects_bad_parameters() {
        assert!(monthly_payment(0.0, 0.06, 30.0).is_err());
        assert!(monthly_payment(-1.0, 0.06, 30.0).is_err());
        assert!(monthly_payment(100_000.0, -0.01, 30.0).is_err());
        assert!(monthly_payment(100_000.0, 0.06, 0.0).is_err());
    }

    #[test]
    fn test_remaining_balance_endpoints() {
        let balance = remaining_balance(250_000.0, 0.055, 30.0, 0).unwrap();
        assert_eq!(balance, 250_000.0);

        let balance = remaining_balance(250_000.0, 0.055, 30.0, 360).unwrap();
        assert_relative_eq!(balance, 0.0, epsilon = 1e-6);

        // Clamp beyond term
        let balance = remaining_balance(250_000.0, 0.055, 30.0, 400).unwrap();
        assert_eq!(balance, 0.0);
    }

    #[test]
    fn test_remaining_balance_decreases() {
        let mut prior = f64::INFINITY;
        for k in [0, 12, 60, 180, 300, 359] {
            let balance = remaining_balance(200_000.0, 0.06, 30.0, k).unwrap();
            assert!(balance < prior, "balance not decreasing at {} payments", k);
            prior = balance;
        }
    }

    #[test]
    fn test_remaining_balance_zero_rate_is_linear() {
        let balance = remaining_balance(120_000.0, 0.0, 10.0, 60).unwrap();
        assert_relative_eq!(balance, 60_000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_total_interest() {
        // 30-year 6% loan: interest roughly 1.16x principal
        let interest = total_interest(200_000.0, 0.06, 30.0).unwrap();
        assert!((interest - 231_676.38).abs() < 1.0, "got {}", interest);

        let interest = total_interest(120_000.0, 0.0, 10.0).unwrap();
        assert_relative_eq!(interest, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_break_even_months() {
        assert_relative_eq!(break_even_months(1500.0, 1400.0, 5000.0), 50.0);
        assert_eq!(break_even_months(1400.0, 1500.0, 5000.0), f64::INFINITY);
        assert_eq!(break_even_months(1500.0, 1500.0, 5000.0), f64::INFINITY);
        assert_eq!(break_even_months(1500.0, 1400.0, 0.0), 0.0);
    }

    #[test]
    fn test_schedule_amortizes_to_zero() {
        let schedule = generate_schedule(200_000.0, 0.06, 30.0).unwrap();
        assert_eq!(schedule.len(), 360);
        assert_eq!(schedule.last().unwrap().balance, 0.0);

        // Principal portions must sum back to the loan amount
        let total_principal: f64 = schedule.iter().map(|r| r.principal_paid).sum();
        assert_relative_eq!(total_principal, 200_000.0, epsilon = 1e-4);
    }

    #[test]
    fn test_schedule_interest_share_declines() {
        let schedule = generate_schedule(200_000.0, 0.06, 30.0).unwrap();
        assert!(schedule[0].interest_paid > schedule[180].interest_paid);
        assert!(schedule[180].interest_paid > schedule[350].interest_paid);
    }

    #[test]
    fn test_schedule_matches_closed_form() {
        let schedule = generate_schedule(150_000.0, 0.045, 15.0).unwrap();
        for k in [12, 60, 120] {
            let closed = remaining_balance(150_000.0, 0.045, 15.0, k).unwrap();
            let iterated = schedule[(k - 1) as usize].balance;
            assert!((closed - iterated).abs() < 0.01, "mismatch at {} payments", k);
        }
    }
}
