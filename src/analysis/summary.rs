//! Final performance summary and payoff analysis

use crate::simulation::{MonthlyEntry, PayoffAnalysis, PerformanceSummary, TriggerEvent};

/// CAGR implied by a total return over a horizon in years
///
/// Degenerate horizons and total losses report 0 and -1 rather than
/// NaN so the summary is always well-formed.
pub fn annualized_return(total_roi: f64, years: f64) -> f64 {
    if years <= 0.0 {
        return 0.0;
    }
    if total_roi <= -1.0 {
        return -1.0;
    }
    (1.0 + total_roi).powf(1.0 / years) - 1.0
}

/// Final figures read from the last schedule entry
pub fn performance_summary(schedule: &[MonthlyEntry], investment_amount: f64) -> PerformanceSummary {
    let last = match schedule.last() {
        Some(entry) => entry,
        None => {
            return PerformanceSummary {
                final_total_asset: 0.0,
                final_property_value: 0.0,
                final_asset_value: 0.0,
                total_roi: 0.0,
                annualized_return: 0.0,
            }
        }
    };

    let final_total_asset = last.total_asset;
    let total_roi = if investment_amount > 0.0 {
        (final_total_asset - investment_amount) / investment_amount
    } else {
        0.0
    };
    let years = schedule.len() as f64 / 12.0;

    PerformanceSummary {
        final_total_asset,
        final_property_value: last.base_equity + last.debt_balance,
        final_asset_value: last.asset_value,
        total_roi,
        annualized_return: annualized_return(total_roi, years),
    }
}

/// Fold the recorded trigger event into the result's payoff analysis
///
/// Interest saved is the scheduled interest the remaining payments
/// would have carried: payments avoided minus the principal retired.
pub fn payoff_analysis(
    event: Option<TriggerEvent>,
    schedule: &[MonthlyEntry],
    monthly_payment: f64,
    term_months: u32,
) -> PayoffAnalysis {
    match event {
        None => PayoffAnalysis::NeverFired,
        Some(event) => {
            let remaining_months = term_months.saturating_sub(event.month) as f64;
            let interest_saved =
                monthly_payment * remaining_months - event.snapshot.debt_balance_at_trigger;
            let final_asset_retained = schedule.last().map(|e| e.asset_value).unwrap_or(0.0);

            PayoffAnalysis::Fired {
                trigger_month: event.month,
                trigger_date: event.date,
                asset_value_at_trigger: event.snapshot.asset_value_at_trigger,
                debt_at_trigger: event.snapshot.debt_balance_at_trigger,
                interest_saved,
                final_asset_retained,
            }
        }
    }
}
