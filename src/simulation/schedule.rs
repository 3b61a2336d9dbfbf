//! Monthly schedule and result payload structures

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One-time snapshot captured the month the payoff executes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerSnapshot {
    /// Asset value at evaluation, before the payoff liquidation
    pub asset_value_at_trigger: f64,
    /// Debt balance retired by the payoff
    pub debt_balance_at_trigger: f64,
}

/// One simulated month
///
/// Entries are append-only: produced exactly once per month and never
/// mutated afterward.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyEntry {
    /// Month index (0 = anchor month)
    pub month: u32,
    pub date: NaiveDate,

    /// Remaining loan balance after this month's payoff handling
    pub debt_balance: f64,
    /// Property value minus remaining debt
    pub base_equity: f64,
    /// Property value growth since month 0
    pub property_appreciation: f64,

    /// Asset units held entering the month
    pub asset_held: f64,
    /// Dollar value of the holding after this month's sales
    pub asset_value: f64,
    pub asset_spot_price: f64,
    /// Signed price change applied this month
    pub asset_performed_pct: f64,

    /// base_equity + property_appreciation + asset_value
    pub total_asset: f64,

    /// Loan payment due this month (0 once the loan is retired)
    pub monthly_payment: f64,
    /// Property cash flow net of carrying costs and the payment delta
    pub net_cash_flow: f64,
    /// Units liquidated to cover this month's shortfall
    pub asset_sold_monthly: f64,
    /// Units held after all of this month's sales
    pub remaining_asset: f64,

    /// True from the month the trigger fires onward
    pub payoff_trigger_met: bool,
    /// True only on the month the payoff executes
    pub can_pay_off: bool,
    /// Debt retired this month (nonzero only on the execution month)
    pub payoff_amount: f64,
    /// Asset dollars carried past the payoff execution
    pub surplus: f64,

    /// Present only on the execution month
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger_snapshot: Option<TriggerSnapshot>,
}

/// Decimated point of the stacked chart series
///
/// `total_value` is always the sum of the three stacked components;
/// debt is carried alongside, not stacked.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StackedChartPoint {
    pub month: u32,
    pub date: NaiveDate,
    pub debt: f64,
    pub base_equity: f64,
    pub appreciation: f64,
    pub asset_value: f64,
    pub total_value: f64,
}

/// Outcome of the payoff trigger over the whole schedule
///
/// The trigger fires at most once, so the result is a tagged union
/// rather than a bundle of nullable fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum PayoffAnalysis {
    NeverFired,
    #[serde(rename_all = "camelCase")]
    Fired {
        trigger_month: u32,
        trigger_date: NaiveDate,
        asset_value_at_trigger: f64,
        debt_at_trigger: f64,
        /// Scheduled interest avoided by retiring the loan early
        interest_saved: f64,
        /// Asset value at the end of the horizon
        final_asset_retained: f64,
    },
}

impl PayoffAnalysis {
    pub fn fired(&self) -> bool {
        matches!(self, PayoffAnalysis::Fired { .. })
    }

    pub fn trigger_month(&self) -> Option<u32> {
        match self {
            PayoffAnalysis::Fired { trigger_month, .. } => Some(*trigger_month),
            PayoffAnalysis::NeverFired => None,
        }
    }
}

/// Final performance figures over the horizon
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceSummary {
    pub final_total_asset: f64,
    pub final_property_value: f64,
    pub final_asset_value: f64,
    /// (final_total_asset - investment) / investment
    pub total_roi: f64,
    /// CAGR implied by total_roi over the simulated horizon
    pub annualized_return: f64,
}

/// Complete result payload of one simulation run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    pub monthly_schedule: Vec<MonthlyEntry>,
    pub stacked_chart_data: Vec<StackedChartPoint>,
    pub payoff_analysis: PayoffAnalysis,
    pub performance_summary: PerformanceSummary,
}
