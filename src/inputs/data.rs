//! Request payload data structures for a simulation run
//!
//! The payload arrives as camelCase JSON from an upstream collaborator
//! that has already performed field-level validation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Kind of equity-tapping event being modeled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RefinanceType {
    /// Replace the existing mortgage with a larger one, taking the
    /// difference in cash
    #[serde(rename = "cash-out-refinance")]
    CashOutRefinance,
    /// A separate line of credit on top of the existing mortgage
    #[serde(rename = "heloc")]
    Heloc,
}

/// Price-evolution model for the asset position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    /// Four-phase macro cycle anchored to recurring epoch dates
    Seasonal,
    /// Constant monthly rate derived from the target CAGR
    Steady,
    /// Constant monthly rate from an explicit override
    Custom,
}

/// Severity knob for the seasonal cycle's correction phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Bearish,
    Neutral,
    Bullish,
}

/// Payoff trigger policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerType {
    /// Fires when asset value reaches `value`% of remaining debt
    Percentage,
    /// Fires when asset value minus remaining debt reaches `value` dollars
    RetainedAmount,
}

/// The property being leveraged
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyInputs {
    /// Current market value of the home
    pub current_value: f64,

    /// Annual appreciation rate (decimal)
    pub appreciation_rate: f64,
}

/// The mortgage in place before the equity tap
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentMortgage {
    /// Outstanding balance (0 for a paid-off home)
    pub current_balance: f64,

    /// Annual interest rate (decimal)
    pub interest_rate: f64,

    /// Years remaining on the current loan
    pub remaining_years: f64,
}

/// Monthly income and carrying costs of the property
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyIncome {
    /// Net operating cash flow before carrying costs and loan payments
    pub net_monthly_cash_flow: f64,

    pub monthly_taxes: f64,
    pub monthly_insurance: f64,
    #[serde(rename = "monthlyHOA")]
    pub monthly_hoa: f64,
}

/// The equity-tapping event
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefinanceScenario {
    #[serde(rename = "type")]
    pub scenario_type: RefinanceType,

    /// Cash extracted by the event and available to invest
    pub cash_out_amount: f64,

    /// Principal of the new loan (full refinanced balance, or the HELOC
    /// draw for a HELOC)
    pub new_loan_amount: f64,

    /// Annual interest rate on the new loan (decimal)
    pub new_interest_rate: f64,

    /// Amortization term of the new loan in years
    pub new_loan_term_years: u32,
}

/// Settings for the asset performance model
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceSettings {
    pub model: ModelKind,

    /// Target compound annual growth rate (decimal)
    #[serde(rename = "initialCAGR")]
    pub initial_cagr: f64,

    pub sentiment: Sentiment,

    /// Cap on any single month's loss, as a positive percentage
    /// (e.g. 25.0 limits a month to -25%). None disables the cap.
    #[serde(default)]
    pub max_drawdown_percent: Option<f64>,

    /// Anchor date of the schedule; month `m` falls at this date plus
    /// `m` calendar months
    pub loan_start_date: NaiveDate,

    /// Flat annual rate for the `custom` model; falls back to
    /// `initial_cagr` when absent
    #[serde(default)]
    pub custom_annual_rate: Option<f64>,
}

/// The asset position funded by the equity tap
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetInvestment {
    /// Dollars deployed into the asset at month 0
    pub investment_amount: f64,

    /// Spot price at month 0 (opaque input from the price feed)
    pub current_asset_price: f64,

    pub performance_settings: PerformanceSettings,
}

/// Condition under which accumulated asset value retires the debt
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoffTrigger {
    #[serde(rename = "type")]
    pub trigger_type: TriggerType,

    /// Percentage of debt (percentage trigger) or dollars retained
    /// after payoff (retained-amount trigger)
    pub value: f64,
}

/// Immutable request payload for one simulation run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorInputs {
    pub property: PropertyInputs,
    pub current_mortgage: CurrentMortgage,
    pub property_income: PropertyIncome,
    pub refinance_scenario: RefinanceScenario,
    pub asset_investment: AssetInvestment,
    pub payoff_trigger: PayoffTrigger,
}

impl CalculatorInputs {
    /// Number of months the simulation covers
    pub fn months_in_term(&self) -> u32 {
        self.refinance_scenario.new_loan_term_years * 12
    }

    /// Asset units seeded at month 0
    pub fn initial_asset_units(&self) -> f64 {
        let investment = &self.asset_investment;
        if investment.current_asset_price > 0.0 {
            investment.investment_amount / investment.current_asset_price
        } else {
            0.0
        }
    }

    /// Monthly carrying costs (taxes, insurance, HOA)
    pub fn monthly_carrying_costs(&self) -> f64 {
        let income = &self.property_income;
        income.monthly_taxes + income.monthly_insurance + income.monthly_hoa
    }
}
