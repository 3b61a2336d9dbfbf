//! Simulation state tracking for a single run

use chrono::NaiveDate;

use crate::inputs::CalculatorInputs;
use super::schedule::TriggerSnapshot;

/// Payoff lifecycle of the run
///
/// `PostPayoff` is terminal: once entered, debt stays retired and the
/// trigger is never evaluated again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayoffPhase {
    PrePayoff,
    PostPayoff,
}

/// The trigger event, recorded once when the payoff executes
#[derive(Debug, Clone, Copy)]
pub struct TriggerEvent {
    pub month: u32,
    pub date: NaiveDate,
    pub snapshot: TriggerSnapshot,
}

/// State carried between months of a simulation
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// Current month index (0 = anchor)
    pub month: u32,
    pub date: NaiveDate,

    /// Property value at this month
    pub property_value: f64,

    /// Asset spot price at this month
    pub spot_price: f64,

    /// Asset units held entering the month
    pub asset_units: f64,

    pub phase: PayoffPhase,

    /// Set once, the month the payoff executes
    pub trigger_event: Option<TriggerEvent>,
}

impl SimulationState {
    /// Seed state at month 0 from the request payload
    pub fn from_inputs(inputs: &CalculatorInputs) -> Self {
        Self {
            month: 0,
            date: inputs.asset_investment.performance_settings.loan_start_date,
            property_value: inputs.property.current_value,
            spot_price: inputs.asset_investment.current_asset_price,
            asset_units: inputs.initial_asset_units(),
            phase: PayoffPhase::PrePayoff,
            trigger_event: None,
        }
    }

    /// Advance to the next month: appreciate the property and apply the
    /// month's price change to the spot price
    pub fn advance_month(&mut self, date: NaiveDate, pct_change: f64, monthly_appreciation: f64) {
        self.month += 1;
        self.date = date;
        self.property_value *= 1.0 + monthly_appreciation;
        self.spot_price *= 1.0 + pct_change;
    }

    pub fn is_pre_payoff(&self) -> bool {
        self.phase == PayoffPhase::PrePayoff
    }
}
