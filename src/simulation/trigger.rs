//! Payoff trigger evaluation
//!
//! A pure predicate over one month's asset value and debt balance. The
//! driver evaluates it only while pre-payoff; the first satisfying
//! month executes the payoff, with no hysteresis or multi-month
//! confirmation.

use crate::inputs::{PayoffTrigger, TriggerType};

/// Whether the payoff condition holds at this month's state
pub fn fires(trigger: &PayoffTrigger, asset_value: f64, debt_balance: f64) -> bool {
    match trigger.trigger_type {
        TriggerType::Percentage => asset_value >= debt_balance * (trigger.value / 100.0),
        TriggerType::RetainedAmount => asset_value - debt_balance >= trigger.value,
    }
}
