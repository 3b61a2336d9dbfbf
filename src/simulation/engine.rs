//! Core simulation driver for monthly payoff projections
//!
//! A state machine over month index `0..N-1` coupling debt
//! amortization, property appreciation, asset price evolution,
//! shortfall-driven liquidation, and payoff-trigger evaluation. The
//! computation is pure and single-threaded; identical inputs produce
//! identical schedules.

use log::debug;

use crate::analysis;
use crate::inputs::{CalculatorInputs, RefinanceType};
use crate::mortgage::{self, MortgageError};
use crate::performance::{add_months, AssetPerformanceModel, CycleProfile, EpochCalendar};

use super::schedule::{MonthlyEntry, SimulationResult, TriggerSnapshot};
use super::state::{PayoffPhase, SimulationState, TriggerEvent};
use super::trigger;

/// Configuration for a simulation run
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Override the sentiment-derived cycle profile
    pub cycle_profile: Option<CycleProfile>,

    /// Decimation step of the stacked chart series
    pub chart_step_months: u32,

    /// Keep simulating after the payoff executes so the chart and
    /// summary reflect continued asset compounding
    pub continue_after_payoff: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            cycle_profile: None,
            chart_step_months: 12,
            continue_after_payoff: true,
        }
    }
}

/// Main simulation engine
pub struct SimulationEngine {
    config: SimulationConfig,
}

impl SimulationEngine {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    /// Run the full monthly simulation for a request payload
    pub fn run(&self, inputs: &CalculatorInputs) -> Result<SimulationResult, MortgageError> {
        let months = inputs.months_in_term();
        let refi = &inputs.refinance_scenario;

        let new_payment = mortgage::monthly_payment(
            refi.new_loan_amount,
            refi.new_interest_rate,
            refi.new_loan_term_years as f64,
        )?;

        // A paid-off home has no prior payment to displace
        let prior = &inputs.current_mortgage;
        let prior_payment = if prior.current_balance > 0.0 {
            mortgage::monthly_payment(prior.current_balance, prior.interest_rate, prior.remaining_years)?
        } else {
            0.0
        };

        let settings = &inputs.asset_investment.performance_settings;
        let model = match &self.config.cycle_profile {
            Some(profile) => {
                AssetPerformanceModel::new(profile.clone(), EpochCalendar::halving_epochs())
            }
            None => AssetPerformanceModel::from_settings(settings),
        };
        let pct_changes = model.monthly_pct_changes(settings, months);
        let monthly_appreciation = inputs.property.appreciation_rate / 12.0;

        debug!(
            "simulating {} months: payment {:.2} (prior {:.2}), {} asset units",
            months,
            new_payment,
            prior_payment,
            inputs.initial_asset_units()
        );

        let mut state = SimulationState::from_inputs(inputs);
        let mut schedule = Vec::with_capacity(months as usize);

        for month in 0..months {
            let pct_change = pct_changes[month as usize];
            if month > 0 {
                let date = add_months(settings.loan_start_date, month);
                state.advance_month(date, pct_change, monthly_appreciation);
            }

            let entry =
                self.calculate_month(inputs, &mut state, pct_change, new_payment, prior_payment)?;
            schedule.push(entry);

            if !self.config.continue_after_payoff && !state.is_pre_payoff() {
                break;
            }
        }

        let stacked_chart_data =
            analysis::stacked_series(&schedule, self.config.chart_step_months);
        let payoff_analysis =
            analysis::payoff_analysis(state.trigger_event, &schedule, new_payment, months);
        let performance_summary =
            analysis::performance_summary(&schedule, inputs.asset_investment.investment_amount);

        Ok(SimulationResult {
            monthly_schedule: schedule,
            stacked_chart_data,
            payoff_analysis,
            performance_summary,
        })
    }

    /// Calculate one month's snapshot and update state
    fn calculate_month(
        &self,
        inputs: &CalculatorInputs,
        state: &mut SimulationState,
        pct_change: f64,
        new_payment: f64,
        prior_payment: f64,
    ) -> Result<MonthlyEntry, MortgageError> {
        let refi = &inputs.refinance_scenario;
        let month = state.month;

        // Debt amortizes on the closed form until the payoff executes
        let mut debt_balance = match state.phase {
            PayoffPhase::PrePayoff => mortgage::remaining_balance(
                refi.new_loan_amount,
                refi.new_interest_rate,
                refi.new_loan_term_years as f64,
                month,
            )?,
            PayoffPhase::PostPayoff => 0.0,
        };

        // Cash flow net of carrying costs and the payment delta versus
        // the prior loan; a shortfall is funded by selling asset units
        // at the current spot price
        let monthly_payment = match state.phase {
            PayoffPhase::PrePayoff => new_payment,
            PayoffPhase::PostPayoff => 0.0,
        };
        let delta = payment_delta(refi.scenario_type, state.phase, new_payment, prior_payment);
        let net_cash_flow = inputs.property_income.net_monthly_cash_flow
            - inputs.monthly_carrying_costs()
            - delta;

        let asset_held = state.asset_units;
        let mut asset_sold_monthly = 0.0;
        if net_cash_flow < 0.0 && state.spot_price > 0.0 {
            let shortfall = -net_cash_flow;
            // Holdings floor at 0: a deeper shortfall is a reported
            // deficit condition, not an error
            asset_sold_monthly = (shortfall / state.spot_price).min(asset_held);
        }
        let mut remaining_asset = asset_held - asset_sold_monthly;
        let mut asset_value = remaining_asset * state.spot_price;

        // Trigger evaluation, pre-payoff only; fires at most once
        let mut payoff_amount = 0.0;
        let mut surplus = 0.0;
        let mut trigger_snapshot = None;
        let mut can_pay_off = false;

        if state.is_pre_payoff() && trigger::fires(&inputs.payoff_trigger, asset_value, debt_balance)
        {
            let snapshot = TriggerSnapshot {
                asset_value_at_trigger: asset_value,
                debt_balance_at_trigger: debt_balance,
            };

            // Liquidate exactly the debt balance in asset dollars,
            // clamped to the holding for below-par triggers
            let payoff_units = if state.spot_price > 0.0 {
                (debt_balance / state.spot_price).min(remaining_asset)
            } else {
                remaining_asset
            };
            remaining_asset -= payoff_units;
            asset_value = remaining_asset * state.spot_price;

            payoff_amount = debt_balance;
            surplus = asset_value;
            debt_balance = 0.0;
            can_pay_off = true;

            state.phase = PayoffPhase::PostPayoff;
            state.trigger_event = Some(TriggerEvent {
                month,
                date: state.date,
                snapshot,
            });
            trigger_snapshot = Some(snapshot);

            debug!(
                "payoff fired at month {}: retired {:.2}, surplus {:.2}",
                month, payoff_amount, surplus
            );
        }

        // Equity views reflect the post-payoff balance so each entry is
        // internally consistent
        let base_equity = state.property_value - debt_balance;
        let property_appreciation = state.property_value - inputs.property.current_value;
        let total_asset = base_equity + property_appreciation + asset_value;

        state.asset_units = remaining_asset;

        Ok(MonthlyEntry {
            month,
            date: state.date,
            debt_balance,
            base_equity,
            property_appreciation,
            asset_held,
            asset_value,
            asset_spot_price: state.spot_price,
            asset_performed_pct: pct_change,
            total_asset,
            monthly_payment,
            net_cash_flow,
            asset_sold_monthly,
            remaining_asset,
            payoff_trigger_met: state.phase == PayoffPhase::PostPayoff,
            can_pay_off,
            payoff_amount,
            surplus,
            trigger_snapshot,
        })
    }
}

impl Default for SimulationEngine {
    fn default() -> Self {
        Self::new(SimulationConfig::default())
    }
}

/// Monthly payment change versus the pre-event baseline
///
/// A cash-out refinance replaces the old payment; a HELOC payment is
/// additional. Once the payoff executes the new loan is gone, so a
/// refinance run is better off than baseline by the old payment.
fn payment_delta(
    scenario_type: RefinanceType,
    phase: PayoffPhase,
    new_payment: f64,
    prior_payment: f64,
) -> f64 {
    match (scenario_type, phase) {
        (RefinanceType::CashOutRefinance, PayoffPhase::PrePayoff) => new_payment - prior_payment,
        (RefinanceType::CashOutRefinance, PayoffPhase::PostPayoff) => -prior_payment,
        (RefinanceType::Heloc, PayoffPhase::PrePayoff) => new_payment,
        (RefinanceType::Heloc, PayoffPhase::PostPayoff) => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inputs::{
        AssetInvestment, CurrentMortgage, ModelKind, PayoffTrigger, PerformanceSettings,
        PropertyIncome, PropertyInputs, RefinanceScenario, Sentiment, TriggerType,
    };
    use chrono::NaiveDate;

    fn test_inputs() -> CalculatorInputs {
        CalculatorInputs {
            property: PropertyInputs {
                current_value: 500_000.0,
                appreciation_rate: 0.03,
            },
            current_mortgage: CurrentMortgage {
                current_balance: 200_000.0,
                interest_rate: 0.04,
                remaining_years: 22.0,
            },
            property_income: PropertyIncome {
                net_monthly_cash_flow: 3_000.0,
                monthly_taxes: 400.0,
                monthly_insurance: 100.0,
                monthly_hoa: 0.0,
            },
            refinance_scenario: RefinanceScenario {
                scenario_type: RefinanceType::CashOutRefinance,
                cash_out_amount: 150_000.0,
                new_loan_amount: 350_000.0,
                new_interest_rate: 0.065,
                new_loan_term_years: 30,
            },
            asset_investment: AssetInvestment {
                investment_amount: 150_000.0,
                current_asset_price: 60_000.0,
                performance_settings: PerformanceSettings {
                    model: ModelKind::Steady,
                    initial_cagr: 0.20,
                    sentiment: Sentiment::Neutral,
                    max_drawdown_percent: None,
                    loan_start_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
                    custom_annual_rate: None,
                },
            },
            payoff_trigger: PayoffTrigger {
                trigger_type: TriggerType::Percentage,
                value: 200.0,
            },
        }
    }

    fn run(inputs: &CalculatorInputs) -> SimulationResult {
        SimulationEngine::default().run(inputs).unwrap()
    }

    #[test]
    fn test_schedule_covers_full_term() {
        let result = run(&test_inputs());
        assert_eq!(result.monthly_schedule.len(), 360);
        assert_eq!(result.monthly_schedule[0].month, 0);
        assert_eq!(result.monthly_schedule[359].month, 359);
    }

    #[test]
    fn test_debt_non_increasing_until_payoff() {
        let result = run(&test_inputs());
        let mut prior = f64::INFINITY;
        for entry in &result.monthly_schedule {
            assert!(
                entry.debt_balance <= prior + 1e-9,
                "debt increased at month {}",
                entry.month
            );
            prior = entry.debt_balance;
            if entry.can_pay_off {
                break;
            }
        }
    }

    #[test]
    fn test_total_asset_identity() {
        let result = run(&test_inputs());
        for entry in &result.monthly_schedule {
            let sum = entry.base_equity + entry.property_appreciation + entry.asset_value;
            assert!(
                (entry.total_asset - sum).abs() < 1e-6,
                "identity broken at month {}",
                entry.month
            );
        }
    }

    #[test]
    fn test_trigger_fires_at_first_satisfying_month() {
        let result = run(&test_inputs());
        let trigger_month = result
            .payoff_analysis
            .trigger_month()
            .expect("20% CAGR over 30 years must reach 200% of debt");

        for entry in &result.monthly_schedule {
            if entry.month < trigger_month {
                // Strictly below the threshold every earlier month
                assert!(
                    entry.asset_value < entry.debt_balance * 2.0,
                    "trigger should have fired at month {}",
                    entry.month
                );
                assert!(!entry.payoff_trigger_met);
                assert!(!entry.can_pay_off);
            }
        }

        let fired = &result.monthly_schedule[trigger_month as usize];
        assert!(fired.can_pay_off);
        assert!(fired.payoff_trigger_met);
        assert!(fired.payoff_amount > 0.0);
        let snapshot = fired.trigger_snapshot.expect("snapshot on execution month");
        assert!(snapshot.asset_value_at_trigger >= snapshot.debt_balance_at_trigger * 2.0);
    }

    #[test]
    fn test_payoff_fires_exactly_once_and_debt_stays_zero() {
        let result = run(&test_inputs());
        let executions = result
            .monthly_schedule
            .iter()
            .filter(|e| e.can_pay_off)
            .count();
        assert_eq!(executions, 1);

        let trigger_month = result.payoff_analysis.trigger_month().unwrap();
        for entry in &result.monthly_schedule {
            if entry.month >= trigger_month {
                assert_eq!(entry.debt_balance, 0.0);
                assert!(entry.payoff_trigger_met);
            }
            if entry.month > trigger_month {
                assert_eq!(entry.monthly_payment, 0.0);
            }
            // Snapshot appears only on the execution month
            assert_eq!(entry.trigger_snapshot.is_some(), entry.month == trigger_month);
        }

        // The horizon still runs to term with the asset compounding on
        assert_eq!(result.monthly_schedule.len(), 360);
        let last = result.monthly_schedule.last().unwrap();
        assert!(last.asset_value > 0.0);
    }

    #[test]
    fn test_never_fired_trigger_reports_as_data() {
        let mut inputs = test_inputs();
        inputs.payoff_trigger = PayoffTrigger {
            trigger_type: TriggerType::RetainedAmount,
            value: 1.0e12,
        };

        let result = run(&inputs);
        assert!(!result.payoff_analysis.fired());
        assert_eq!(result.monthly_schedule.len(), 360);
        for entry in &result.monthly_schedule {
            assert!(!entry.can_pay_off);
            assert!(!entry.payoff_trigger_met);
        }
        // Debt is still amortizing at the final month of the term
        assert!(result.monthly_schedule.last().unwrap().debt_balance > 0.0);
    }

    #[test]
    fn test_shortfall_liquidation_clamps_at_zero() {
        let mut inputs = test_inputs();
        // Deep negative carry against a tiny position
        inputs.property_income.net_monthly_cash_flow = -10_000.0;
        inputs.asset_investment.investment_amount = 30_000.0;
        inputs.payoff_trigger.value = 1.0e9;

        let result = run(&inputs);
        let mut exhausted = false;
        for entry in &result.monthly_schedule {
            assert!(entry.remaining_asset >= 0.0, "negative holding at month {}", entry.month);
            assert!(entry.asset_sold_monthly >= 0.0);
            if entry.remaining_asset == 0.0 {
                exhausted = true;
            }
            if exhausted {
                assert_eq!(entry.remaining_asset, 0.0);
            }
        }
        assert!(exhausted, "position should run out under this carry");
        assert_eq!(result.monthly_schedule.len(), 360);
    }

    #[test]
    fn test_asset_units_never_increase() {
        let result = run(&test_inputs());
        let mut prior = f64::INFINITY;
        for entry in &result.monthly_schedule {
            assert!(entry.remaining_asset <= prior + 1e-12);
            prior = entry.remaining_asset;
        }
    }

    #[test]
    fn test_stop_after_payoff_truncates_schedule() {
        let config = SimulationConfig {
            continue_after_payoff: false,
            ..Default::default()
        };
        let result = SimulationEngine::new(config).run(&test_inputs()).unwrap();
        let last = result.monthly_schedule.last().unwrap();
        assert!(last.can_pay_off);
        assert!(result.monthly_schedule.len() < 360);
    }

    #[test]
    fn test_determinism() {
        let a = serde_json::to_string(&run(&test_inputs())).unwrap();
        let b = serde_json::to_string(&run(&test_inputs())).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_loan_parameters_propagate() {
        let mut inputs = test_inputs();
        inputs.refinance_scenario.new_loan_amount = 0.0;
        assert!(SimulationEngine::default().run(&inputs).is_err());
    }
}
