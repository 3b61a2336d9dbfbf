//! Scenario runner for efficient batch simulations
//!
//! Builds the engine configuration once, then runs many simulations
//! (different performance settings, or different payloads) without
//! rebuilding it. The engine itself is single-threaded; fan-out across
//! scenarios happens here.

use rayon::prelude::*;

use crate::inputs::{CalculatorInputs, PerformanceSettings};
use crate::mortgage::MortgageError;
use crate::simulation::{SimulationConfig, SimulationEngine, SimulationResult};

/// Pre-configured runner for batches of simulations
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new();
/// for settings in scenarios {
///     let result = runner.run(&inputs_with(settings))?;
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    config: SimulationConfig,
}

impl ScenarioRunner {
    /// Runner with the default engine configuration
    pub fn new() -> Self {
        Self {
            config: SimulationConfig::default(),
        }
    }

    /// Runner with a custom engine configuration
    pub fn with_config(config: SimulationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Run a single simulation
    pub fn run(&self, inputs: &CalculatorInputs) -> Result<SimulationResult, MortgageError> {
        SimulationEngine::new(self.config.clone()).run(inputs)
    }

    /// Run the same payload under several performance settings
    pub fn run_scenarios(
        &self,
        inputs: &CalculatorInputs,
        scenarios: &[PerformanceSettings],
    ) -> Vec<Result<SimulationResult, MortgageError>> {
        scenarios
            .par_iter()
            .map(|settings| {
                let mut scenario_inputs = inputs.clone();
                scenario_inputs.asset_investment.performance_settings = settings.clone();
                self.run(&scenario_inputs)
            })
            .collect()
    }

    /// Run many payloads in parallel
    pub fn run_batch(
        &self,
        batch: &[CalculatorInputs],
    ) -> Vec<Result<SimulationResult, MortgageError>> {
        batch.par_iter().map(|inputs| self.run(inputs)).collect()
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inputs::{
        AssetInvestment, CurrentMortgage, ModelKind, PayoffTrigger, PropertyIncome,
        PropertyInputs, RefinanceScenario, RefinanceType, Sentiment, TriggerType,
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
                    initial_cagr: 0.15,
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

    #[test]
    fn test_scenario_fan_out_preserves_order() {
        let runner = ScenarioRunner::new();
        let inputs = test_inputs();

        let scenarios: Vec<_> = [0.05, 0.15, 0.30]
            .iter()
            .map(|&cagr| PerformanceSettings {
                initial_cagr: cagr,
                ..inputs.asset_investment.performance_settings.clone()
            })
            .collect();

        let results = runner.run_scenarios(&inputs, &scenarios);
        assert_eq!(results.len(), 3);

        let finals: Vec<f64> = results
            .into_iter()
            .map(|r| r.unwrap().performance_summary.final_asset_value)
            .collect();

        // Higher growth must leave a larger final position
        assert!(finals[2] > finals[1]);
        assert!(finals[1] > finals[0]);
    }

    #[test]
    fn test_batch_matches_individual_runs() {
        let runner = ScenarioRunner::new();
        let inputs = test_inputs();

        let single = runner.run(&inputs).unwrap();
        let batch = runner.run_batch(&[inputs.clone(), inputs]);

        for result in batch {
            let result = result.unwrap();
            assert_eq!(
                result.payoff_analysis.trigger_month(),
                single.payoff_analysis.trigger_month()
            );
        }
    }
}
