//! Compare payoff outcomes across performance scenarios
//!
//! Runs the same payload under a grid of sentiment and CAGR settings
//! and prints a side-by-side table of trigger timing and final value.
//!
//! Usage: cargo run --bin compare_scenarios

use equity_payoff::inputs::{
    AssetInvestment, CalculatorInputs, CurrentMortgage, ModelKind, PayoffTrigger,
    PerformanceSettings, PropertyIncome, PropertyInputs, RefinanceScenario, RefinanceType,
    Sentiment, TriggerType,
};
use equity_payoff::simulation::PayoffAnalysis;
use equity_payoff::ScenarioRunner;

fn main() {
    env_logger::init();

    let inputs = demo_inputs();
    let runner = ScenarioRunner::new();

    let sentiments = [Sentiment::Bearish, Sentiment::Neutral, Sentiment::Bullish];
    let cagrs = [0.15, 0.25, 0.40];

    let mut scenarios = Vec::new();
    for &sentiment in &sentiments {
        for &cagr in &cagrs {
            scenarios.push(PerformanceSettings {
                sentiment,
                initial_cagr: cagr,
                ..inputs.asset_investment.performance_settings.clone()
            });
        }
    }

    let results = runner.run_scenarios(&inputs, &scenarios);

    println!("Scenario Comparison ({} runs)", results.len());
    println!("{:>10} {:>6} {:>12} {:>16} {:>16} {:>10}",
        "Sentiment", "CAGR", "TriggerMonth", "InterestSaved", "FinalAsset", "ROI");
    println!("{}", "-".repeat(76));

    for (settings, result) in scenarios.iter().zip(results) {
        let result = match result {
            Ok(result) => result,
            Err(err) => {
                eprintln!("scenario failed: {}", err);
                continue;
            }
        };

        let (trigger_month, interest_saved) = match result.payoff_analysis {
            PayoffAnalysis::Fired {
                trigger_month,
                interest_saved,
                ..
            } => (trigger_month.to_string(), format!("{:.2}", interest_saved)),
            PayoffAnalysis::NeverFired => ("never".to_string(), "-".to_string()),
        };

        println!("{:>10} {:>6.2} {:>12} {:>16} {:>16.2} {:>9.1}%",
            format!("{:?}", settings.sentiment),
            settings.initial_cagr,
            trigger_month,
            interest_saved,
            result.performance_summary.final_asset_value,
            result.performance_summary.total_roi * 100.0,
        );
    }
}

/// Same demo payload as the main CLI
fn demo_inputs() -> CalculatorInputs {
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
            net_monthly_cash_flow: 3_200.0,
            monthly_taxes: 450.0,
            monthly_insurance: 120.0,
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
                model: ModelKind::Seasonal,
                initial_cagr: 0.25,
                sentiment: Sentiment::Neutral,
                max_drawdown_percent: None,
                loan_start_date: chrono::NaiveDate::from_ymd_opt(2024, 6, 1)
                    .expect("valid demo date"),
                custom_annual_rate: None,
            },
        },
        payoff_trigger: PayoffTrigger {
            trigger_type: TriggerType::Percentage,
            value: 200.0,
        },
    }
}
