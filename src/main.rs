//! Equity Payoff CLI
//!
//! Command-line interface for running a payoff simulation from a JSON
//! request payload (or a built-in demo scenario) and printing the
//! schedule, milestones, and summary.

use std::fs::File;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::info;

use equity_payoff::inputs::{
    load_inputs, AssetInvestment, CalculatorInputs, CurrentMortgage, ModelKind, PayoffTrigger,
    PerformanceSettings, PropertyIncome, PropertyInputs, RefinanceScenario, RefinanceType,
    Sentiment, TriggerType,
};
use equity_payoff::simulation::PayoffAnalysis;
use equity_payoff::{export, mortgage, SimulationEngine};

#[derive(Debug, Parser)]
#[command(name = "equity_payoff", about = "Run an equity-tapped mortgage payoff simulation")]
struct Cli {
    /// JSON request payload; runs a built-in demo scenario when omitted
    #[arg(long)]
    input: Option<PathBuf>,

    /// Months of the schedule printed to the console
    #[arg(long, default_value_t = 24)]
    months_shown: usize,

    /// Write the full monthly schedule to this CSV path
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write the stacked chart series to this CSV path
    #[arg(long)]
    chart_csv: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    println!("Equity Payoff v0.1.0");
    println!("====================\n");

    let inputs = match &cli.input {
        Some(path) => load_inputs(path).with_context(|| format!("loading {}", path.display()))?,
        None => demo_inputs(),
    };

    println!("Scenario: {:?}", inputs.refinance_scenario.scenario_type);
    println!("  Property Value: ${:.2}", inputs.property.current_value);
    println!("  New Loan: ${:.2} at {:.2}% over {} years",
        inputs.refinance_scenario.new_loan_amount,
        inputs.refinance_scenario.new_interest_rate * 100.0,
        inputs.refinance_scenario.new_loan_term_years);
    println!("  Investment: ${:.2} at spot ${:.2} ({:?} model, {:?})",
        inputs.asset_investment.investment_amount,
        inputs.asset_investment.current_asset_price,
        inputs.asset_investment.performance_settings.model,
        inputs.asset_investment.performance_settings.sentiment);
    println!("  Trigger: {:?} at {}", inputs.payoff_trigger.trigger_type, inputs.payoff_trigger.value);

    // Loan comparison versus the prior mortgage
    let refi = &inputs.refinance_scenario;
    let new_payment = mortgage::monthly_payment(
        refi.new_loan_amount,
        refi.new_interest_rate,
        refi.new_loan_term_years as f64,
    )?;
    let prior = &inputs.current_mortgage;
    if prior.current_balance > 0.0 {
        let prior_payment =
            mortgage::monthly_payment(prior.current_balance, prior.interest_rate, prior.remaining_years)?;
        let interest_delta = mortgage::interest_saved(
            prior.current_balance,
            prior.interest_rate,
            prior.remaining_years,
            refi.new_loan_amount,
            refi.new_interest_rate,
            refi.new_loan_term_years as f64,
        )?;
        println!("  New Payment: ${:.2}/mo (prior ${:.2}/mo)", new_payment, prior_payment);
        println!("  Lifetime Interest Delta: ${:.2}", -interest_delta);
    } else {
        println!("  New Payment: ${:.2}/mo", new_payment);
    }
    println!();

    let engine = SimulationEngine::default();
    let result = engine.run(&inputs)?;
    info!("simulation produced {} months", result.monthly_schedule.len());

    // Print header
    println!("Simulation Results ({} months):", result.monthly_schedule.len());
    println!("{:>5} {:>10} {:>14} {:>14} {:>14} {:>12} {:>12} {:>10}",
        "Month", "Date", "Debt", "AssetValue", "TotalAsset", "NetCF", "SoldUnits", "Payoff");
    println!("{}", "-".repeat(100));

    for entry in result.monthly_schedule.iter().take(cli.months_shown) {
        println!("{:>5} {:>10} {:>14.2} {:>14.2} {:>14.2} {:>12.2} {:>12.6} {:>10}",
            entry.month,
            entry.date.to_string(),
            entry.debt_balance,
            entry.asset_value,
            entry.total_asset,
            entry.net_cash_flow,
            entry.asset_sold_monthly,
            if entry.can_pay_off { "YES" } else { "" },
        );
    }

    if result.monthly_schedule.len() > cli.months_shown {
        println!("... ({} more months)", result.monthly_schedule.len() - cli.months_shown);
    }

    if let Some(path) = &cli.csv {
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        export::write_schedule_csv(file, &result.monthly_schedule)?;
        println!("\nFull schedule written to: {}", path.display());
    }

    if let Some(path) = &cli.chart_csv {
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        export::write_chart_csv(file, &result.stacked_chart_data)?;
        println!("Chart series written to: {}", path.display());
    }

    // Payoff analysis
    println!("\nPayoff Analysis:");
    match &result.payoff_analysis {
        PayoffAnalysis::NeverFired => {
            println!("  Trigger never fired within the loan term");
        }
        PayoffAnalysis::Fired {
            trigger_month,
            trigger_date,
            asset_value_at_trigger,
            debt_at_trigger,
            interest_saved,
            final_asset_retained,
        } => {
            println!("  Trigger Month: {} ({})", trigger_month, trigger_date);
            println!("  Asset Value at Trigger: ${:.2}", asset_value_at_trigger);
            println!("  Debt Retired: ${:.2}", debt_at_trigger);
            println!("  Interest Saved: ${:.2}", interest_saved);
            println!("  Final Asset Retained: ${:.2}", final_asset_retained);
        }
    }

    // Summary
    let summary = &result.performance_summary;
    println!("\nSummary:");
    println!("  Final Total Asset: ${:.2}", summary.final_total_asset);
    println!("  Final Property Value: ${:.2}", summary.final_property_value);
    println!("  Final Asset Value: ${:.2}", summary.final_asset_value);
    println!("  Total ROI: {:.2}%", summary.total_roi * 100.0);
    println!("  Annualized Return: {:.2}%", summary.annualized_return * 100.0);

    // Key milestone months for spreadsheet comparison
    println!("\nKey Milestones:");
    let milestones = [1, 12, 24, 48, 60, 120, 240];
    for &m in &milestones {
        if let Some(entry) = result.monthly_schedule.get(m) {
            println!("  Month {:>3}: Debt={:.2} Asset={:.2} Spot={:.2} NetCF={:.2}",
                m, entry.debt_balance, entry.asset_value, entry.asset_spot_price, entry.net_cash_flow);
        }
    }

    Ok(())
}

/// Demo payload: a 500k rental refinanced to pull 150k into the asset
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
