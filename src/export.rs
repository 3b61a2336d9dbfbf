//! CSV export of simulation output
//!
//! Writes the monthly schedule and the stacked chart series as flat
//! CSV for spreadsheet comparison and downstream reporting.

use std::io::Write;

use crate::simulation::{MonthlyEntry, StackedChartPoint};

/// Write the full monthly schedule as CSV
pub fn write_schedule_csv<W: Write>(
    writer: W,
    schedule: &[MonthlyEntry],
) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record([
        "Month",
        "Date",
        "DebtBalance",
        "BaseEquity",
        "Appreciation",
        "AssetHeld",
        "AssetValue",
        "SpotPrice",
        "PerformedPct",
        "TotalAsset",
        "Payment",
        "NetCashFlow",
        "SoldUnits",
        "RemainingUnits",
        "TriggerMet",
        "CanPayOff",
        "PayoffAmount",
        "Surplus",
    ])?;

    for entry in schedule {
        csv_writer.write_record([
            entry.month.to_string(),
            entry.date.to_string(),
            format!("{:.2}", entry.debt_balance),
            format!("{:.2}", entry.base_equity),
            format!("{:.2}", entry.property_appreciation),
            format!("{:.8}", entry.asset_held),
            format!("{:.2}", entry.asset_value),
            format!("{:.2}", entry.asset_spot_price),
            format!("{:.6}", entry.asset_performed_pct),
            format!("{:.2}", entry.total_asset),
            format!("{:.2}", entry.monthly_payment),
            format!("{:.2}", entry.net_cash_flow),
            format!("{:.8}", entry.asset_sold_monthly),
            format!("{:.8}", entry.remaining_asset),
            entry.payoff_trigger_met.to_string(),
            entry.can_pay_off.to_string(),
            format!("{:.2}", entry.payoff_amount),
            format!("{:.2}", entry.surplus),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Write the decimated stacked chart series as CSV
pub fn write_chart_csv<W: Write>(
    writer: W,
    series: &[StackedChartPoint],
) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record([
        "Month",
        "Date",
        "Debt",
        "BaseEquity",
        "Appreciation",
        "AssetValue",
        "TotalValue",
    ])?;

    for point in series {
        csv_writer.write_record([
            point.month.to_string(),
            point.date.to_string(),
            format!("{:.2}", point.debt),
            format!("{:.2}", point.base_equity),
            format!("{:.2}", point.appreciation),
            format!("{:.2}", point.asset_value),
            format!("{:.2}", point.total_value),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}
