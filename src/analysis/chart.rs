//! Stacked chart series decimation

use crate::simulation::{MonthlyEntry, StackedChartPoint};

/// Decimate the monthly schedule to every `step_months`-th entry
///
/// The final month is always included as the last sample so the series
/// ends on the horizon. One stacking convention throughout:
/// `total_value = base_equity + appreciation + asset_value`, with debt
/// carried alongside.
pub fn stacked_series(schedule: &[MonthlyEntry], step_months: u32) -> Vec<StackedChartPoint> {
    let step = step_months.max(1);
    let last_index = match schedule.len().checked_sub(1) {
        Some(index) => index,
        None => return Vec::new(),
    };

    schedule
        .iter()
        .enumerate()
        .filter(|(index, _)| *index % step as usize == 0 || *index == last_index)
        .map(|(_, entry)| StackedChartPoint {
            month: entry.month,
            date: entry.date,
            debt: entry.debt_balance,
            base_equity: entry.base_equity,
            appreciation: entry.property_appreciation,
            asset_value: entry.asset_value,
            total_value: entry.base_equity + entry.property_appreciation + entry.asset_value,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn entry(month: u32) -> MonthlyEntry {
        MonthlyEntry {
            month,
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            debt_balance: 300_000.0 - month as f64 * 100.0,
            base_equity: 200_000.0 + month as f64 * 100.0,
            property_appreciation: month as f64 * 50.0,
            asset_held: 2.0,
            asset_value: 120_000.0 + month as f64 * 10.0,
            asset_spot_price: 60_000.0,
            asset_performed_pct: 0.01,
            total_asset: 0.0,
            monthly_payment: 2_000.0,
            net_cash_flow: 500.0,
            asset_sold_monthly: 0.0,
            remaining_asset: 2.0,
            payoff_trigger_met: false,
            can_pay_off: false,
            payoff_amount: 0.0,
            surplus: 0.0,
            trigger_snapshot: None,
        }
    }

    #[test]
    fn test_yearly_decimation_keeps_final_month() {
        let schedule: Vec<_> = (0..360).map(entry).collect();
        let series = stacked_series(&schedule, 12);

        // 30 yearly samples plus the final month
        assert_eq!(series.len(), 31);
        assert_eq!(series[0].month, 0);
        assert_eq!(series[1].month, 12);
        assert_eq!(series.last().unwrap().month, 359);
    }

    #[test]
    fn test_total_value_is_sum_of_components() {
        let schedule: Vec<_> = (0..120).map(entry).collect();
        for point in stacked_series(&schedule, 12) {
            let sum = point.base_equity + point.appreciation + point.asset_value;
            assert!((point.total_value - sum).abs() < 1e-9);
        }
    }

    #[test]
    fn test_empty_schedule_yields_empty_series() {
        assert!(stacked_series(&[], 12).is_empty());
    }

    #[test]
    fn test_zero_step_treated_as_monthly() {
        let schedule: Vec<_> = (0..5).map(entry).collect();
        assert_eq!(stacked_series(&schedule, 0).len(), 5);
    }
}
