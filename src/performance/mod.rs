//! Cyclical asset performance model
//!
//! Maps each month of the simulation horizon to a deterministic signed
//! percentage price change. The seasonal model walks the epoch-anchored
//! macro cycle; the steady and custom models compound a flat annual
//! rate. Entry 0 is always 0: the first reported month is the anchor
//! and carries no change.

mod cycle;

pub use cycle::{add_months, months_between, CyclePhase, CycleProfile, EpochCalendar, PhaseFactors};

use crate::inputs::{ModelKind, PerformanceSettings};

/// Deterministic per-month price-change generator
#[derive(Debug, Clone)]
pub struct AssetPerformanceModel {
    profile: CycleProfile,
    epochs: EpochCalendar,
}

impl AssetPerformanceModel {
    /// Model with an explicit cycle profile and epoch calendar
    pub fn new(profile: CycleProfile, epochs: EpochCalendar) -> Self {
        Self { profile, epochs }
    }

    /// Model configured from request settings: sentiment selects the
    /// cycle severity, epochs default to the asset's halving calendar
    pub fn from_settings(settings: &PerformanceSettings) -> Self {
        Self {
            profile: CycleProfile::for_sentiment(settings.sentiment),
            epochs: EpochCalendar::halving_epochs(),
        }
    }

    pub fn profile(&self) -> &CycleProfile {
        &self.profile
    }

    /// Signed monthly price changes for `months` entries
    ///
    /// The model variant is dispatched once per run; the optional
    /// drawdown cap then clamps any single month's loss.
    pub fn monthly_pct_changes(&self, settings: &PerformanceSettings, months: u32) -> Vec<f64> {
        let mut changes = match settings.model {
            ModelKind::Seasonal => self.seasonal_changes(settings, months),
            ModelKind::Steady => flat_changes(settings.initial_cagr, months),
            ModelKind::Custom => {
                let annual = settings.custom_annual_rate.unwrap_or(settings.initial_cagr);
                flat_changes(annual, months)
            }
        };

        if let Some(max_drawdown) = settings.max_drawdown_percent {
            let floor = -(max_drawdown.abs() / 100.0);
            for change in changes.iter_mut() {
                if *change < floor {
                    *change = floor;
                }
            }
        }

        changes
    }

    fn seasonal_changes(&self, settings: &PerformanceSettings, months: u32) -> Vec<f64> {
        let factors = self.profile.phase_factors(settings.initial_cagr);
        let cycle_months = self.profile.cycle_months();

        (0..months)
            .map(|m| {
                if m == 0 {
                    return 0.0;
                }
                let date = add_months(settings.loan_start_date, m);
                let offset = self.epochs.cycle_offset(date, cycle_months);
                let phase = self.profile.phase_at(offset);
                factors.factor(phase) - 1.0
            })
            .collect()
    }
}

/// Constant monthly change compounding to a flat annual rate
fn flat_changes(annual_rate: f64, months: u32) -> Vec<f64> {
    let monthly = (1.0 + annual_rate).powf(1.0 / 12.0) - 1.0;
    (0..months).map(|m| if m == 0 { 0.0 } else { monthly }).collect()
}
