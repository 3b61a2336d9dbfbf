//! Four-phase macro cycle calendar
//!
//! The asset's price path is modeled as a repeating 48-month cycle
//! (boom, sharp correction, consolidation, recovery) phase-locked to a
//! recurring epoch event, rather than i.i.d. monthly compounding. The
//! epoch dates and phase lengths are immutable configuration injected
//! into the performance model.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::inputs::Sentiment;

/// Phase of the macro cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CyclePhase {
    /// Boom run-up
    Summer,
    /// Sharp correction
    Fall,
    /// Flat consolidation
    Winter,
    /// Recovery
    Spring,
}

/// Phase lengths and gain attribution for one cycle
///
/// `summer_share`/`spring_share` split the non-fall compounded gain
/// between the run-up and the recovery. They are calibrated policy
/// constants, not derived quantities, and must sum to 1.
#[derive(Debug, Clone)]
pub struct CycleProfile {
    pub summer_months: u32,
    pub fall_months: u32,
    pub winter_months: u32,
    pub spring_months: u32,

    /// Fraction of value retained through the fall phase
    /// (0.30 = a 70% peak-to-trough drop)
    pub target_fall_factor: f64,

    pub summer_share: f64,
    pub spring_share: f64,
}

impl Default for CycleProfile {
    fn default() -> Self {
        Self {
            summer_months: 18,
            fall_months: 12,
            winter_months: 6,
            spring_months: 6,
            target_fall_factor: 0.30,
            summer_share: 0.65,
            spring_share: 0.35,
        }
    }
}

impl CycleProfile {
    /// Profile with the fall severity selected by sentiment
    pub fn for_sentiment(sentiment: Sentiment) -> Self {
        let target_fall_factor = match sentiment {
            Sentiment::Bearish => 0.20,
            Sentiment::Neutral => 0.30,
            Sentiment::Bullish => 0.40,
        };
        Self {
            target_fall_factor,
            ..Self::default()
        }
    }

    /// Total cycle length in months
    pub fn cycle_months(&self) -> u32 {
        self.summer_months + self.fall_months + self.winter_months + self.spring_months
    }

    /// Classify a cycle offset (months since the anchoring epoch,
    /// already reduced modulo the cycle length) into its phase
    pub fn phase_at(&self, cycle_offset: u32) -> CyclePhase {
        let fall_end = self.summer_months + self.fall_months;
        let winter_end = fall_end + self.winter_months;

        if cycle_offset < self.summer_months {
            CyclePhase::Summer
        } else if cycle_offset < fall_end {
            CyclePhase::Fall
        } else if cycle_offset < winter_end {
            CyclePhase::Winter
        } else {
            CyclePhase::Spring
        }
    }

    /// Per-month price factors for each phase, given a target annual
    /// return over the cycle
    ///
    /// The whole cycle compounds to `(1 + r)^4`: the fall phase
    /// multiplies to `target_fall_factor`, winter is flat, and the
    /// remaining gain is split between summer and spring by share.
    pub fn phase_factors(&self, annual_return: f64) -> PhaseFactors {
        let cycle_years = self.cycle_months() as f64 / 12.0;
        let cycle_return = (1.0 + annual_return).powf(cycle_years);
        let net_gain_factor = cycle_return / self.target_fall_factor;

        PhaseFactors {
            summer: net_gain_factor.powf(self.summer_share / self.summer_months as f64),
            fall: self.target_fall_factor.powf(1.0 / self.fall_months as f64),
            winter: 1.0,
            spring: net_gain_factor.powf(self.spring_share / self.spring_months as f64),
        }
    }
}

/// Monthly price factor per phase
#[derive(Debug, Clone, Copy)]
pub struct PhaseFactors {
    pub summer: f64,
    pub fall: f64,
    pub winter: f64,
    pub spring: f64,
}

impl PhaseFactors {
    pub fn factor(&self, phase: CyclePhase) -> f64 {
        match phase {
            CyclePhase::Summer => self.summer,
            CyclePhase::Fall => self.fall,
            CyclePhase::Winter => self.winter,
            CyclePhase::Spring => self.spring,
        }
    }
}

/// Recurring epoch dates anchoring the cycle
///
/// Dates are kept sorted. To extend the calendar past the last known
/// event, append future dates via [`EpochCalendar::with_epochs`]; offsets
/// past the last epoch keep counting forward, so the cycle continues to
/// repeat either way.
#[derive(Debug, Clone)]
pub struct EpochCalendar {
    epochs: Vec<NaiveDate>,
}

impl EpochCalendar {
    /// The halving dates of the modeled asset
    pub fn halving_epochs() -> Self {
        let epochs = [
            (2012, 11, 28),
            (2016, 7, 9),
            (2020, 5, 11),
            (2024, 4, 19),
        ]
        .iter()
        .filter_map(|&(y, m, d)| NaiveDate::from_ymd_opt(y, m, d))
        .collect();
        Self { epochs }
    }

    /// Calendar from explicit epoch dates
    pub fn with_epochs(mut epochs: Vec<NaiveDate>) -> Self {
        epochs.sort_unstable();
        Self { epochs }
    }

    /// Most recent epoch at or before `date`, falling back to the first
    /// known epoch for dates that precede the calendar
    fn anchor_for(&self, date: NaiveDate) -> Option<NaiveDate> {
        self.epochs
            .iter()
            .rev()
            .find(|&&epoch| epoch <= date)
            .or_else(|| self.epochs.first())
            .copied()
    }

    /// Month offset of `date` within the cycle, in `[0, cycle_months)`
    ///
    /// Dates before the first epoch reduce modulo the cycle length the
    /// same way, so the classification is total over the calendar.
    pub fn cycle_offset(&self, date: NaiveDate, cycle_months: u32) -> u32 {
        match self.anchor_for(date) {
            Some(anchor) => {
                months_between(anchor, date).rem_euclid(cycle_months as i64) as u32
            }
            None => 0,
        }
    }
}

/// Whole calendar months from `from` to `to` (day-of-month ignored)
pub fn months_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to.year() as i64 - from.year() as i64) * 12 + (to.month() as i64 - from.month() as i64)
}

/// `date` plus `months` calendar months, saturating at the calendar bound
pub fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(Months::new(months)).unwrap_or(date)
}
