//! Aggregation over the full monthly schedule
//!
//! Reduces the schedule to the decimated stacked chart series, the
//! payoff analysis, and the final performance summary.

mod chart;
mod summary;

pub use chart::stacked_series;
pub use summary::{annualized_return, payoff_analysis, performance_summary};
