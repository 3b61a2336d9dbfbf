//! Month-by-month payoff simulation

mod engine;
mod schedule;
mod state;
pub mod trigger;

pub use engine::{SimulationConfig, SimulationEngine};
pub use schedule::{
    MonthlyEntry, PayoffAnalysis, PerformanceSummary, SimulationResult, StackedChartPoint,
    TriggerSnapshot,
};
pub use state::{PayoffPhase, SimulationState, TriggerEvent};
