//! Equity Payoff - payoff simulation engine for equity-tapped mortgage scenarios
//!
//! This library provides:
//! - Closed-form mortgage amortization math
//! - A cyclical, epoch-anchored asset performance model
//! - A month-by-month debt/asset payoff simulation driver
//! - Chart decimation and performance summary aggregation
//! - Batch scenario evaluation

pub mod analysis;
pub mod export;
pub mod inputs;
pub mod mortgage;
pub mod performance;
pub mod scenario;
pub mod simulation;

// Re-export commonly used types
pub use inputs::CalculatorInputs;
pub use mortgage::MortgageError;
pub use performance::{AssetPerformanceModel, CycleProfile, EpochCalendar};
pub use scenario::ScenarioRunner;
pub use simulation::{MonthlyEntry, SimulationConfig, SimulationEngine, SimulationResult};
