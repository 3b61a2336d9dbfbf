//! Request payload types and loading

mod data;
pub mod loader;

pub use data::{
    AssetInvestment, CalculatorInputs, CurrentMortgage, ModelKind, PayoffTrigger,
    PerformanceSettings, PropertyIncome, PropertyInputs, RefinanceScenario, RefinanceType,
    Sentiment, TriggerType,
};
pub use loader::{load_inputs, LoadError};
