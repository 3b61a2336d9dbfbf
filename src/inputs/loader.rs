//! JSON request loader
//!
//! Reads a `CalculatorInputs` payload from disk or any reader. Upstream
//! field validation has already happened by the time a payload reaches
//! this crate; this layer only covers I/O and shape errors.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::CalculatorInputs;

/// Errors raised while loading a request payload
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Load a payload from a JSON file
pub fn load_inputs<P: AsRef<Path>>(path: P) -> Result<CalculatorInputs, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    from_reader(file).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a payload from any reader
pub fn from_reader<R: Read>(reader: R) -> Result<CalculatorInputs, serde_json::Error> {
    serde_json::from_reader(reader)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_reader() {
        let json = r#"{
            "property": {"currentValue": 400000.0, "appreciationRate": 0.03},
            "currentMortgage": {"currentBalance": 0.0, "interestRate": 0.0, "remainingYears": 0.0},
            "propertyIncome": {"netMonthlyCashFlow": 0.0, "monthlyTaxes": 0.0, "monthlyInsurance": 0.0, "monthlyHOA": 0.0},
            "refinanceScenario": {"type": "heloc", "cashOutAmount": 100000.0, "newLoanAmount": 100000.0, "newInterestRate": 0.08, "newLoanTermYears": 10},
            "assetInvestment": {"investmentAmount": 100000.0, "currentAssetPrice": 50000.0, "performanceSettings": {"model": "steady", "initialCAGR": 0.15, "sentiment": "neutral", "loanStartDate": "2025-01-01"}},
            "payoffTrigger": {"type": "retained_amount", "value": 50000.0}
        }"#;

        let inputs = from_reader(json.as_bytes()).unwrap();
        assert_eq!(inputs.refinance_scenario.new_loan_term_years, 10);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_inputs("no/such/payload.json").unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
