use std::fmt;

use serde::Serialize;

/// Every way a single analysis run can end early.
///
/// Each variant ends only the current run; the caller shows it and the user
/// can adjust the inputs and try again.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnalysisError {
    #[error("Failed to parse the CSV file: {message}")]
    FileParse { message: String },

    #[error("Column '{column}' is not present in the file")]
    UnknownColumn { column: String },

    #[error("Regression must be 'c' or 'ct', got '{code}'")]
    InvalidRegression { code: String },

    #[error("Column '{column}' contains no numeric values after cleaning")]
    EmptySeries { column: String },

    #[error(
        "Series is too short ({observations} observations, need at least {minimum}); results may be inaccurate"
    )]
    InsufficientData { observations: usize, minimum: usize },

    #[error("KPSS test failed: {message}")]
    StationarityTestFailed { message: String },
}

impl AnalysisError {
    /// Accuracy caveats are shown as warnings rather than errors.
    pub fn is_warning(&self) -> bool {
        matches!(self, AnalysisError::InsufficientData { .. })
    }

    /// Wrap a loader error, keeping its context chain.
    pub fn file_parse(err: &anyhow::Error) -> Self {
        AnalysisError::FileParse {
            message: format!("{err:#}"),
        }
    }
}

/// Non-fatal caveat attached to a finished report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Warning {
    InsufficientData { observations: usize, minimum: usize },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::InsufficientData {
                observations,
                minimum,
            } => write!(
                f,
                "Only {observations} observations (fewer than {minimum}); results may be inaccurate"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_short_series_is_a_warning() {
        assert!(AnalysisError::InsufficientData {
            observations: 4,
            minimum: 10
        }
        .is_warning());
        assert!(!AnalysisError::EmptySeries {
            column: "close".into()
        }
        .is_warning());
    }

    #[test]
    fn file_parse_keeps_context_chain() {
        let err = anyhow::anyhow!("bad quote").context("CSV row 3");
        let wrapped = AnalysisError::file_parse(&err);
        assert_eq!(
            wrapped.to_string(),
            "Failed to parse the CSV file: CSV row 3: bad quote"
        );
    }
}
