//! Stationarity layer: test configuration, the provider seam, and the
//! interpretation of results.
//!
//! ```text
//!   CleanSeries + RegressionType + LagSpec
//!        │
//!        ▼
//!   ┌──────────────────────┐
//!   │ dyn StationarityTest │  KpssBackend by default
//!   └──────────────────────┘
//!        │  TestResult
//!        ▼
//!   ┌───────────┐
//!   │ interpret │  p-value vs ALPHA → Conclusion
//!   └───────────┘
//! ```

pub mod interpret;
pub mod kpss;
pub mod lags;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};

use crate::error::AnalysisError;

// ---------------------------------------------------------------------------
// Test configuration
// ---------------------------------------------------------------------------

/// Null hypothesis of the test: stationary around a level or around a trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RegressionType {
    #[default]
    #[serde(rename = "c")]
    Level,
    #[serde(rename = "ct")]
    Trend,
}

impl RegressionType {
    pub const ALL: [RegressionType; 2] = [RegressionType::Level, RegressionType::Trend];

    /// Short code used by statistics packages (`"c"` / `"ct"`).
    pub fn code(&self) -> &'static str {
        match self {
            RegressionType::Level => "c",
            RegressionType::Trend => "ct",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RegressionType::Level => "Level stationary (around a mean)",
            RegressionType::Trend => "Trend stationary (around a trend)",
        }
    }
}

impl fmt::Display for RegressionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for RegressionType {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "c" => Ok(RegressionType::Level),
            "ct" => Ok(RegressionType::Trend),
            other => Err(AnalysisError::InvalidRegression {
                code: other.to_string(),
            }),
        }
    }
}

/// How the user wants the lag truncation chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LagMode {
    #[default]
    Automatic,
    Manual(usize),
}

impl LagMode {
    pub fn label(&self) -> &'static str {
        match self {
            LagMode::Automatic => "Automatic",
            LagMode::Manual(_) => "Manual",
        }
    }

    pub fn lag_spec(&self) -> LagSpec {
        match *self {
            LagMode::Automatic => LagSpec::Auto,
            LagMode::Manual(n) => LagSpec::Fixed(n),
        }
    }
}

/// Lag truncation handed to a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LagSpec {
    /// Let the provider pick from the data.
    Auto,
    Fixed(usize),
}

// ---------------------------------------------------------------------------
// Test output
// ---------------------------------------------------------------------------

/// Significance-level label → critical value, in table order.
///
/// Serialises as a JSON object whose keys keep that order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CriticalValues(Vec<(String, f64)>);

impl CriticalValues {
    pub fn new(entries: Vec<(String, f64)>) -> Self {
        CriticalValues(entries)
    }

    pub fn get(&self, label: &str) -> Option<f64> {
        self.0.iter().find(|(l, _)| l == label).map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(l, v)| (l.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for CriticalValues {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(l, v)| (l, v)))
    }
}

/// Where the reported p-value sits relative to the lookup table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PValueRange {
    Interpolated,
    /// Statistic below the smallest critical value; the true p-value is larger.
    AtLeast,
    /// Statistic above the largest critical value; the true p-value is smaller.
    AtMost,
}

/// Immutable output of one test run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestResult {
    pub statistic: f64,
    pub p_value: f64,
    pub lags_used: usize,
    pub critical_values: CriticalValues,
    pub p_value_range: PValueRange,
}

// ---------------------------------------------------------------------------
// Provider seam
// ---------------------------------------------------------------------------

/// Failure raised by a numerical backend.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{0}")]
pub struct TestFailure(pub String);

/// A numerical backend able to run a stationarity test.
pub trait StationarityTest {
    fn name(&self) -> &str;

    fn run(
        &self,
        series: &[f64],
        regression: RegressionType,
        lags: LagSpec,
    ) -> Result<TestResult, TestFailure>;
}

/// Run a provider and convert its failure into [`AnalysisError::StationarityTestFailed`].
pub fn run_test(
    provider: &dyn StationarityTest,
    series: &[f64],
    regression: RegressionType,
    lags: LagSpec,
) -> Result<TestResult, AnalysisError> {
    log::info!(
        "Running {} on {} observations (regression={regression}, lags={lags:?})",
        provider.name(),
        series.len()
    );
    provider.run(series, regression, lags).map_err(|e| {
        log::error!("{} failed: {e}", provider.name());
        AnalysisError::StationarityTestFailed { message: e.0 }
    })
}
