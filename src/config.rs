use serde::{Deserialize, Serialize};

/// What to do when the cleaned series is shorter than `min_observations`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShortSeriesPolicy {
    /// Warn and do not run the test.
    #[default]
    Skip,
    /// Run anyway and attach a warning to the report.
    Warn,
}

/// Tunables of the analysis pipeline and the viewer.
///
/// The significance level is not among them; it stays at
/// [`crate::stationarity::interpret::ALPHA`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Observations needed before results are considered reliable.
    pub min_observations: usize,
    pub short_series_policy: ShortSeriesPolicy,
    /// Rows shown in the data preview.
    pub preview_rows: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            min_observations: 10,
            short_series_policy: ShortSeriesPolicy::Skip,
            preview_rows: 5,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields keep their defaults.
    pub fn from_json_str(text: &str) -> anyhow::Result<Self> {
        use anyhow::Context;
        serde_json::from_str(text).context("parsing settings JSON")
    }
}
