use rusty_kpss::data::model::Table;
use rusty_kpss::stationarity::lags::recommend;
use rusty_kpss::{
    AnalysisError, AnalysisReport, AnalysisRequest, KpssBackend, LagMode, RegressionType,
    Settings, analyze,
};

// ---------------------------------------------------------------------------
// Status line
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub level: StatusLevel,
    pub text: String,
}

impl StatusMessage {
    fn new(level: StatusLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }
}

impl From<&AnalysisError> for StatusMessage {
    fn from(err: &AnalysisError) -> Self {
        let level = if err.is_warning() {
            StatusLevel::Warning
        } else {
            StatusLevel::Error
        };
        StatusMessage::new(level, err.to_string())
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// Only form inputs live here between runs; every press of "Run" builds a
/// fresh request and replaces `report`.
pub struct AppState {
    /// Loaded table (None until user loads a file).
    pub table: Option<Table>,

    /// File name shown in the top bar.
    pub source_name: Option<String>,

    /// Column chosen for the test.
    pub selected_column: Option<String>,

    pub regression: RegressionType,

    /// Whether the user types the lag count instead of letting the test pick.
    pub manual_lags: bool,

    /// Manual lag count, pre-filled with the recommendation.
    pub manual_lag_value: usize,

    /// Result of the last successful run.
    pub report: Option<AnalysisReport>,

    /// Status / error message shown in the UI.
    pub status_message: Option<StatusMessage>,

    pub settings: Settings,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        Self {
            table: None,
            source_name: None,
            selected_column: None,
            regression: RegressionType::default(),
            manual_lags: false,
            manual_lag_value: 0,
            report: None,
            status_message: Some(StatusMessage::new(
                StatusLevel::Info,
                "Open a CSV file to get started.",
            )),
            settings,
        }
    }

    /// Ingest a newly loaded table and reset the form.
    pub fn set_table(&mut self, table: Table, source_name: String) {
        self.selected_column = table.column_names.first().cloned();
        self.manual_lag_value = recommend(table.len());
        self.report = None;
        self.status_message = Some(StatusMessage::new(
            StatusLevel::Success,
            format!("Loaded {} rows from {source_name}", table.len()),
        ));
        self.source_name = Some(source_name);
        self.table = Some(table);
    }

    /// Record a failure to read a file; the previous table is dropped.
    pub fn set_load_error(&mut self, err: &AnalysisError) {
        self.table = None;
        self.source_name = None;
        self.selected_column = None;
        self.report = None;
        self.status_message = Some(err.into());
    }

    pub fn select_column(&mut self, column: String) {
        if self.selected_column.as_deref() != Some(column.as_str()) {
            self.selected_column = Some(column);
            self.report = None;
        }
    }

    pub fn set_regression(&mut self, regression: RegressionType) {
        if self.regression != regression {
            self.regression = regression;
            self.report = None;
        }
    }

    pub fn set_manual_lags(&mut self, manual: bool) {
        if self.manual_lags != manual {
            self.manual_lags = manual;
            self.report = None;
        }
    }

    pub fn set_manual_lag_value(&mut self, lags: usize) {
        if self.manual_lag_value != lags {
            self.manual_lag_value = lags;
            if self.manual_lags {
                self.report = None;
            }
        }
    }

    /// Schwert recommendation for the loaded table.
    pub fn recommended_lags(&self) -> usize {
        self.table.as_ref().map_or(0, |t| recommend(t.len()))
    }

    pub fn lag_mode(&self) -> LagMode {
        if self.manual_lags {
            LagMode::Manual(self.manual_lag_value)
        } else {
            LagMode::Automatic
        }
    }

    /// Build the request from the current form, if a column is selected.
    pub fn request(&self) -> Option<AnalysisRequest> {
        Some(AnalysisRequest {
            column: self.selected_column.clone()?,
            regression: self.regression,
            lag_mode: self.lag_mode(),
        })
    }

    /// Run the test on the current form inputs.
    pub fn run_test(&mut self) {
        let (Some(table), Some(request)) = (&self.table, self.request()) else {
            return;
        };

        match analyze(table, &request, &KpssBackend, &self.settings) {
            Ok(report) => {
                self.status_message = report.warnings.first().map(|w| {
                    StatusMessage::new(StatusLevel::Warning, w.to_string())
                });
                self.report = Some(report);
            }
            Err(e) => {
                if e.is_warning() {
                    log::warn!("{e}");
                } else {
                    log::error!("{e}");
                }
                self.status_message = Some((&e).into());
                self.report = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusty_kpss::ShortSeriesPolicy;
    use rusty_kpss::data::loader::load_csv_bytes;

    fn state_with(csv: &str) -> AppState {
        let mut state = AppState::default();
        state.set_table(load_csv_bytes(csv.as_bytes()).unwrap(), "test.csv".into());
        state
    }

    fn column_csv(values: &[f64]) -> String {
        let mut csv = String::from("t,value\n");
        for (i, v) in values.iter().enumerate() {
            csv.push_str(&format!("{i},{v}\n"));
        }
        csv
    }

    #[test]
    fn loading_resets_the_form() {
        let rows: Vec<f64> = (0..100).map(|i| (i % 7) as f64).collect();
        let state = state_with(&column_csv(&rows));
        assert_eq!(state.selected_column.as_deref(), Some("t"));
        assert_eq!(state.manual_lag_value, 12);
        assert_eq!(state.recommended_lags(), 12);
        assert_eq!(state.lag_mode(), LagMode::Automatic);
    }

    #[test]
    fn manual_mode_uses_the_typed_value() {
        let mut state = state_with(&column_csv(&[1.0, 2.0]));
        state.manual_lags = true;
        state.manual_lag_value = 3;
        assert_eq!(state.request().unwrap().lag_mode, LagMode::Manual(3));
    }

    #[test]
    fn short_series_shows_a_warning_and_no_report() {
        let mut state = state_with(&column_csv(&[1.0, 3.0, 2.0]));
        state.select_column("value".into());
        state.run_test();
        assert!(state.report.is_none());
        assert_eq!(
            state.status_message.as_ref().map(|m| m.level),
            Some(StatusLevel::Warning)
        );
    }

    #[test]
    fn warn_policy_still_produces_a_report() {
        let mut state = state_with(&column_csv(&[1.0, 3.0, 2.0, 5.0, 4.0, 6.0]));
        state.settings.short_series_policy = ShortSeriesPolicy::Warn;
        state.select_column("value".into());
        state.run_test();
        assert!(state.report.is_some());
        assert_eq!(
            state.status_message.as_ref().map(|m| m.level),
            Some(StatusLevel::Warning)
        );
    }

    fn state_with_report() -> AppState {
        let values: Vec<f64> = (0..30).map(|i| ((i * 7) % 11) as f64).collect();
        let mut state = state_with(&column_csv(&values));
        state.select_column("value".into());
        state.run_test();
        assert!(state.report.is_some());
        state
    }

    #[test]
    fn changing_the_hypothesis_clears_the_report() {
        let mut state = state_with_report();
        state.set_regression(RegressionType::Level);
        assert!(state.report.is_some());
        state.set_regression(RegressionType::Trend);
        assert!(state.report.is_none());
        assert_eq!(state.request().unwrap().regression, RegressionType::Trend);
    }

    #[test]
    fn changing_the_lag_mode_clears_the_report() {
        let mut state = state_with_report();
        state.set_manual_lag_value(4);
        assert!(state.report.is_some());
        state.set_manual_lags(true);
        assert!(state.report.is_none());

        state.run_test();
        assert_eq!(state.report.as_ref().map(|r| r.lags_used), Some(4));
        state.set_manual_lag_value(5);
        assert!(state.report.is_none());
    }

    #[test]
    fn failed_test_clears_the_previous_report() {
        let mut values: Vec<f64> = (0..30).map(|i| ((i * 7) % 11) as f64).collect();
        let mut state = state_with(&column_csv(&values));
        state.select_column("value".into());
        state.run_test();
        assert!(state.report.is_some());

        values.iter_mut().for_each(|v| *v = 5.0);
        let table = load_csv_bytes(column_csv(&values).as_bytes()).unwrap();
        state.set_table(table, "flat.csv".into());
        state.select_column("value".into());
        state.run_test();
        assert!(state.report.is_none());
        assert_eq!(
            state.status_message.as_ref().map(|m| m.level),
            Some(StatusLevel::Error)
        );
    }
}
