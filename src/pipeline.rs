use serde::Serialize;

use crate::config::{Settings, ShortSeriesPolicy};
use crate::data::coerce::coerce;
use crate::data::loader::load_csv_bytes;
use crate::data::model::Table;
use crate::error::{AnalysisError, Warning};
use crate::stationarity::interpret::{ALPHA, Verdict, interpret};
use crate::stationarity::lags::recommend;
use crate::stationarity::{
    CriticalValues, LagMode, PValueRange, RegressionType, StationarityTest, run_test,
};

// ---------------------------------------------------------------------------
// Request / report
// ---------------------------------------------------------------------------

/// Inputs of one analysis run, as collected by the form.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    pub column: String,
    pub regression: RegressionType,
    pub lag_mode: LagMode,
}

/// Everything the display surface needs to render a finished run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub selected_column: String,
    pub lag_mode_label: String,
    pub regression: RegressionType,
    /// Length of the cleaned series.
    pub observations: usize,
    pub statistic: f64,
    pub p_value: f64,
    pub lags_used: usize,
    pub critical_values: CriticalValues,
    pub p_value_range: PValueRange,
    pub verdict: Verdict,
    pub conclusion_label: String,
    pub conclusion_alpha: f64,
    pub conclusion_summary: String,
    /// Schwert recommendation for the table's row count.
    pub recommended_lags: usize,
    pub warnings: Vec<Warning>,
    /// Cleaned series, kept for plotting.
    #[serde(skip)]
    pub series: Vec<f64>,
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Look up a column and coerce it into a clean numeric series.
pub fn clean_column(table: &Table, column: &str) -> Result<Vec<f64>, AnalysisError> {
    let raw = table
        .column(column)
        .ok_or_else(|| AnalysisError::UnknownColumn {
            column: column.to_string(),
        })?;

    let series = coerce(&raw);
    log::info!(
        "Column '{column}': {} of {} cells are numeric",
        series.len(),
        raw.len()
    );

    if series.is_empty() {
        return Err(AnalysisError::EmptySeries {
            column: column.to_string(),
        });
    }
    Ok(series)
}

/// Run one request against an already parsed table.
pub fn analyze(
    table: &Table,
    request: &AnalysisRequest,
    provider: &dyn StationarityTest,
    settings: &Settings,
) -> Result<AnalysisReport, AnalysisError> {
    let series = clean_column(table, &request.column)?;

    let mut warnings = Vec::new();
    if series.len() < settings.min_observations {
        log::warn!(
            "Column '{}' has only {} observations",
            request.column,
            series.len()
        );
        match settings.short_series_policy {
            ShortSeriesPolicy::Skip => {
                return Err(AnalysisError::InsufficientData {
                    observations: series.len(),
                    minimum: settings.min_observations,
                });
            }
            ShortSeriesPolicy::Warn => warnings.push(Warning::InsufficientData {
                observations: series.len(),
                minimum: settings.min_observations,
            }),
        }
    }

    let result = run_test(
        provider,
        &series,
        request.regression,
        request.lag_mode.lag_spec(),
    )?;
    let conclusion = interpret(&result, ALPHA);

    log::info!(
        "{} on '{}': statistic={:.4}, p-value={:.4}, lags={} → {}",
        provider.name(),
        request.column,
        result.statistic,
        result.p_value,
        result.lags_used,
        conclusion.verdict
    );

    Ok(AnalysisReport {
        selected_column: request.column.clone(),
        lag_mode_label: request.lag_mode.label().to_string(),
        regression: request.regression,
        observations: series.len(),
        statistic: result.statistic,
        p_value: result.p_value,
        lags_used: result.lags_used,
        critical_values: result.critical_values,
        p_value_range: result.p_value_range,
        verdict: conclusion.verdict,
        conclusion_label: conclusion.label(),
        conclusion_alpha: conclusion.alpha,
        conclusion_summary: conclusion.summary(),
        recommended_lags: recommend(table.len()),
        warnings,
        series,
    })
}

/// Parse uploaded CSV bytes and run one request on them.
pub fn analyze_csv(
    bytes: &[u8],
    request: &AnalysisRequest,
    provider: &dyn StationarityTest,
    settings: &Settings,
) -> Result<AnalysisReport, AnalysisError> {
    let table = load_csv_bytes(bytes).map_err(|e| {
        log::error!("Failed to parse CSV: {e:#}");
        AnalysisError::file_parse(&e)
    })?;
    analyze(&table, request, provider, settings)
}
