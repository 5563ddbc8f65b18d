//! KPSS stationarity testing for time-series CSV files.
//!
//! The library holds the request-scoped core (loading, coercion, lag
//! recommendation, the test provider and its interpretation); the
//! `rusty-kpss` binary wraps it in an egui window.

pub mod config;
pub mod data;
pub mod error;
pub mod pipeline;
pub mod stationarity;

pub use config::{Settings, ShortSeriesPolicy};
pub use error::{AnalysisError, Warning};
pub use pipeline::{AnalysisReport, AnalysisRequest, analyze, analyze_csv};
pub use stationarity::kpss::KpssBackend;
pub use stationarity::{LagMode, RegressionType, StationarityTest, TestResult};
