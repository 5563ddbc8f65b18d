use std::fmt;

use serde::Serialize;

use super::TestResult;

/// Fixed significance level for the decision.
pub const ALPHA: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    Stationary,
    NonStationary,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Stationary => write!(f, "Stationary"),
            Verdict::NonStationary => write!(f, "Non-stationary"),
        }
    }
}

/// Decision derived from a [`TestResult`] and the threshold it was compared to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Conclusion {
    pub verdict: Verdict,
    pub p_value: f64,
    pub alpha: f64,
}

impl Conclusion {
    pub fn label(&self) -> String {
        self.verdict.to_string()
    }

    /// One-sentence reading of the decision for display.
    pub fn summary(&self) -> String {
        let alpha = self.alpha;
        match self.verdict {
            Verdict::NonStationary => format!(
                "Null hypothesis rejected (p-value < {alpha}). The series is most likely NOT stationary."
            ),
            Verdict::Stationary => format!(
                "Failed to reject the null hypothesis (p-value >= {alpha}). The series is most likely stationary."
            ),
        }
    }
}

/// Classify a result against `alpha`.
///
/// The KPSS null is stationarity, so only `p < alpha` rejects it.
pub fn interpret(result: &TestResult, alpha: f64) -> Conclusion {
    let verdict = if result.p_value < alpha {
        Verdict::NonStationary
    } else {
        Verdict::Stationary
    };
    Conclusion {
        verdict,
        p_value: result.p_value,
        alpha,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stationarity::{CriticalValues, PValueRange};

    fn result_with_p(p_value: f64) -> TestResult {
        TestResult {
            statistic: 0.5,
            p_value,
            lags_used: 3,
            critical_values: CriticalValues::default(),
            p_value_range: PValueRange::Interpolated,
        }
    }

    #[test]
    fn small_p_value_rejects_stationarity() {
        let c = interpret(&result_with_p(0.01), ALPHA);
        assert_eq!(c.verdict, Verdict::NonStationary);
        assert_eq!(c.label(), "Non-stationary");
        assert!(c.summary().contains("NOT stationary"));
    }

    #[test]
    fn p_value_equal_to_alpha_is_stationary() {
        let c = interpret(&result_with_p(ALPHA), ALPHA);
        assert_eq!(c.verdict, Verdict::Stationary);
        assert_eq!(c.alpha, 0.05);
    }

    #[test]
    fn interpretation_is_repeatable() {
        let r = result_with_p(0.0499);
        assert_eq!(interpret(&r, ALPHA), interpret(&r, ALPHA));
    }
}
