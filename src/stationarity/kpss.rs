//! Kwiatkowski–Phillips–Schmidt–Shin test.
//!
//! H0: the series is stationary (around a level or a linear trend).
//! The statistic, lag rules and critical-value table follow the statsmodels
//! conventions.

use super::{
    CriticalValues, LagSpec, PValueRange, RegressionType, StationarityTest, TestFailure,
    TestResult,
};

/// Significance levels of the critical-value table, largest first.
const SIGNIFICANCE_LABELS: [&str; 4] = ["10%", "5%", "2.5%", "1%"];
const SIGNIFICANCE_LEVELS: [f64; 4] = [0.10, 0.05, 0.025, 0.01];

/// Kwiatkowski et al. (1992), table 1.
const LEVEL_CRITICAL: [f64; 4] = [0.347, 0.463, 0.574, 0.739];
const TREND_CRITICAL: [f64; 4] = [0.119, 0.146, 0.176, 0.216];

/// The built-in KPSS provider.
#[derive(Debug, Clone, Copy, Default)]
pub struct KpssBackend;

impl StationarityTest for KpssBackend {
    fn name(&self) -> &str {
        "KPSS"
    }

    fn run(
        &self,
        series: &[f64],
        regression: RegressionType,
        lags: LagSpec,
    ) -> Result<TestResult, TestFailure> {
        kpss(series, regression, lags)
    }
}

/// Run the KPSS test on `series`.
pub fn kpss(
    series: &[f64],
    regression: RegressionType,
    lags: LagSpec,
) -> Result<TestResult, TestFailure> {
    let n = series.len();
    if n == 0 {
        return Err(TestFailure("series is empty".into()));
    }

    let resids = residuals(series, regression)?;

    // Residuals within the rounding error of fitting the deterministic part
    // (about n ulps of the largest value) are not variation.
    let nf = n as f64;
    let resid_rms = (resids.iter().map(|e| e * e).sum::<f64>() / nf).sqrt();
    let max_abs = series.iter().fold(0.0_f64, |m, x| m.max(x.abs()));
    if resid_rms <= nf * f64::EPSILON * max_abs || resid_rms == 0.0 {
        return Err(TestFailure(
            "series has no variation around its deterministic component".into(),
        ));
    }

    let lags_used = match lags {
        LagSpec::Fixed(k) => {
            if k >= n {
                return Err(TestFailure(format!(
                    "lags ({k}) must be < number of observations ({n})"
                )));
            }
            k
        }
        LagSpec::Auto => {
            let k = auto_lags(&resids)?.min(n - 1);
            log::debug!("Automatic lag selection picked {k} lags for {n} observations");
            k
        }
    };

    // Partial sums of residuals
    let mut cumsum = 0.0;
    let eta = resids
        .iter()
        .map(|e| {
            cumsum += e;
            cumsum * cumsum
        })
        .sum::<f64>()
        / (nf * nf);

    let s_hat = long_run_variance(&resids, lags_used);
    if !(s_hat.is_finite() && s_hat > 0.0) {
        return Err(TestFailure(
            "long-run variance is zero; the series has no variation".into(),
        ));
    }

    let statistic = eta / s_hat;
    if !statistic.is_finite() {
        return Err(TestFailure("KPSS statistic is not finite".into()));
    }

    let table = match regression {
        RegressionType::Level => LEVEL_CRITICAL,
        RegressionType::Trend => TREND_CRITICAL,
    };
    let (p_value, p_value_range) = interpolate_p_value(statistic, &table);
    match p_value_range {
        PValueRange::AtLeast => {
            log::debug!("KPSS p-value is greater than the indicated {p_value}")
        }
        PValueRange::AtMost => {
            log::debug!("KPSS p-value is smaller than the indicated {p_value}")
        }
        PValueRange::Interpolated => {}
    }

    let critical_values = CriticalValues::new(
        SIGNIFICANCE_LABELS
            .iter()
            .zip(table.iter())
            .map(|(label, cv)| (label.to_string(), *cv))
            .collect(),
    );

    Ok(TestResult {
        statistic,
        p_value,
        lags_used,
        critical_values,
        p_value_range,
    })
}

/// Residuals of the deterministic part: the mean for `Level`, an OLS line
/// on `t = 1..n` for `Trend`.
fn residuals(x: &[f64], regression: RegressionType) -> Result<Vec<f64>, TestFailure> {
    let n = x.len() as f64;
    match regression {
        RegressionType::Level => {
            let mean = x.iter().sum::<f64>() / n;
            Ok(x.iter().map(|v| v - mean).collect())
        }
        RegressionType::Trend => {
            // Normal equations for y = mu + beta * t
            let mut s_t = 0.0;
            let mut s_tt = 0.0;
            let mut s_y = 0.0;
            let mut s_ty = 0.0;
            for (i, &y) in x.iter().enumerate() {
                let t = (i + 1) as f64;
                s_t += t;
                s_tt += t * t;
                s_y += y;
                s_ty += t * y;
            }
            let det = n * s_tt - s_t * s_t;
            if det.abs() < 1e-12 {
                return Err(TestFailure(
                    "trend regression is singular; at least two observations are required"
                        .into(),
                ));
            }
            let mu = (s_tt * s_y - s_t * s_ty) / det;
            let beta = (n * s_ty - s_t * s_y) / det;
            Ok(x
                .iter()
                .enumerate()
                .map(|(i, y)| y - mu - beta * (i + 1) as f64)
                .collect())
        }
    }
}

/// Sum of `e[t] * e[t - lag]` over the overlapping range.
fn autocovariance_sum(e: &[f64], lag: usize) -> f64 {
    e[lag..].iter().zip(e.iter()).map(|(a, b)| a * b).sum()
}

/// Data-dependent lag selection of Hobijn, Franses and Ooms (1998).
fn auto_lags(resids: &[f64]) -> Result<usize, TestFailure> {
    let n = resids.len();
    let nf = n as f64;
    let cov_lags = (nf.powf(2.0 / 9.0) as usize).min(n - 1);

    let mut s0 = resids.iter().map(|e| e * e).sum::<f64>() / nf;
    let mut s1 = 0.0;
    for i in 1..=cov_lags {
        let prod = autocovariance_sum(resids, i) / (nf / 2.0);
        s0 += prod;
        s1 += i as f64 * prod;
    }

    let s_hat = s1 / s0;
    if !s_hat.is_finite() {
        return Err(TestFailure(
            "cannot select lags automatically; the series has no variation".into(),
        ));
    }
    let gamma_hat = 1.1447 * (s_hat * s_hat).powf(1.0 / 3.0);
    Ok((gamma_hat * nf.powf(1.0 / 3.0)) as usize)
}

/// Newey–West estimate with Bartlett weights.
fn long_run_variance(resids: &[f64], lags: usize) -> f64 {
    let n = resids.len();
    let mut s_hat = resids.iter().map(|e| e * e).sum::<f64>();
    for i in 1..=lags.min(n - 1) {
        let weight = 1.0 - i as f64 / (lags + 1) as f64;
        s_hat += 2.0 * weight * autocovariance_sum(resids, i);
    }
    s_hat / n as f64
}

/// Interpolate the p-value from the critical-value table, clipping at its edges.
fn interpolate_p_value(statistic: f64, critical: &[f64; 4]) -> (f64, PValueRange) {
    let last = critical.len() - 1;
    if statistic <= critical[0] {
        return (SIGNIFICANCE_LEVELS[0], PValueRange::AtLeast);
    }
    if statistic >= critical[last] {
        return (SIGNIFICANCE_LEVELS[last], PValueRange::AtMost);
    }
    for i in 0..last {
        let (cv_low, cv_high) = (critical[i], critical[i + 1]);
        if statistic < cv_high {
            let weight = (statistic - cv_low) / (cv_high - cv_low);
            let (p_high, p_low) = (SIGNIFICANCE_LEVELS[i], SIGNIFICANCE_LEVELS[i + 1]);
            return (p_high + weight * (p_low - p_high), PValueRange::Interpolated);
        }
    }
    (SIGNIFICANCE_LEVELS[last], PValueRange::AtMost)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RISING: [f64; 12] = [1.0, 3.0, 2.0, 5.0, 4.0, 6.0, 8.0, 7.0, 9.0, 10.0, 12.0, 11.0];

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn level_with_automatic_lags() {
        let r = kpss(&RISING, RegressionType::Level, LagSpec::Auto).unwrap();
        assert_eq!(r.lags_used, 1);
        assert!(close(r.statistic, 0.676_752_136_752_136_7));
        assert!(close(r.p_value, 0.015_658_896_658_896_66));
        assert_eq!(r.p_value_range, PValueRange::Interpolated);
    }

    #[test]
    fn level_with_fixed_lags() {
        let r = kpss(&RISING, RegressionType::Level, LagSpec::Fixed(2)).unwrap();
        assert_eq!(r.lags_used, 2);
        assert!(close(r.statistic, 0.506_007_157_464_212_7));
        assert!(close(r.p_value, 0.040_313_703_273_825_98));
    }

    #[test]
    fn trend_removes_the_drift() {
        let r = kpss(&RISING, RegressionType::Trend, LagSpec::Fixed(0)).unwrap();
        assert!(close(r.statistic, 0.030_437_352_245_862_893));
        assert_eq!(r.p_value, 0.10);
        assert_eq!(r.p_value_range, PValueRange::AtLeast);
    }

    #[test]
    fn large_statistic_clips_at_one_percent() {
        let r = kpss(&RISING, RegressionType::Trend, LagSpec::Auto).unwrap();
        assert_eq!(r.lags_used, 7);
        assert_eq!(r.p_value, 0.01);
        assert_eq!(r.p_value_range, PValueRange::AtMost);
    }

    #[test]
    fn critical_values_follow_regression() {
        let level = kpss(&RISING, RegressionType::Level, LagSpec::Auto).unwrap();
        let trend = kpss(&RISING, RegressionType::Trend, LagSpec::Auto).unwrap();
        let labels: Vec<&str> = level.critical_values.iter().map(|(l, _)| l).collect();
        assert_eq!(labels, vec!["10%", "5%", "2.5%", "1%"]);
        assert_eq!(level.critical_values.get("5%"), Some(0.463));
        assert_eq!(trend.critical_values.get("1%"), Some(0.216));
    }

    #[test]
    fn constant_series_fails() {
        let flat = [4.2; 30];
        for lags in [LagSpec::Auto, LagSpec::Fixed(3)] {
            assert!(kpss(&flat, RegressionType::Level, lags).is_err());
        }
    }

    #[test]
    fn exact_line_fails_under_trend() {
        let line: Vec<f64> = (0..40).map(|t| 3.0 + 0.5 * t as f64).collect();
        assert!(kpss(&line, RegressionType::Trend, LagSpec::Auto).is_err());
        assert!(kpss(&line, RegressionType::Level, LagSpec::Auto).is_ok());
    }

    #[test]
    fn level_statistic_ignores_a_large_offset() {
        let base: Vec<f64> = (0..120).map(|i| (i % 7) as f64 * 10.0).collect();
        let shifted: Vec<f64> = base.iter().map(|x| x + 1.7e12).collect();

        let r = kpss(&base, RegressionType::Level, LagSpec::Auto).unwrap();
        let s = kpss(&shifted, RegressionType::Level, LagSpec::Auto).unwrap();
        assert_eq!(s.lags_used, r.lags_used);
        assert!((s.statistic - r.statistic).abs() <= 1e-9 * r.statistic);
        assert!(close(s.statistic, 0.025_270_473_769_012_168));
        assert_eq!(s.p_value, 0.10);
    }

    #[test]
    fn long_constant_series_fails_at_any_level() {
        for value in [123_456.789, 1.7e12, 0.1] {
            let flat = vec![value; 1000];
            assert!(kpss(&flat, RegressionType::Level, LagSpec::Auto).is_err());
        }
    }

    #[test]
    fn too_many_lags_fails() {
        let err = kpss(&RISING, RegressionType::Level, LagSpec::Fixed(12)).unwrap_err();
        assert_eq!(err.0, "lags (12) must be < number of observations (12)");
    }

    #[test]
    fn empty_and_single_point_fail() {
        assert!(kpss(&[], RegressionType::Level, LagSpec::Auto).is_err());
        assert!(kpss(&[1.0], RegressionType::Trend, LagSpec::Fixed(0)).is_err());
    }

    #[test]
    fn p_value_interpolation_hits_table_points() {
        let (p, range) = interpolate_p_value(0.463, &LEVEL_CRITICAL);
        assert!(close(p, 0.05));
        assert_eq!(range, PValueRange::Interpolated);
        let (p, _) = interpolate_p_value((0.146 + 0.176) / 2.0, &TREND_CRITICAL);
        assert!(close(p, 0.0375));
    }
}
