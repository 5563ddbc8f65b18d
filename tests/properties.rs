use proptest::prelude::*;

use rusty_kpss::data::coerce::{coerce, coerce_strs};
use rusty_kpss::data::model::CellValue;
use rusty_kpss::stationarity::interpret::{ALPHA, Verdict, interpret};
use rusty_kpss::stationarity::lags::recommend;
use rusty_kpss::stationarity::{CriticalValues, PValueRange, TestResult};

/// Cells the way a CSV upload can produce them.
fn arb_cell() -> impl Strategy<Value = CellValue> {
    prop_oneof![
        any::<i64>().prop_map(CellValue::Integer),
        any::<f64>().prop_map(CellValue::Float),
        any::<bool>().prop_map(CellValue::Bool),
        Just(CellValue::Null),
        "[0-9,.eE+ -]{0,12}".prop_map(CellValue::String),
        "[a-zA-Z/ ]{0,8}".prop_map(CellValue::String),
    ]
}

proptest! {
    /// Coercion never grows the column and never lets NaN or infinity through.
    #[test]
    fn coerced_values_are_finite(cells in prop::collection::vec(arb_cell(), 0..64)) {
        let refs: Vec<&CellValue> = cells.iter().collect();
        let series = coerce(&refs);
        prop_assert!(series.len() <= cells.len());
        prop_assert!(series.iter().all(|v| v.is_finite()));
    }

    /// Finite numbers written with thousands separators survive in order.
    #[test]
    fn separated_integers_keep_order(values in prop::collection::vec(0u32..10_000_000, 1..32)) {
        let texts: Vec<String> = values
            .iter()
            .map(|v| {
                let digits = v.to_string();
                let mut out = String::new();
                for (i, ch) in digits.chars().enumerate() {
                    if i > 0 && (digits.len() - i) % 3 == 0 {
                        out.push(',');
                    }
                    out.push(ch);
                }
                out
            })
            .collect();
        let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
        let expected: Vec<f64> = values.iter().map(|&v| v as f64).collect();
        prop_assert_eq!(coerce_strs(&refs), expected);
    }

    /// The lag recommendation never decreases with more data.
    #[test]
    fn recommendation_is_monotonic(n in 0usize..1_000_000) {
        prop_assert!(recommend(n) <= recommend(n + 1));
    }

    /// Interpretation depends on the p-value alone and is repeatable.
    #[test]
    fn interpretation_is_pure(p in 0.0f64..=1.0) {
        let result = TestResult {
            statistic: 0.3,
            p_value: p,
            lags_used: 4,
            critical_values: CriticalValues::default(),
            p_value_range: PValueRange::Interpolated,
        };
        let first = interpret(&result, ALPHA);
        prop_assert_eq!(first, interpret(&result, ALPHA));
        prop_assert_eq!(first.verdict == Verdict::Stationary, p >= ALPHA);
    }
}
