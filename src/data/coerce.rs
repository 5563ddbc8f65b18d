use super::model::CellValue;

/// Thousands separator stripped before parsing.
const THOUSANDS_SEPARATOR: char = ',';

/// Turn a raw column into a clean numeric series.
///
/// Every cell is taken in its textual form, thousands separators are removed
/// and the remainder is parsed as a float.  Blank, unparseable and non-finite
/// cells are dropped; surviving values keep their relative order.
pub fn coerce(column: &[&CellValue]) -> Vec<f64> {
    column
        .iter()
        .filter_map(|cell| parse_cell(&cell.to_string()))
        .collect()
}

/// Same as [`coerce`] for raw text cells.
pub fn coerce_strs(column: &[&str]) -> Vec<f64> {
    column.iter().filter_map(|s| parse_cell(s)).collect()
}

fn parse_cell(text: &str) -> Option<f64> {
    let cleaned: String = text.chars().filter(|&c| c != THOUSANDS_SEPARATOR).collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}
