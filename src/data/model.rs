use std::fmt;

// ---------------------------------------------------------------------------
// CellValue – a single cell of the uploaded table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring what a CSV reader would infer.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => Ok(()),
        }
    }
}

impl CellValue {
    /// Guess the type of a raw CSV field.
    pub fn guess(s: &str) -> Self {
        if s.is_empty() {
            return CellValue::Null;
        }
        if let Ok(i) = s.parse::<i64>() {
            return CellValue::Integer(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            return CellValue::Float(f);
        }
        if s == "true" || s == "false" {
            return CellValue::Bool(s == "true");
        }
        CellValue::String(s.to_string())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

/// Stand-in for cells missing from short rows.
static NULL_CELL: CellValue = CellValue::Null;

// ---------------------------------------------------------------------------
// Table – the complete loaded file
// ---------------------------------------------------------------------------

/// A parsed CSV file: header names plus rows of cells.
///
/// Every row holds exactly `column_names.len()` cells; the loader pads short
/// rows with [`CellValue::Null`].
#[derive(Debug, Clone, Default)]
pub struct Table {
    /// Column names in header order.
    pub column_names: Vec<String>,
    /// Rows of cells, in file order.
    pub rows: Vec<Vec<CellValue>>,
}

impl Table {
    pub fn new(column_names: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Table { column_names, rows }
    }

    /// Position of a column in the header.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.column_names.iter().position(|c| c == name)
    }

    /// The raw cells of one column, in row order.
    pub fn column(&self, name: &str) -> Option<Vec<&CellValue>> {
        let idx = self.column_index(name)?;
        Some(
            self.rows
                .iter()
                .map(|row| row.get(idx).unwrap_or(&NULL_CELL))
                .collect(),
        )
    }

    /// The first `n` rows (fewer if the table is shorter).
    pub fn head(&self, n: usize) -> &[Vec<CellValue>] {
        &self.rows[..n.min(self.rows.len())]
    }

    /// Number of data rows (header excluded).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guess_cell_types() {
        assert_eq!(CellValue::guess(""), CellValue::Null);
        assert_eq!(CellValue::guess("42"), CellValue::Integer(42));
        assert_eq!(CellValue::guess("4.5"), CellValue::Float(4.5));
        assert_eq!(CellValue::guess("true"), CellValue::Bool(true));
        assert_eq!(
            CellValue::guess("1,000"),
            CellValue::String("1,000".to_string())
        );
    }

    #[test]
    fn column_lookup_and_head() {
        let table = Table::new(
            vec!["date".into(), "price".into()],
            vec![
                vec![CellValue::guess("2024-01-01"), CellValue::guess("10")],
                vec![CellValue::guess("2024-01-02"), CellValue::guess("11.5")],
                vec![CellValue::guess("2024-01-03"), CellValue::Null],
            ],
        );

        let price = table.column("price").unwrap();
        assert_eq!(price.len(), 3);
        assert_eq!(price[1], &CellValue::Float(11.5));
        assert!(price[2].is_null());
        assert!(table.column("volume").is_none());
        assert_eq!(table.head(2).len(), 2);
        assert_eq!(table.head(10).len(), 3);
    }

    #[test]
    fn null_displays_as_empty_text() {
        assert_eq!(CellValue::Null.to_string(), "");
        assert_eq!(CellValue::Integer(-3).to_string(), "-3");
    }
}
