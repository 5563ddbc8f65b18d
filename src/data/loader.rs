use std::collections::{HashMap, HashSet};
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};

use super::model::{CellValue, Table};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv` – comma-separated, first row is the header
/// * `.txt` – same layout, for exports that use a generic extension
pub fn load_file(path: &Path) -> Result<Table> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" | "txt" => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("opening {}", path.display()))?;
            load_csv_reader(file)
        }
        other => bail!("Unsupported file extension: .{other}"),
    }
}

/// Parse CSV content that is already in memory (e.g. an uploaded file).
pub fn load_csv_bytes(bytes: &[u8]) -> Result<Table> {
    load_csv_reader(bytes)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, every other row holds cells of
/// arbitrary type.  Rows shorter than the header are padded with nulls; rows
/// longer than the header are rejected.  Repeated header names are renamed
/// `name.1`, `name.2`, ... so each column can be selected.
pub fn load_csv_reader<R: Read>(reader: R) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let column_names: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();
    let column_names = dedupe_column_names(column_names);

    if column_names.is_empty() || column_names.iter().all(|c| c.is_empty()) {
        bail!("No columns to parse from file");
    }

    let n_cols = column_names.len();
    let mut rows = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;

        if record.len() > n_cols {
            bail!(
                "CSV row {row_no}: expected {n_cols} fields, saw {}",
                record.len()
            );
        }

        let mut row: Vec<CellValue> = record.iter().map(CellValue::guess).collect();
        row.resize(n_cols, CellValue::Null);
        rows.push(row);
    }

    Ok(Table::new(column_names, rows))
}

fn dedupe_column_names(names: Vec<String>) -> Vec<String> {
    let mut taken: HashSet<String> = HashSet::new();
    let mut suffixes: HashMap<String, usize> = HashMap::new();

    names
        .into_iter()
        .map(|name| {
            let mut unique = name.clone();
            while taken.contains(&unique) {
                let suffix = suffixes.entry(name.clone()).or_insert(0);
                *suffix += 1;
                unique = format!("{name}.{suffix}");
            }
            if unique != name {
                log::warn!("Duplicate column '{name}' renamed to '{unique}'");
            }
            taken.insert(unique.clone());
            unique
        })
        .collect()
}
