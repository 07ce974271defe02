//! Shared CSV reading for reference tables and datasets.

use std::collections::BTreeMap;
use std::path::Path;

use csv::ReaderBuilder;

use crate::error::{ReferenceError, Result};

pub type CsvRow = BTreeMap<String, String>;

/// Header row plus every data row keyed by header.
#[derive(Debug, Clone, Default)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<CsvRow>,
}

impl CsvTable {
    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|h| h == column)
    }

    pub(crate) fn require_column(&self, path: &Path, column: &str) -> Result<()> {
        if self.has_column(column) {
            Ok(())
        } else {
            Err(ReferenceError::MissingColumn {
                path: path.to_path_buf(),
                column: column.to_string(),
            })
        }
    }
}

/// Reads a CSV file into its headers and row maps.
///
/// Strips a leading BOM from headers and trims whitespace from headers and values.
pub fn read_csv_rows(path: &Path) -> Result<CsvTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|e| ReferenceError::csv(path, e))?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| ReferenceError::csv(path, e))?
        .iter()
        .map(|h| h.trim_matches('\u{feff}').trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| ReferenceError::csv(path, e))?;
        let row = headers
            .iter()
            .zip(record.iter())
            .map(|(key, value)| (key.clone(), value.trim().to_string()))
            .collect();
        rows.push(row);
    }
    Ok(CsvTable { headers, rows })
}

/// Non-empty field value, if any.
pub fn get_optional<'r>(row: &'r CsvRow, key: &str) -> Option<&'r str> {
    row.get(key).map(String::as_str).filter(|v| !v.is_empty())
}
