//! Loaders for reference tables, input datasets and candidate choices.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use linksight_model::{CODE_COLUMN_SUFFIX, Hierarchy, InputRecord, RecordId, ReferenceRecord, ReferenceTable};
use tracing::{debug, warn};

use crate::csv_utils::{get_optional, read_csv_rows};
use crate::error::{ReferenceError, Result};

const CODE_COLUMN: &str = "code";
const CATEGORY_COLUMN: &str = "interlevel";
const LOCATION_COLUMN: &str = "location";

/// Loads the reference table.
///
/// Requires `code`, `interlevel` and `location` columns. Every other column
/// ending in `_code` holds ancestor codes; blank cells are left out.
pub fn load_reference_table(path: &Path) -> Result<ReferenceTable> {
    let table = read_csv_rows(path)?;
    for column in [CODE_COLUMN, CATEGORY_COLUMN, LOCATION_COLUMN] {
        table.require_column(path, column)?;
    }
    let code_columns: Vec<String> = table
        .headers
        .iter()
        .filter(|h| h.ends_with(CODE_COLUMN_SUFFIX))
        .cloned()
        .collect();

    let mut records = Vec::with_capacity(table.rows.len());
    for (idx, row) in table.rows.iter().enumerate() {
        let required = |column: &str| {
            get_optional(row, column).ok_or_else(|| ReferenceError::BlankField {
                path: path.to_path_buf(),
                row: idx + 1,
                column: column.to_string(),
            })
        };
        let mut record = ReferenceRecord::new(
            required(CODE_COLUMN)?,
            required(CATEGORY_COLUMN)?,
            required(LOCATION_COLUMN)?,
        );
        for column in &code_columns {
            if let Some(code) = get_optional(row, column) {
                record = record.with_ancestor(column.as_str(), code);
            }
        }
        records.push(record);
    }

    let reference = ReferenceTable::new(records, code_columns)?;
    debug!(
        path = %path.display(),
        rows = reference.len(),
        code_columns = reference.code_columns().len(),
        "loaded reference table"
    );
    Ok(reference)
}

/// Input records plus the dataset's header row.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub headers: Vec<String>,
    pub records: Vec<InputRecord>,
}

/// Loads input records from a CSV file.
///
/// The record id is the `id_column` value when given, otherwise the
/// zero-based row index.
pub fn load_dataset(path: &Path, id_column: Option<&str>) -> Result<Dataset> {
    let table = read_csv_rows(path)?;
    if let Some(column) = id_column {
        table.require_column(path, column)?;
    }

    let mut seen = BTreeSet::new();
    let mut records = Vec::with_capacity(table.rows.len());
    for (idx, row) in table.rows.into_iter().enumerate() {
        let id = match id_column {
            Some(column) => {
                let value = get_optional(&row, column).ok_or_else(|| ReferenceError::BlankField {
                    path: path.to_path_buf(),
                    row: idx + 1,
                    column: column.to_string(),
                })?;
                RecordId::new(value)
            }
            None => RecordId::from(idx),
        };
        if !seen.insert(id.clone()) {
            return Err(ReferenceError::DuplicateRecordId {
                path: path.to_path_buf(),
                id: id.to_string(),
            });
        }
        records.push(InputRecord { id, fields: row });
    }

    debug!(path = %path.display(), records = records.len(), "loaded dataset");
    Ok(Dataset {
        headers: table.headers,
        records,
    })
}

/// Checks that every level's input field is a dataset column.
pub fn check_dataset_fields(headers: &[String], hierarchy: &Hierarchy) -> Result<()> {
    for level in hierarchy {
        if !headers.iter().any(|h| *h == level.input_field) {
            return Err(ReferenceError::MissingInputField {
                level: level.name.clone(),
                field: level.input_field.clone(),
            });
        }
    }
    Ok(())
}

/// Loads candidate choices: a JSON object mapping record id to candidate index.
pub fn load_choices(path: &Path) -> Result<BTreeMap<RecordId, usize>> {
    let contents = std::fs::read_to_string(path).map_err(|e| ReferenceError::io(path, e))?;
    let choices: BTreeMap<RecordId, usize> =
        serde_json::from_str(&contents).map_err(|e| ReferenceError::Json {
            path: path.to_path_buf(),
            source: e,
        })?;
    if choices.is_empty() {
        warn!(path = %path.display(), "choices file is empty");
    }
    Ok(choices)
}
