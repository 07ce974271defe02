//! Authoritative reference table of administrative-division codes.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::hierarchy::Hierarchy;

/// One row of the reference table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceRecord {
    /// Unique code of the division.
    pub code: String,
    /// Fine-grained category label (e.g. "City", "Mun", "Bgy").
    pub category: String,
    /// Canonical display name.
    pub location: String,
    /// Ancestor codes keyed by column name (`{level}_code`).
    pub ancestor_codes: BTreeMap<String, String>,
}

impl ReferenceRecord {
    pub fn new(
        code: impl Into<String>,
        category: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            category: category.into(),
            location: location.into(),
            ancestor_codes: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_ancestor(mut self, column: impl Into<String>, code: impl Into<String>) -> Self {
        self.ancestor_codes.insert(column.into(), code.into());
        self
    }

    pub fn ancestor_code(&self, column: &str) -> Option<&str> {
        self.ancestor_codes.get(column).map(String::as_str)
    }
}

/// Read-only snapshot of the reference table.
///
/// Shared across concurrent resolutions; all queries borrow immutably.
#[derive(Debug, Clone, Default)]
pub struct ReferenceTable {
    records: Vec<ReferenceRecord>,
    code_columns: BTreeSet<String>,
    by_code: BTreeMap<String, usize>,
}

impl ReferenceTable {
    /// Builds a table from rows and the ancestor code columns of its schema.
    ///
    /// Columns carried by any row are added to the schema even when not listed.
    pub fn new(
        records: Vec<ReferenceRecord>,
        code_columns: impl IntoIterator<Item = String>,
    ) -> Result<Self> {
        let mut code_columns: BTreeSet<String> = code_columns.into_iter().collect();
        let mut by_code = BTreeMap::new();
        for (idx, record) in records.iter().enumerate() {
            if by_code.insert(record.code.clone(), idx).is_some() {
                return Err(ModelError::DuplicateCode {
                    code: record.code.clone(),
                });
            }
            code_columns.extend(record.ancestor_codes.keys().cloned());
        }
        Ok(Self {
            records,
            code_columns,
            by_code,
        })
    }

    pub fn records(&self) -> &[ReferenceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn code_columns(&self) -> &BTreeSet<String> {
        &self.code_columns
    }

    /// Returns true if the schema carries the given ancestor code column.
    pub fn has_code_column(&self, column: &str) -> bool {
        self.code_columns.contains(column)
    }

    pub fn get(&self, code: &str) -> Option<&ReferenceRecord> {
        self.by_code.get(code).map(|&idx| &self.records[idx])
    }

    /// Distinct categories present in the table.
    pub fn categories(&self) -> BTreeSet<&str> {
        self.records.iter().map(|r| r.category.as_str()).collect()
    }

    /// Rows whose category is one of `categories`, in table order.
    pub fn in_categories(&self, categories: &[String]) -> Vec<&ReferenceRecord> {
        self.records
            .iter()
            .filter(|r| categories.iter().any(|c| c == &r.category))
            .collect()
    }

    /// Rows in `categories` whose `code_column` value is one of `codes`.
    pub fn narrowed(
        &self,
        categories: &[String],
        code_column: &str,
        codes: &BTreeSet<String>,
    ) -> Vec<&ReferenceRecord> {
        self.records
            .iter()
            .filter(|r| categories.iter().any(|c| c == &r.category))
            .filter(|r| r.ancestor_code(code_column).is_some_and(|c| codes.contains(c)))
            .collect()
    }

    /// Rows whose own code is one of `codes`, in table order.
    pub fn by_codes(&self, codes: &BTreeSet<String>) -> Vec<&ReferenceRecord> {
        let mut indices: Vec<usize> = codes
            .iter()
            .filter_map(|code| self.by_code.get(code).copied())
            .collect();
        indices.sort_unstable();
        indices.into_iter().map(|idx| &self.records[idx]).collect()
    }

    /// Checks that the hierarchy can be resolved against this table.
    ///
    /// Every level needs rows in at least one of its categories, and every
    /// level except the finest needs a code column to narrow its children.
    pub fn validate_hierarchy(&self, hierarchy: &Hierarchy) -> Result<()> {
        let categories = self.categories();
        let last = hierarchy.len() - 1;
        for (idx, level) in hierarchy.levels().iter().enumerate() {
            if !level
                .reference_categories
                .iter()
                .any(|c| categories.contains(c.as_str()))
            {
                return Err(ModelError::MissingCategory {
                    level: level.name.clone(),
                    categories: level.reference_categories.join(", "),
                });
            }
            let column = level.code_column();
            if idx < last && !self.has_code_column(&column) {
                return Err(ModelError::MissingCodeColumn {
                    level: level.name.clone(),
                    column,
                });
            }
        }
        Ok(())
    }
}
