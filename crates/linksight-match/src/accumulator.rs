use linksight_model::{HierarchyLevelSpec, MatchCandidate, MatchRow, RecordId};

/// Append-only collection of one record's candidate rows.
///
/// Rows are kept in the order they were produced and tagged with the record
/// identifier once, when the record is finished.
#[derive(Debug, Clone, Default)]
pub struct MatchAccumulator {
    rows: Vec<MatchCandidate>,
}

impl MatchAccumulator {
    pub fn extend(&mut self, rows: impl IntoIterator<Item = MatchCandidate>) {
        self.rows.extend(rows);
    }

    pub fn rows(&self) -> &[MatchCandidate] {
        &self.rows
    }

    pub fn for_level<'a>(&'a self, level: &'a str) -> impl Iterator<Item = &'a MatchCandidate> + 'a {
        self.rows.iter().filter(move |row| row.level == level)
    }

    /// Returns true if some row of `level` carries a code.
    pub fn has_codes_for(&self, level: &HierarchyLevelSpec) -> bool {
        self.for_level(&level.name).any(|row| row.code.is_some())
    }

    pub fn finish(self, record_id: &RecordId) -> Vec<MatchRow> {
        self.rows
            .into_iter()
            .map(|candidate| MatchRow {
                record_id: record_id.clone(),
                candidate,
            })
            .collect()
    }
}
