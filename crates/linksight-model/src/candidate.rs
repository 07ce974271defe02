//! Match candidates and tagged output rows.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::hierarchy::HierarchyLevelSpec;
use crate::record::RecordId;
use crate::reference::ReferenceRecord;

/// Score assigned to exact string matches and exact code lookups.
pub const EXACT_SCORE: u8 = 100;

/// How a candidate row was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateOrigin {
    /// Fuzzy or exact text match against the level's reference subset.
    Matched,
    /// Reference row fetched by code for a level without a text match.
    Lookup,
    /// Synthesized row for a leaf level with no code column of its own.
    Placeholder,
}

impl CandidateOrigin {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Matched => "matched",
            Self::Lookup => "lookup",
            Self::Placeholder => "placeholder",
        }
    }
}

impl fmt::Display for CandidateOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One candidate for one hierarchy level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchCandidate {
    /// Hierarchy level this row resolves.
    pub level: String,
    pub origin: CandidateOrigin,
    /// Reference code; absent on placeholder rows.
    pub code: Option<String>,
    /// Matched reference category, or the level's sentinel category for placeholders.
    pub interlevel: String,
    pub location: Option<String>,
    pub ancestor_codes: BTreeMap<String, String>,
    /// Similarity score (0-100); absent on placeholder rows.
    pub score: Option<u8>,
}

impl MatchCandidate {
    pub fn from_reference(
        level: &HierarchyLevelSpec,
        record: &ReferenceRecord,
        origin: CandidateOrigin,
        score: u8,
    ) -> Self {
        Self {
            level: level.name.clone(),
            origin,
            code: Some(record.code.clone()),
            interlevel: record.category.clone(),
            location: Some(record.location.clone()),
            ancestor_codes: record.ancestor_codes.clone(),
            score: Some(score),
        }
    }

    pub fn placeholder(level: &HierarchyLevelSpec, ancestor_codes: BTreeMap<String, String>) -> Self {
        Self {
            level: level.name.clone(),
            origin: CandidateOrigin::Placeholder,
            code: None,
            interlevel: level.sentinel_category().to_string(),
            location: None,
            ancestor_codes,
            score: None,
        }
    }

    pub fn is_exact(&self) -> bool {
        self.score == Some(EXACT_SCORE)
    }

    /// Code of `level` as seen from this row: the row's own code when it
    /// belongs to that level, otherwise the matching ancestor column.
    pub fn code_at(&self, level: &HierarchyLevelSpec) -> Option<&str> {
        if self.level == level.name {
            if let Some(code) = &self.code {
                return Some(code);
            }
        }
        self.ancestor_codes
            .get(&level.code_column())
            .map(String::as_str)
    }
}

/// A candidate tagged with the input record it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRow {
    pub record_id: RecordId,
    pub candidate: MatchCandidate,
}
