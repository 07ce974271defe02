//! Per-level classification of resolved records.

use std::collections::BTreeMap;

use linksight_model::{CandidateOrigin, Hierarchy, MatchRow, RecordId};
use serde::Serialize;

/// Outcome of one level for one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LevelStatus {
    /// Single exact text match.
    Exact,
    /// Single fuzzy match.
    Near { score: u8 },
    /// Several coded candidates; needs a choice.
    Ambiguous { candidates: usize },
    /// Single row reconstructed by code lookup.
    Backfilled,
    /// Only placeholder rows.
    Placeholder,
    /// No rows at all.
    Missing,
}

impl LevelStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Near { .. } => "near",
            Self::Ambiguous { .. } => "ambiguous",
            Self::Backfilled => "backfilled",
            Self::Placeholder => "placeholder",
            Self::Missing => "missing",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelSummary {
    pub level: String,
    #[serde(flatten)]
    pub status: LevelStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordSummary {
    pub record_id: RecordId,
    pub levels: Vec<LevelSummary>,
}

impl RecordSummary {
    /// True when any level surfaced more than one coded candidate.
    pub fn needs_review(&self) -> bool {
        self.levels
            .iter()
            .any(|l| matches!(l.status, LevelStatus::Ambiguous { .. }))
    }

    pub fn status(&self, level: &str) -> Option<LevelStatus> {
        self.levels.iter().find(|l| l.level == level).map(|l| l.status)
    }
}

/// Classifies every hierarchy level of one record's rows.
pub fn summarize_record(hierarchy: &Hierarchy, record_id: &RecordId, rows: &[MatchRow]) -> RecordSummary {
    let levels = hierarchy
        .levels()
        .iter()
        .map(|level| {
            let level_rows: Vec<_> = rows
                .iter()
                .map(|r| &r.candidate)
                .filter(|c| c.level == level.name)
                .collect();
            let coded: Vec<_> = level_rows.iter().filter(|c| c.code.is_some()).collect();
            let status = match coded.as_slice() {
                [] if level_rows.is_empty() => LevelStatus::Missing,
                [] => LevelStatus::Placeholder,
                [single] => match single.origin {
                    CandidateOrigin::Lookup => LevelStatus::Backfilled,
                    _ if single.is_exact() => LevelStatus::Exact,
                    _ => LevelStatus::Near {
                        score: single.score.unwrap_or_default(),
                    },
                },
                many => LevelStatus::Ambiguous {
                    candidates: many.len(),
                },
            };
            LevelSummary {
                level: level.name.clone(),
                status,
            }
        })
        .collect();
    RecordSummary {
        record_id: record_id.clone(),
        levels,
    }
}

/// Status counts for one level across a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub exact: usize,
    pub near: usize,
    pub ambiguous: usize,
    pub backfilled: usize,
    pub placeholder: usize,
    pub missing: usize,
}

impl StatusCounts {
    fn add(&mut self, status: LevelStatus) {
        match status {
            LevelStatus::Exact => self.exact += 1,
            LevelStatus::Near { .. } => self.near += 1,
            LevelStatus::Ambiguous { .. } => self.ambiguous += 1,
            LevelStatus::Backfilled => self.backfilled += 1,
            LevelStatus::Placeholder => self.placeholder += 1,
            LevelStatus::Missing => self.missing += 1,
        }
    }
}

/// Counts statuses per level, in hierarchy order.
pub fn tally<'s>(
    hierarchy: &Hierarchy,
    summaries: impl IntoIterator<Item = &'s RecordSummary>,
) -> Vec<(String, StatusCounts)> {
    let mut counts: BTreeMap<&str, StatusCounts> = BTreeMap::new();
    for summary in summaries {
        for level in &summary.levels {
            counts.entry(level.level.as_str()).or_default().add(level.status);
        }
    }
    hierarchy
        .levels()
        .iter()
        .map(|level| {
            (
                level.name.clone(),
                counts.remove(level.name.as_str()).unwrap_or_default(),
            )
        })
        .collect()
}
