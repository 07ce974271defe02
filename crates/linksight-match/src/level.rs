//! Matching one hierarchy level against its reference subset.

use std::collections::BTreeMap;

use linksight_model::{CandidateOrigin, HierarchyLevelSpec, MatchCandidate, ReferenceRecord};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::score::best_matches;

/// Default minimum similarity for a candidate to be kept.
pub const DEFAULT_SCORE_CUTOFF: u8 = 80;
/// Default maximum number of candidates per level.
pub const DEFAULT_MAX_MATCHES: usize = 10;

/// Similarity cutoff and candidate cap applied per level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOptions {
    pub score_cutoff: u8,
    pub max_matches: usize,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            score_cutoff: DEFAULT_SCORE_CUTOFF,
            max_matches: DEFAULT_MAX_MATCHES,
        }
    }
}

impl MatchOptions {
    #[must_use]
    pub fn with_cutoff(mut self, score_cutoff: u8) -> Self {
        self.score_cutoff = score_cutoff;
        self
    }

    #[must_use]
    pub fn with_max_matches(mut self, max_matches: usize) -> Self {
        self.max_matches = max_matches;
        self
    }
}

/// Reference rows grouped by display text, in first-seen order.
///
/// Several rows may share a location (two barangays named "San Isidro" under
/// different municipalities); they are scored once and surfaced together.
struct LocationGroups<'r> {
    order: Vec<&'r str>,
    rows: BTreeMap<&'r str, Vec<&'r ReferenceRecord>>,
}

impl<'r> LocationGroups<'r> {
    fn build(subset: &[&'r ReferenceRecord]) -> Self {
        let mut order = Vec::new();
        let mut rows: BTreeMap<&'r str, Vec<&'r ReferenceRecord>> = BTreeMap::new();
        for &record in subset {
            let entry = rows.entry(record.location.as_str()).or_default();
            if entry.is_empty() {
                order.push(record.location.as_str());
            }
            entry.push(record);
        }
        Self { order, rows }
    }

    fn rows(&self, location: &str) -> &[&'r ReferenceRecord] {
        self.rows.get(location).map(Vec::as_slice).unwrap_or_default()
    }
}

/// Resolves `query` against one level's reference subset.
///
/// Returns candidates in descending score order. If any candidate is an
/// exact match only exact matches are kept. The result never exceeds
/// `options.max_matches` rows.
pub fn match_level(
    level: &HierarchyLevelSpec,
    query: &str,
    subset: &[&ReferenceRecord],
    options: &MatchOptions,
) -> Vec<MatchCandidate> {
    let groups = LocationGroups::build(subset);
    let scored = best_matches(
        query,
        groups.order.iter().copied(),
        options.score_cutoff,
        options.max_matches,
    );

    let mut candidates: Vec<MatchCandidate> = scored
        .iter()
        .flat_map(|scored| {
            groups.rows(scored.choice).iter().map(move |record| {
                MatchCandidate::from_reference(level, record, CandidateOrigin::Matched, scored.score)
            })
        })
        .collect();

    if candidates.iter().any(MatchCandidate::is_exact) {
        candidates.retain(MatchCandidate::is_exact);
    }
    candidates.truncate(options.max_matches);

    debug!(
        level = %level.name,
        subset = subset.len(),
        locations = groups.order.len(),
        candidates = candidates.len(),
        best_score = candidates.first().and_then(|c| c.score).unwrap_or_default(),
        "level scored"
    );
    candidates
}
