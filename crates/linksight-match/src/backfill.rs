//! Reconstruction of levels that produced no direct match.

use std::collections::BTreeSet;

use linksight_model::{
    CandidateOrigin, EXACT_SCORE, Hierarchy, HierarchyLevelSpec, MatchCandidate, ReferenceTable,
};
use tracing::debug;

use crate::accumulator::MatchAccumulator;

/// Backfills every missing level, in declared order.
///
/// Rows are appended to `accumulated` as each level is processed, so a level
/// reconstructed by code lookup can anchor a placeholder for a finer level.
pub fn resolve_missing_levels(
    hierarchy: &Hierarchy,
    reference: &ReferenceTable,
    missing: &[&HierarchyLevelSpec],
    accumulated: &mut MatchAccumulator,
) {
    for &level in missing {
        let rows = if reference.has_code_column(&level.code_column()) {
            lookup_rows(level, reference, accumulated)
        } else {
            placeholder_rows(hierarchy, level, accumulated)
        };
        debug!(level = %level.name, rows = rows.len(), "missing level backfilled");
        accumulated.extend(rows);
    }
}

/// Fetches the reference rows whose codes already appear on accumulated rows
/// in this level's code column.
fn lookup_rows(
    level: &HierarchyLevelSpec,
    reference: &ReferenceTable,
    accumulated: &MatchAccumulator,
) -> Vec<MatchCandidate> {
    let codes: BTreeSet<String> = accumulated
        .rows()
        .iter()
        .filter_map(|row| row.code_at(level))
        .map(str::to_string)
        .collect();
    if codes.is_empty() {
        return Vec::new();
    }
    reference
        .by_codes(&codes)
        .into_iter()
        .map(|record| {
            MatchCandidate::from_reference(level, record, CandidateOrigin::Lookup, EXACT_SCORE)
        })
        .collect()
}

/// Builds one placeholder per distinct code of the nearest coarser level that
/// has coded rows. A leaf level has no code column of its own, so its rows
/// can only be linked through that ancestor.
fn placeholder_rows(
    hierarchy: &Hierarchy,
    level: &HierarchyLevelSpec,
    accumulated: &MatchAccumulator,
) -> Vec<MatchCandidate> {
    let Some(index) = hierarchy.position(&level.name) else {
        return Vec::new();
    };
    let Some(anchor) = hierarchy.nearest_coarser(index, |l| accumulated.has_codes_for(l)) else {
        debug!(level = %level.name, "no resolved ancestor for placeholder");
        return Vec::new();
    };

    let column = anchor.code_column();
    let mut seen = BTreeSet::new();
    let mut rows = Vec::new();
    for row in accumulated.for_level(&anchor.name) {
        let Some(code) = row.code_at(anchor) else {
            continue;
        };
        if !seen.insert(code.to_string()) {
            continue;
        }
        let mut ancestor_codes = row.ancestor_codes.clone();
        ancestor_codes.insert(column.clone(), code.to_string());
        rows.push(MatchCandidate::placeholder(level, ancestor_codes));
    }
    rows
}
