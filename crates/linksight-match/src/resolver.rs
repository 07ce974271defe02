//! Cascading resolution of one input record across all hierarchy levels.
//!
//! Levels are walked coarsest first. Codes matched at a level narrow the
//! reference rows searched at the next level; a blank or unmatched level is
//! skipped without disturbing that narrowing, and reconstructed afterwards
//! from its resolved neighbours.

use std::collections::BTreeSet;

use linksight_model::{
    Hierarchy, HierarchyLevelSpec, InputRecord, MatchRow, ReferenceRecord, ReferenceTable,
};
use tracing::{debug, debug_span};

use crate::accumulator::MatchAccumulator;
use crate::backfill::resolve_missing_levels;
use crate::level::{MatchOptions, match_level};

/// Codes matched at the last successfully matched level.
struct Narrowing<'h> {
    level: &'h HierarchyLevelSpec,
    codes: BTreeSet<String>,
}

/// Resolves input records against a shared reference snapshot.
///
/// Holds only borrowed, read-only state, so one resolver can serve many
/// threads at once.
#[derive(Debug, Clone, Copy)]
pub struct HierarchyResolver<'a> {
    hierarchy: &'a Hierarchy,
    reference: &'a ReferenceTable,
    options: MatchOptions,
}

impl<'a> HierarchyResolver<'a> {
    pub fn new(hierarchy: &'a Hierarchy, reference: &'a ReferenceTable, options: MatchOptions) -> Self {
        Self {
            hierarchy,
            reference,
            options,
        }
    }

    pub fn hierarchy(&self) -> &'a Hierarchy {
        self.hierarchy
    }

    pub fn options(&self) -> &MatchOptions {
        &self.options
    }

    /// Resolves every level of `record` and returns its tagged candidate rows.
    pub fn resolve(&self, record: &InputRecord) -> Vec<MatchRow> {
        let span = debug_span!("resolve", record_id = %record.id);
        let _guard = span.enter();

        let mut accumulated = MatchAccumulator::default();
        let mut missing: Vec<&HierarchyLevelSpec> = Vec::new();
        let mut narrowing: Option<Narrowing<'_>> = None;

        for level in self.hierarchy {
            let Some(query) = record.value(&level.input_field) else {
                debug!(level = %level.name, "no input value");
                missing.push(level);
                continue;
            };

            let subset = self.reference_subset(level, narrowing.as_ref());
            let candidates = match_level(level, query, &subset, &self.options);
            if candidates.is_empty() {
                debug!(level = %level.name, subset = subset.len(), "no candidate above cutoff");
                missing.push(level);
                continue;
            }

            let codes = candidates.iter().filter_map(|c| c.code.clone()).collect();
            accumulated.extend(candidates);
            narrowing = Some(Narrowing { level, codes });
        }

        if !missing.is_empty() {
            resolve_missing_levels(self.hierarchy, self.reference, &missing, &mut accumulated);
        }

        let rows = accumulated.finish(&record.id);
        debug!(rows = rows.len(), missing = missing.len(), "record resolved");
        rows
    }

    fn reference_subset(
        &self,
        level: &HierarchyLevelSpec,
        narrowing: Option<&Narrowing<'_>>,
    ) -> Vec<&'a ReferenceRecord> {
        match narrowing {
            Some(previous) => self.reference.narrowed(
                &level.reference_categories,
                &previous.level.code_column(),
                &previous.codes,
            ),
            None => self.reference.in_categories(&level.reference_categories),
        }
    }
}
