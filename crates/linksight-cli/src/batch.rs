//! Batch resolution of a dataset.

use std::collections::BTreeMap;

use linksight_match::{
    CanonicalMatch, ChoiceError, HierarchyResolver, RecordSummary, canonical_match,
    summarize_record,
};
use linksight_model::{InputRecord, MatchRow, RecordId};
use tracing::{debug, info_span, trace, warn};

use crate::logging::redact_value;

/// Everything produced by resolving one dataset.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Candidate rows of every record, grouped by record in input order.
    pub rows: Vec<MatchRow>,
    pub summaries: Vec<RecordSummary>,
    /// One canonical match per record that could be folded.
    pub canonical: Vec<CanonicalMatch>,
    /// Records that could not be folded to a canonical match.
    pub pending: Vec<ChoiceError>,
}

impl BatchOutcome {
    pub fn needs_review(&self) -> usize {
        self.summaries.iter().filter(|s| s.needs_review()).count()
    }
}

/// Resolves every record independently.
///
/// `choices` selects among several candidates of a record's finest resolved
/// level when folding canonical matches.
pub fn resolve_batch(
    resolver: &HierarchyResolver<'_>,
    records: &[InputRecord],
    choices: &BTreeMap<RecordId, usize>,
) -> BatchOutcome {
    let hierarchy = resolver.hierarchy();
    let mut outcome = BatchOutcome::default();

    for record in records {
        let span = info_span!("record", record_id = %record.id);
        let _guard = span.enter();
        for level in hierarchy {
            if let Some(value) = record.value(&level.input_field) {
                trace!(level = %level.name, value = redact_value(value), "input");
            }
        }

        let rows = resolver.resolve(record);
        let summary = summarize_record(hierarchy, &record.id, &rows);
        match canonical_match(hierarchy, &record.id, &rows, choices.get(&record.id).copied()) {
            Ok(chosen) => outcome.canonical.push(chosen),
            Err(error) => {
                debug!(%error, "no canonical match");
                outcome.pending.push(error);
            }
        }
        outcome.rows.extend(rows);
        outcome.summaries.push(summary);
    }

    for id in choices.keys() {
        if !records.iter().any(|r| &r.id == id) {
            warn!(record_id = %id, "choice given for unknown record");
        }
    }
    outcome
}
