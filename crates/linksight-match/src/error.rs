//! Error types for folding candidates into a canonical match.

use std::fmt;

use linksight_model::RecordId;

/// Errors from choosing a canonical candidate for a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChoiceError {
    /// No level produced a coded candidate.
    Unresolved { record_id: RecordId },
    /// Several candidates at the finest resolved level and no choice given.
    Ambiguous {
        record_id: RecordId,
        level: String,
        candidates: usize,
    },
    /// The chosen index does not exist.
    OutOfRange {
        record_id: RecordId,
        choice: usize,
        candidates: usize,
    },
}

impl fmt::Display for ChoiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unresolved { record_id } => write!(f, "Record {record_id} has no coded match"),
            Self::Ambiguous {
                record_id,
                level,
                candidates,
            } => write!(
                f,
                "Record {record_id} has {candidates} candidates at level '{level}'"
            ),
            Self::OutOfRange {
                record_id,
                choice,
                candidates,
            } => write!(
                f,
                "Choice {choice} for record {record_id} is out of range ({candidates} candidates)"
            ),
        }
    }
}

impl std::error::Error for ChoiceError {}
