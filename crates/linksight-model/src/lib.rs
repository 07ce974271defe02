#![deny(unsafe_code)]

//! Data model for resolving free-text locations against a reference table.

pub mod candidate;
pub mod error;
pub mod hierarchy;
pub mod record;
pub mod reference;

pub use candidate::{CandidateOrigin, EXACT_SCORE, MatchCandidate, MatchRow};
pub use error::{ModelError, Result};
pub use hierarchy::{CODE_COLUMN_SUFFIX, Hierarchy, HierarchyLevelSpec};
pub use record::{InputRecord, RecordId};
pub use reference::{ReferenceRecord, ReferenceTable};
