#![deny(unsafe_code)]

//! Hierarchical location matching.
//!
//! [`HierarchyResolver`] walks the configured levels of one input record,
//! scoring each level's free text against a narrowed slice of the reference
//! table and backfilling levels that produced no match.

pub mod accumulator;
pub mod backfill;
pub mod choice;
pub mod error;
pub mod level;
pub mod resolver;
pub mod score;
pub mod summary;

pub use accumulator::MatchAccumulator;
pub use choice::{CanonicalMatch, canonical_match, finest_candidates};
pub use error::ChoiceError;
pub use level::{DEFAULT_MAX_MATCHES, DEFAULT_SCORE_CUTOFF, MatchOptions, match_level};
pub use resolver::HierarchyResolver;
pub use score::{ScoredChoice, best_matches, similarity};
pub use summary::{LevelStatus, LevelSummary, RecordSummary, StatusCounts, summarize_record, tally};
