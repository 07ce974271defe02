use std::path::PathBuf;

use linksight_match::StatusCounts;

#[derive(Debug)]
pub struct MatchResult {
    pub reference: PathBuf,
    pub reference_digest: String,
    pub records: usize,
    pub candidate_rows: usize,
    pub levels: Vec<(String, StatusCounts)>,
    pub needs_review: usize,
    pub output: Option<PathBuf>,
    pub canonical_output: Option<PathBuf>,
    pub canonical: usize,
    pub pending: usize,
}
