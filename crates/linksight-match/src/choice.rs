//! Folding a record's candidates into one canonical code.

use std::collections::BTreeMap;

use linksight_model::{Hierarchy, MatchCandidate, MatchRow, RecordId};
use serde::{Deserialize, Serialize};

use crate::error::ChoiceError;

/// The code finally attached to an input record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalMatch {
    pub record_id: RecordId,
    pub level: String,
    pub code: String,
    pub interlevel: String,
    pub location: Option<String>,
    pub ancestor_codes: BTreeMap<String, String>,
    pub score: Option<u8>,
}

impl CanonicalMatch {
    fn from_candidate(record_id: &RecordId, candidate: &MatchCandidate, code: &str) -> Self {
        Self {
            record_id: record_id.clone(),
            level: candidate.level.clone(),
            code: code.to_string(),
            interlevel: candidate.interlevel.clone(),
            location: candidate.location.clone(),
            ancestor_codes: candidate.ancestor_codes.clone(),
            score: candidate.score,
        }
    }
}

/// Coded candidates of the finest level that has any, in output order.
pub fn finest_candidates<'r>(hierarchy: &Hierarchy, rows: &'r [MatchRow]) -> Vec<&'r MatchCandidate> {
    hierarchy
        .levels()
        .iter()
        .rev()
        .map(|level| {
            rows.iter()
                .map(|r| &r.candidate)
                .filter(|c| c.level == level.name && c.code.is_some())
                .collect::<Vec<_>>()
        })
        .find(|candidates| !candidates.is_empty())
        .unwrap_or_default()
}

/// Picks the canonical match for one record.
///
/// A single candidate at the finest resolved level is taken as is. Several
/// candidates need `choice`, an index into [`finest_candidates`].
pub fn canonical_match(
    hierarchy: &Hierarchy,
    record_id: &RecordId,
    rows: &[MatchRow],
    choice: Option<usize>,
) -> Result<CanonicalMatch, ChoiceError> {
    let candidates = finest_candidates(hierarchy, rows);
    let picked = match (choice, candidates.as_slice()) {
        (_, []) => {
            return Err(ChoiceError::Unresolved {
                record_id: record_id.clone(),
            });
        }
        (Some(index), all) => all.get(index).copied().ok_or_else(|| ChoiceError::OutOfRange {
            record_id: record_id.clone(),
            choice: index,
            candidates: all.len(),
        })?,
        (None, [single]) => *single,
        (None, all) => {
            return Err(ChoiceError::Ambiguous {
                record_id: record_id.clone(),
                level: all[0].level.clone(),
                candidates: all.len(),
            });
        }
    };
    let code = picked.code.as_deref().unwrap_or_default();
    Ok(CanonicalMatch::from_candidate(record_id, picked, code))
}

#[cfg(test)]
mod tests {
    use linksight_model::{CandidateOrigin, HierarchyLevelSpec, ReferenceRecord};

    use super::*;

    fn hierarchy() -> Hierarchy {
        Hierarchy::new(vec![
            HierarchyLevelSpec::new("province", "province", ["Prov"]),
            HierarchyLevelSpec::new("city_municipality", "city", ["City", "Mun"]),
        ])
        .unwrap()
    }

    fn rows(hierarchy: &Hierarchy, city_codes: &[&str]) -> Vec<MatchRow> {
        let province = &hierarchy.levels()[0];
        let city = &hierarchy.levels()[1];
        let mut candidates = vec![MatchCandidate::from_reference(
            province,
            &ReferenceRecord::new("0314", "Prov", "Bulacan"),
            CandidateOrigin::Matched,
            100,
        )];
        for code in city_codes {
            candidates.push(MatchCandidate::from_reference(
                city,
                &ReferenceRecord::new(*code, "Mun", "San Isidro").with_ancestor("province_code", "0314"),
                CandidateOrigin::Matched,
                95,
            ));
        }
        candidates
            .into_iter()
            .map(|candidate| MatchRow {
                record_id: RecordId::new("9"),
                candidate,
            })
            .collect()
    }

    #[test]
    fn single_finest_candidate_is_chosen() {
        let hierarchy = hierarchy();
        let rows = rows(&hierarchy, &["031420"]);
        let chosen = canonical_match(&hierarchy, &RecordId::new("9"), &rows, None).unwrap();
        assert_eq!(chosen.code, "031420");
        assert_eq!(chosen.level, "city_municipality");
        assert_eq!(chosen.ancestor_codes.get("province_code").map(String::as_str), Some("0314"));
    }

    #[test]
    fn ambiguity_requires_a_choice() {
        let hierarchy = hierarchy();
        let rows = rows(&hierarchy, &["031420", "034919"]);
        let id = RecordId::new("9");
        assert_eq!(
            canonical_match(&hierarchy, &id, &rows, None),
            Err(ChoiceError::Ambiguous {
                record_id: id.clone(),
                level: "city_municipality".to_string(),
                candidates: 2,
            })
        );
        let chosen = canonical_match(&hierarchy, &id, &rows, Some(1)).unwrap();
        assert_eq!(chosen.code, "034919");
        assert!(matches!(
            canonical_match(&hierarchy, &id, &rows, Some(2)),
            Err(ChoiceError::OutOfRange { choice: 2, candidates: 2, .. })
        ));
    }

    #[test]
    fn falls_back_to_coarser_level() {
        let hierarchy = hierarchy();
        let rows = rows(&hierarchy, &[]);
        let chosen = canonical_match(&hierarchy, &RecordId::new("9"), &rows, None).unwrap();
        assert_eq!(chosen.code, "0314");
    }

    #[test]
    fn no_rows_is_unresolved() {
        let hierarchy = hierarchy();
        let id = RecordId::new("9");
        assert_eq!(
            canonical_match(&hierarchy, &id, &[], None),
            Err(ChoiceError::Unresolved { record_id: id.clone() })
        );
    }
}
