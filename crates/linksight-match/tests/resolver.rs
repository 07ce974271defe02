mod common;

use linksight_match::{HierarchyResolver, LevelStatus, MatchOptions, summarize_record};
use linksight_model::{CandidateOrigin, MatchCandidate, MatchRow, RecordId};

use common::{psgc_hierarchy, psgc_reference, record};

fn level_rows<'r>(rows: &'r [MatchRow], level: &str) -> Vec<&'r MatchCandidate> {
    rows.iter()
        .map(|r| &r.candidate)
        .filter(|c| c.level == level)
        .collect()
}

fn codes(rows: &[&MatchCandidate]) -> Vec<String> {
    rows.iter().filter_map(|c| c.code.clone()).collect()
}

#[test]
fn exact_input_resolves_every_level() {
    let hierarchy = psgc_hierarchy();
    let reference = psgc_reference();
    let resolver = HierarchyResolver::new(&hierarchy, &reference, MatchOptions::default());

    let rows = resolver.resolve(&record("0", "Cebu", "Cebu City", "Lahug"));

    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|r| r.candidate.score == Some(100)));
    assert!(rows.iter().all(|r| r.candidate.origin == CandidateOrigin::Matched));

    let province = &rows[0].candidate;
    let city = &rows[1].candidate;
    let barangay = &rows[2].candidate;
    assert_eq!(province.code.as_deref(), Some("0722"));
    assert_eq!(city.code.as_deref(), Some("072217"));
    assert_eq!(city.ancestor_codes["province_code"], "0722");
    assert_eq!(barangay.code.as_deref(), Some("072217050"));
    assert_eq!(barangay.ancestor_codes["city_municipality_code"], "072217");
    assert_eq!(barangay.ancestor_codes["province_code"], "0722");
}

#[test]
fn misspelled_city_still_narrows_barangays() {
    let hierarchy = psgc_hierarchy();
    let reference = psgc_reference();
    let resolver = HierarchyResolver::new(&hierarchy, &reference, MatchOptions::default());

    let rows = resolver.resolve(&record("1", "Cebu", "Cebu Cty", "Banilad"));

    let cities = level_rows(&rows, "city_municipality");
    assert_eq!(cities.len(), 1);
    assert_eq!(cities[0].score, Some(94));
    assert_eq!(cities[0].code.as_deref(), Some("072217"));

    // Only the Banilad under Cebu City, not the one under Mandaue City.
    let barangays = level_rows(&rows, "barangay");
    assert_eq!(codes(&barangays), vec!["072217010"]);
}

#[test]
fn blank_leaf_gets_placeholder_from_city() {
    let hierarchy = psgc_hierarchy();
    let reference = psgc_reference();
    let resolver = HierarchyResolver::new(&hierarchy, &reference, MatchOptions::default());

    let rows = resolver.resolve(&record("2", "Cebu", "Cebu City", ""));

    assert_eq!(rows.len(), 3);
    let placeholders = level_rows(&rows, "barangay");
    assert_eq!(placeholders.len(), 1);
    let placeholder = placeholders[0];
    assert_eq!(placeholder.origin, CandidateOrigin::Placeholder);
    assert_eq!(placeholder.interlevel, "Bgy");
    assert_eq!(placeholder.score, None);
    assert_eq!(placeholder.code, None);
    assert_eq!(placeholder.ancestor_codes["city_municipality_code"], "072217");
    assert_eq!(placeholder.ancestor_codes["province_code"], "0722");
}

#[test]
fn ambiguous_city_without_province_surfaces_every_candidate() {
    let hierarchy = psgc_hierarchy();
    let reference = psgc_reference();
    let resolver = HierarchyResolver::new(&hierarchy, &reference, MatchOptions::default());

    let rows = resolver.resolve(&record("3", "", "Sn Isidro", ""));

    let cities = level_rows(&rows, "city_municipality");
    assert_eq!(codes(&cities), vec!["031420", "034919"]);
    assert!(cities.iter().all(|c| c.score == Some(95)));

    // The province is reconstructed from both candidates' ancestor codes.
    let provinces = level_rows(&rows, "province");
    assert_eq!(codes(&provinces), vec!["0314", "0349"]);
    assert!(provinces.iter().all(|c| c.origin == CandidateOrigin::Lookup));
    assert!(provinces.iter().all(|c| c.score == Some(100)));

    let placeholders = level_rows(&rows, "barangay");
    assert_eq!(placeholders.len(), 2);

    let summary = summarize_record(&hierarchy, &RecordId::new("3"), &rows);
    assert_eq!(
        summary.status("city_municipality"),
        Some(LevelStatus::Ambiguous { candidates: 2 })
    );
    assert!(summary.needs_review());
}

#[test]
fn unmatched_level_keeps_previous_narrowing() {
    let hierarchy = psgc_hierarchy();
    let reference = psgc_reference();
    let resolver = HierarchyResolver::new(&hierarchy, &reference, MatchOptions::default());

    let rows = resolver.resolve(&record("4", "Cebu", "Xyzzy", "Banilad"));

    // Barangays narrow on the province, so both Cebu Banilads surface.
    let barangays = level_rows(&rows, "barangay");
    assert_eq!(codes(&barangays), vec!["072217010", "072230010"]);

    // The unmatched city is rebuilt from the barangays' city codes.
    let cities = level_rows(&rows, "city_municipality");
    assert_eq!(codes(&cities), vec!["072217", "072230"]);
    assert!(cities.iter().all(|c| c.origin == CandidateOrigin::Lookup));
}

#[test]
fn narrowing_prevents_cross_province_matches() {
    let hierarchy = psgc_hierarchy();
    let reference = psgc_reference();
    let resolver = HierarchyResolver::new(&hierarchy, &reference, MatchOptions::default());

    let rows = resolver.resolve(&record("5", "Bohol", "", "Lahug"));

    assert_eq!(codes(&level_rows(&rows, "province")), vec!["0712"]);
    assert!(level_rows(&rows, "city_municipality").is_empty());
    let barangays = level_rows(&rows, "barangay");
    assert_eq!(barangays.len(), 1);
    assert_eq!(barangays[0].origin, CandidateOrigin::Placeholder);
    assert_eq!(barangays[0].ancestor_codes["province_code"], "0712");
}

#[test]
fn every_row_is_tagged_with_the_record_id() {
    let hierarchy = psgc_hierarchy();
    let reference = psgc_reference();
    let resolver = HierarchyResolver::new(&hierarchy, &reference, MatchOptions::default());

    let rows = resolver.resolve(&record("row-42", "", "San Isidro", "Poblacion"));

    assert!(!rows.is_empty());
    assert!(rows.iter().all(|r| r.record_id == RecordId::new("row-42")));
}

#[test]
fn blank_record_produces_no_rows() {
    let hierarchy = psgc_hierarchy();
    let reference = psgc_reference();
    let resolver = HierarchyResolver::new(&hierarchy, &reference, MatchOptions::default());

    assert!(resolver.resolve(&record("6", " ", "", "")).is_empty());
}

#[test]
fn resolver_is_shareable_across_threads() {
    let hierarchy = psgc_hierarchy();
    let reference = psgc_reference();
    let resolver = HierarchyResolver::new(&hierarchy, &reference, MatchOptions::default());
    let inputs = [
        record("a", "Cebu", "Cebu City", "Lahug"),
        record("b", "Nueva Ecija", "San Jose", "Santo Nino"),
    ];

    let sequential: Vec<_> = inputs.iter().map(|r| resolver.resolve(r)).collect();
    let parallel: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = inputs
            .iter()
            .map(|r| scope.spawn(move || resolver.resolve(r)))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert_eq!(sequential, parallel);
}
