use std::fs;
use std::path::PathBuf;

use linksight_model::{Hierarchy, HierarchyLevelSpec, ModelError, RecordId};
use linksight_reference::{
    ReferenceError, check_dataset_fields, default_hierarchy_path, default_reference_table_path,
    load_choices, load_dataset, load_hierarchy_config, load_reference_table, sha256_hex,
    snapshot_digest,
};
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write fixture");
    path
}

#[test]
fn bundled_reference_matches_bundled_hierarchy() {
    let config = load_hierarchy_config(&default_hierarchy_path()).expect("load hierarchy");
    let reference = load_reference_table(&default_reference_table_path()).expect("load reference");

    assert_eq!(config.hierarchy.len(), 3);
    assert_eq!(config.matching.score_cutoff, 80);
    reference
        .validate_hierarchy(&config.hierarchy)
        .expect("bundled hierarchy is valid");
}

#[test]
fn reference_columns_and_blank_ancestors() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "ref.csv",
        "\u{feff}code, interlevel ,location,province_code,city_municipality_code\n\
         0722,Prov,Cebu,,\n\
         072217,City, Cebu City ,0722,\n",
    );

    let table = load_reference_table(&path).unwrap();
    assert_eq!(table.len(), 2);
    assert!(table.has_code_column("city_municipality_code"));

    let province = table.get("0722").unwrap();
    assert!(province.ancestor_codes.is_empty());
    let city = table.get("072217").unwrap();
    assert_eq!(city.location, "Cebu City");
    assert_eq!(city.ancestor_code("province_code"), Some("0722"));
}

#[test]
fn reference_requires_core_columns() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "ref.csv", "code,location\n0722,Cebu\n");

    match load_reference_table(&path) {
        Err(ReferenceError::MissingColumn { column, .. }) => assert_eq!(column, "interlevel"),
        other => panic!("expected missing column, got {other:?}"),
    }
}

#[test]
fn reference_rejects_duplicate_codes() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "ref.csv",
        "code,interlevel,location\n0722,Prov,Cebu\n0722,Prov,Bohol\n",
    );

    assert!(matches!(
        load_reference_table(&path),
        Err(ReferenceError::Model(ModelError::DuplicateCode { .. }))
    ));
}

#[test]
fn reference_rejects_blank_codes() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "ref.csv", "code,interlevel,location\n,Prov,Cebu\n");

    match load_reference_table(&path) {
        Err(ReferenceError::BlankField { row, column, .. }) => {
            assert_eq!(row, 1);
            assert_eq!(column, "code");
        }
        other => panic!("expected blank field, got {other:?}"),
    }
}

#[test]
fn dataset_ids_default_to_row_index() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "data.csv",
        "province,city,barangay\nCebu,Cebu City,Lahug\n,San Isidro,\n",
    );

    let dataset = load_dataset(&path, None).unwrap();
    assert_eq!(dataset.headers, vec!["province", "city", "barangay"]);
    let ids: Vec<_> = dataset.records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["0", "1"]);
    assert_eq!(dataset.records[1].value("province"), None);
    assert_eq!(dataset.records[1].value("city"), Some("San Isidro"));
}

#[test]
fn dataset_ids_from_column_must_be_unique() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "data.csv", "id,province\na,Cebu\nb,Bohol\n");
    let dataset = load_dataset(&path, Some("id")).unwrap();
    assert_eq!(dataset.records[1].id, RecordId::new("b"));

    let path = write(&dir, "dup.csv", "id,province\na,Cebu\na,Bohol\n");
    assert!(matches!(
        load_dataset(&path, Some("id")),
        Err(ReferenceError::DuplicateRecordId { id, .. }) if id == "a"
    ));

    assert!(matches!(
        load_dataset(&path, Some("record")),
        Err(ReferenceError::MissingColumn { .. })
    ));
}

#[test]
fn dataset_must_carry_every_input_field() {
    let hierarchy = Hierarchy::new(vec![
        HierarchyLevelSpec::new("province", "province", ["Prov"]),
        HierarchyLevelSpec::new("city_municipality", "city", ["City"]),
    ])
    .unwrap();

    let headers = vec!["province".to_string(), "city".to_string()];
    assert!(check_dataset_fields(&headers, &hierarchy).is_ok());

    let headers = vec!["province".to_string(), "municipality".to_string()];
    match check_dataset_fields(&headers, &hierarchy) {
        Err(ReferenceError::MissingInputField { level, field }) => {
            assert_eq!(level, "city_municipality");
            assert_eq!(field, "city");
        }
        other => panic!("expected missing input field, got {other:?}"),
    }
}

#[test]
fn hierarchy_config_from_file() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "hierarchy.toml",
        r#"
[[levels]]
name = "region"
input_field = "region"
reference_categories = ["Reg"]
"#,
    );

    let config = load_hierarchy_config(&path).unwrap();
    assert_eq!(config.hierarchy.finest().name, "region");
    assert_eq!(config.matching.options().max_matches, 10);

    assert!(matches!(
        load_hierarchy_config(&dir.path().join("missing.toml")),
        Err(ReferenceError::Io { .. })
    ));
}

#[test]
fn choices_map_record_ids_to_indices() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "choices.json", r#"{"3": 1, "row-7": 0}"#);

    let choices = load_choices(&path).unwrap();
    assert_eq!(choices.get(&RecordId::new("3")), Some(&1));
    assert_eq!(choices.get(&RecordId::new("row-7")), Some(&0));

    let path = write(&dir, "bad.json", r#"{"3": -1}"#);
    assert!(matches!(load_choices(&path), Err(ReferenceError::Json { .. })));
}

#[test]
fn snapshot_digest_hashes_file_bytes() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "ref.csv", "code,interlevel,location\n");

    let digest = snapshot_digest(&path).unwrap();
    assert_eq!(digest, sha256_hex(b"code,interlevel,location\n"));
    assert_eq!(digest.len(), 64);
}
