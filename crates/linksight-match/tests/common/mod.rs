#![allow(dead_code)]

use linksight_model::{Hierarchy, HierarchyLevelSpec, InputRecord, ReferenceRecord, ReferenceTable};

pub fn psgc_hierarchy() -> Hierarchy {
    Hierarchy::new(vec![
        HierarchyLevelSpec::new("province", "province", ["Prov", "Dist"]),
        HierarchyLevelSpec::new("city_municipality", "city", ["City", "Mun", "SubMun"]),
        HierarchyLevelSpec::new("barangay", "barangay", ["Bgy"]),
    ])
    .unwrap()
}

fn province(code: &str, name: &str) -> ReferenceRecord {
    ReferenceRecord::new(code, "Prov", name)
}

fn city(code: &str, category: &str, name: &str, province: &str) -> ReferenceRecord {
    ReferenceRecord::new(code, category, name).with_ancestor("province_code", province)
}

fn barangay(code: &str, name: &str, province: &str, city: &str) -> ReferenceRecord {
    ReferenceRecord::new(code, "Bgy", name)
        .with_ancestor("province_code", province)
        .with_ancestor("city_municipality_code", city)
}

pub fn psgc_reference() -> ReferenceTable {
    ReferenceTable::new(
        vec![
            province("0722", "Cebu"),
            province("0712", "Bohol"),
            province("0314", "Bulacan"),
            province("0349", "Nueva Ecija"),
            city("072217", "City", "Cebu City", "0722"),
            city("072230", "City", "Mandaue City", "0722"),
            city("072226", "City", "Lapu-Lapu City", "0722"),
            city("071242", "City", "Tagbilaran City", "0712"),
            city("031420", "Mun", "San Isidro", "0314"),
            city("034919", "Mun", "San Isidro", "0349"),
            city("034920", "Mun", "San Jose", "0349"),
            barangay("072217050", "Lahug", "0722", "072217"),
            barangay("072217001", "Apas", "0722", "072217"),
            barangay("072217010", "Banilad", "0722", "072217"),
            barangay("072230010", "Banilad", "0722", "072230"),
            barangay("072226020", "Pajo", "0722", "072226"),
            barangay("071242001", "Poblacion I", "0712", "071242"),
            barangay("031420001", "Poblacion", "0314", "031420"),
            barangay("034919001", "Poblacion", "0349", "034919"),
            barangay("034920001", "Santo Niño", "0349", "034920"),
        ],
        Vec::new(),
    )
    .unwrap()
}

pub fn record(id: &str, province: &str, city: &str, barangay: &str) -> InputRecord {
    InputRecord::new(id)
        .with_field("province", province)
        .with_field("city", city)
        .with_field("barangay", barangay)
}
