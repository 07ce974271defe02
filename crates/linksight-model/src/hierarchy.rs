//! Hierarchy level definitions.
//!
//! A hierarchy is an ordered list of levels, coarsest first. The order drives
//! candidate narrowing: codes matched at one level restrict the reference rows
//! considered at the next finer level.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Suffix appended to a level name to form its code column.
pub const CODE_COLUMN_SUFFIX: &str = "_code";

/// One level of an administrative hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyLevelSpec {
    /// Level identifier (e.g. "province").
    pub name: String,
    /// Input record field holding this level's free-text value.
    pub input_field: String,
    /// Reference categories belonging to this level (e.g. "City" and "Mun").
    pub reference_categories: Vec<String>,
}

impl HierarchyLevelSpec {
    pub fn new(
        name: impl Into<String>,
        input_field: impl Into<String>,
        reference_categories: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            input_field: input_field.into(),
            reference_categories: reference_categories.into_iter().map(Into::into).collect(),
        }
    }

    /// Name of the reference column carrying this level's code on descendant rows.
    pub fn code_column(&self) -> String {
        format!("{}{CODE_COLUMN_SUFFIX}", self.name)
    }

    /// Returns true if `category` belongs to this level.
    pub fn includes_category(&self, category: &str) -> bool {
        self.reference_categories.iter().any(|c| c == category)
    }

    /// First declared category, used to label placeholder rows.
    pub fn sentinel_category(&self) -> &str {
        self.reference_categories
            .first()
            .map(String::as_str)
            .unwrap_or_default()
    }
}

/// Validated, ordered list of hierarchy levels (coarsest first).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hierarchy {
    levels: Vec<HierarchyLevelSpec>,
}

impl Hierarchy {
    pub fn new(levels: Vec<HierarchyLevelSpec>) -> Result<Self> {
        if levels.is_empty() {
            return Err(ModelError::EmptyHierarchy);
        }
        let mut seen = BTreeSet::new();
        for level in &levels {
            if level.name.trim().is_empty() {
                return Err(ModelError::BlankLevelField {
                    name: level.name.clone(),
                    field: "name",
                });
            }
            if level.input_field.trim().is_empty() {
                return Err(ModelError::BlankLevelField {
                    name: level.name.clone(),
                    field: "input_field",
                });
            }
            if level.reference_categories.is_empty() {
                return Err(ModelError::NoCategories {
                    name: level.name.clone(),
                });
            }
            if !seen.insert(level.name.as_str()) {
                return Err(ModelError::DuplicateLevel {
                    name: level.name.clone(),
                });
            }
        }
        Ok(Self { levels })
    }

    pub fn levels(&self) -> &[HierarchyLevelSpec] {
        &self.levels
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.levels.iter().position(|l| l.name == name)
    }

    pub fn get(&self, name: &str) -> Option<&HierarchyLevelSpec> {
        self.levels.iter().find(|l| l.name == name)
    }

    /// Walks backward from `index` (exclusive) and returns the nearest coarser
    /// level accepted by `accept`.
    pub fn nearest_coarser<F>(&self, index: usize, mut accept: F) -> Option<&HierarchyLevelSpec>
    where
        F: FnMut(&HierarchyLevelSpec) -> bool,
    {
        self.levels[..index.min(self.levels.len())]
            .iter()
            .rev()
            .find(|level| accept(level))
    }

    /// Finest (last) level.
    pub fn finest(&self) -> &HierarchyLevelSpec {
        // Non-empty by construction.
        &self.levels[self.levels.len() - 1]
    }
}

impl<'a> IntoIterator for &'a Hierarchy {
    type Item = &'a HierarchyLevelSpec;
    type IntoIter = std::slice::Iter<'a, HierarchyLevelSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.levels.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn psgc() -> Vec<HierarchyLevelSpec> {
        vec![
            HierarchyLevelSpec::new("province", "province", ["Prov", "Dist"]),
            HierarchyLevelSpec::new("city_municipality", "city", ["City", "Mun", "SubMun"]),
            HierarchyLevelSpec::new("barangay", "barangay", ["Bgy"]),
        ]
    }

    #[test]
    fn code_column_uses_level_name() {
        let level = HierarchyLevelSpec::new("city_municipality", "city", ["City"]);
        assert_eq!(level.code_column(), "city_municipality_code");
    }

    #[test]
    fn rejects_duplicate_levels() {
        let mut levels = psgc();
        levels.push(HierarchyLevelSpec::new("province", "prov2", ["Prov"]));
        assert_eq!(
            Hierarchy::new(levels),
            Err(ModelError::DuplicateLevel {
                name: "province".to_string()
            })
        );
    }

    #[test]
    fn rejects_level_without_categories() {
        let levels = vec![HierarchyLevelSpec {
            name: "province".to_string(),
            input_field: "province".to_string(),
            reference_categories: vec![],
        }];
        assert!(matches!(
            Hierarchy::new(levels),
            Err(ModelError::NoCategories { .. })
        ));
    }

    #[test]
    fn nearest_coarser_skips_rejected_levels() {
        let hierarchy = Hierarchy::new(psgc()).unwrap();
        let found = hierarchy.nearest_coarser(2, |l| l.name == "province");
        assert_eq!(found.map(|l| l.name.as_str()), Some("province"));
        let found = hierarchy.nearest_coarser(2, |_| true);
        assert_eq!(found.map(|l| l.name.as_str()), Some("city_municipality"));
        assert!(hierarchy.nearest_coarser(0, |_| true).is_none());
    }
}
