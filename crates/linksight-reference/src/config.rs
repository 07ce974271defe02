//! Hierarchy configuration file.

use std::path::Path;

use linksight_match::{DEFAULT_MAX_MATCHES, DEFAULT_SCORE_CUTOFF, MatchOptions};
use linksight_model::{Hierarchy, HierarchyLevelSpec};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ReferenceError, Result};

/// The `[matching]` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    pub score_cutoff: u8,
    pub max_matches: usize,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            score_cutoff: DEFAULT_SCORE_CUTOFF,
            max_matches: DEFAULT_MAX_MATCHES,
        }
    }
}

impl MatchingConfig {
    pub fn validate(&self) -> Result<()> {
        if self.score_cutoff > 100 {
            return Err(ReferenceError::InvalidMatching {
                message: format!("score_cutoff {} exceeds 100", self.score_cutoff),
            });
        }
        if self.max_matches == 0 {
            return Err(ReferenceError::InvalidMatching {
                message: "max_matches must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    pub fn options(&self) -> MatchOptions {
        MatchOptions::default()
            .with_cutoff(self.score_cutoff)
            .with_max_matches(self.max_matches)
    }
}

#[derive(Debug, Deserialize)]
struct RawHierarchyConfig {
    #[serde(default)]
    matching: MatchingConfig,
    #[serde(default)]
    levels: Vec<HierarchyLevelSpec>,
}

/// Validated hierarchy and matching options.
#[derive(Debug, Clone)]
pub struct HierarchyConfig {
    pub matching: MatchingConfig,
    pub hierarchy: Hierarchy,
}

impl HierarchyConfig {
    pub fn from_toml_str(contents: &str, path: &Path) -> Result<Self> {
        let raw: RawHierarchyConfig = toml::from_str(contents).map_err(|e| ReferenceError::Toml {
            path: path.to_path_buf(),
            source: e,
        })?;
        raw.matching.validate()?;
        let hierarchy = Hierarchy::new(raw.levels)?;
        Ok(Self {
            matching: raw.matching,
            hierarchy,
        })
    }
}

pub fn load_hierarchy_config(path: &Path) -> Result<HierarchyConfig> {
    let contents = std::fs::read_to_string(path).map_err(|e| ReferenceError::io(path, e))?;
    let config = HierarchyConfig::from_toml_str(&contents, path)?;
    debug!(
        path = %path.display(),
        levels = config.hierarchy.len(),
        score_cutoff = config.matching.score_cutoff,
        max_matches = config.matching.max_matches,
        "loaded hierarchy config"
    );
    Ok(config)
}
