//! Reference directory path resolution.

use std::path::PathBuf;

/// Environment variable for overriding the reference directory.
pub const REFERENCE_ENV_VAR: &str = "LINKSIGHT_REFERENCE_DIR";

/// File name of the hierarchy configuration inside the reference directory.
pub const HIERARCHY_FILE: &str = "hierarchy.toml";

/// File name of the bundled reference table.
pub const REFERENCE_TABLE_FILE: &str = "psgc_sample.csv";

/// Get the reference root directory.
///
/// Resolution order:
/// 1. `LINKSIGHT_REFERENCE_DIR` environment variable
/// 2. `reference/` directory relative to workspace root
pub fn reference_root() -> PathBuf {
    if let Ok(root) = std::env::var(REFERENCE_ENV_VAR) {
        return PathBuf::from(root);
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../reference")
}

pub fn default_hierarchy_path() -> PathBuf {
    reference_root().join(HIERARCHY_FILE)
}

pub fn default_reference_table_path() -> PathBuf {
    reference_root().join(REFERENCE_TABLE_FILE)
}
