#![deny(unsafe_code)]

//! Loading LinkSight reference data, hierarchy configuration and datasets.

pub mod config;
pub mod csv_utils;
pub mod error;
pub mod hash;
pub mod loaders;
pub mod paths;

pub use config::{HierarchyConfig, MatchingConfig, load_hierarchy_config};
pub use error::{ReferenceError, Result};
pub use hash::{sha256_hex, snapshot_digest};
pub use loaders::{Dataset, check_dataset_fields, load_choices, load_dataset, load_reference_table};
pub use paths::{
    HIERARCHY_FILE, REFERENCE_ENV_VAR, REFERENCE_TABLE_FILE, default_hierarchy_path,
    default_reference_table_path, reference_root,
};
