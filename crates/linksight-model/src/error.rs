use thiserror::Error;

/// Configuration errors detected before any record is matched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("hierarchy must declare at least one level")]
    EmptyHierarchy,
    #[error("duplicate hierarchy level: {name}")]
    DuplicateLevel { name: String },
    #[error("hierarchy level {name} has an empty {field}")]
    BlankLevelField { name: String, field: &'static str },
    #[error("hierarchy level {name} declares no reference categories")]
    NoCategories { name: String },
    #[error("reference table has no rows for level {level} (categories: {categories})")]
    MissingCategory { level: String, categories: String },
    #[error("reference table lacks code column {column} needed to narrow below level {level}")]
    MissingCodeColumn { level: String, column: String },
    #[error("duplicate reference code: {code}")]
    DuplicateCode { code: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
