#![deny(unsafe_code)]

use std::path::PathBuf;

use linksight_model::ModelError;

#[derive(Debug, thiserror::Error)]
pub enum ReferenceError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML config {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to parse JSON {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse CSV {path}: {message}")]
    Csv { path: PathBuf, message: String },

    #[error("{path}: missing required column {column}")]
    MissingColumn { path: PathBuf, column: String },

    #[error("{path}: row {row} has an empty {column}")]
    BlankField {
        path: PathBuf,
        row: usize,
        column: String,
    },

    #[error("{path}: duplicate record id {id}")]
    DuplicateRecordId { path: PathBuf, id: String },

    #[error("dataset has no column {field} for hierarchy level {level}")]
    MissingInputField { level: String, field: String },

    #[error("invalid matching config: {message}")]
    InvalidMatching { message: String },

    #[error(transparent)]
    Model(#[from] ModelError),
}

impl ReferenceError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(path: &std::path::Path, source: csv::Error) -> Self {
        Self::Csv {
            path: path.to_path_buf(),
            message: source.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReferenceError>;
