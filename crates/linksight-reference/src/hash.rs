#![deny(unsafe_code)]

use std::path::Path;

use sha2::Digest;

use crate::error::{ReferenceError, Result};

pub fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    hex::encode(digest)
}

/// Lowercase hex SHA-256 of a reference snapshot file.
pub fn snapshot_digest(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|e| ReferenceError::io(path, e))?;
    Ok(sha256_hex(&bytes))
}
