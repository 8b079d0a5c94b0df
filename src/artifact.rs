//! Loading of on-disk model artifacts.
//!
//! Artifacts are read once at startup. Any failure here is fatal for the
//! process, so every error names the offending file.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::{AssistError, Result};

/// Read and deserialize a JSON artifact.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path).map_err(|e| {
        AssistError::artifact(format!("cannot read {}: {e}", path.display()))
    })?;
    serde_json::from_str(&content)
        .map_err(|e| AssistError::artifact(format!("cannot parse {}: {e}", path.display())))
}

/// Read a JSON array of strings, such as a vocabulary or a label list.
pub fn read_word_list(path: &Path) -> Result<Vec<String>> {
    let words: Vec<String> = read_json(path)?;
    if words.is_empty() {
        return Err(AssistError::artifact(format!(
            "{} contains no entries",
            path.display()
        )));
    }
    log::debug!("Read {} entries from {}", words.len(), path.display());
    Ok(words)
}
