//! Book configuration.

use crate::error::{BookError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Book configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookConfig {
    /// Where the book is saved.
    pub path: PathBuf,

    /// Whether to write an empty book when none exists yet.
    pub create_if_missing: bool,

    /// Whether to save after every command that changed the book.
    pub autosave: bool,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./data/partybook.json"),
            create_if_missing: true,
            autosave: true,
        }
    }
}

impl BookConfig {
    /// Config pointing at `path`, other fields at their defaults.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Read a JSON config file. Absent fields take their defaults.
    ///
    /// A missing file yields [`BookConfig::default`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }

        let text = fs::read_to_string(path)?;
        serde_json::from_str(&text).map_err(|e| {
            BookError::Deserialization(format!("config {}: {e}", path.display()))
        })
    }
}
