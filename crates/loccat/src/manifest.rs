//! The index manifest: an ordered declaration of which source files compose
//! the catalog.
//!
//! The manifest is a plain JSON array of file names (`index.json` next to the
//! source files). Its order is load order, and load order is what decides
//! which occurrence wins when ids collide across files.

use std::path::Path;

use serde::Deserialize;

use crate::error::ManifestError;

/// File name the manifest conventionally lives under.
pub const DEFAULT_MANIFEST_NAME: &str = "index.json";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    files: Vec<String>,
}

impl Manifest {
    pub fn new<I, S>(files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Manifest {
            files: files.into_iter().map(Into::into).collect(),
        }
    }

    /// Parses the JSON array form.
    pub fn from_json(json: &str) -> Result<Self, ManifestError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, ManifestError> {
        if !path.exists() {
            return Err(ManifestError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Source files in declared precedence order.
    pub fn files(&self) -> &[String] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
