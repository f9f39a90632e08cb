//! Static project manifest (`project.json`).

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigurationError;

/// File name of the manifest inside the recipe folder.
pub const MANIFEST_FILE: &str = "project.json";

/// Project manifest. Unknown keys are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Manifest {
    /// Declared version, possibly ending with the development marker
    pub version: String,
}

impl Manifest {
    /// Parse manifest JSON. `path` is only used for error messages.
    pub fn parse(source: &str, path: &Path) -> Result<Self, ConfigurationError> {
        let manifest: Manifest =
            serde_json::from_str(source).map_err(|e| ConfigurationError::ManifestInvalid {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        if manifest.version.trim().is_empty() {
            return Err(ConfigurationError::EmptyVersion(path.to_path_buf()));
        }
        if manifest.version.chars().any(char::is_whitespace) {
            return Err(ConfigurationError::ManifestInvalid {
                path: path.to_path_buf(),
                reason: format!("version '{}' contains whitespace", manifest.version),
            });
        }

        Ok(manifest)
    }

    /// Load the manifest from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigurationError> {
        let source = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigurationError::ManifestMissing(path.to_path_buf())
            } else {
                ConfigurationError::ManifestInvalid {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                }
            }
        })?;
        Self::parse(&source, path)
    }

    /// Load `project.json` from a recipe folder.
    pub fn load_from_folder(folder: &Path) -> Result<Self, ConfigurationError> {
        Self::load(&manifest_path(folder))
    }
}

pub fn manifest_path(folder: &Path) -> PathBuf {
    folder.join(MANIFEST_FILE)
}
