//! Recipe error types.
//!
//! Configuration errors abort the evaluation before any external tool runs.
//! Tool failures are surfaced as reported by the tool itself.

use std::path::PathBuf;

use thiserror::Error;

use crate::executor::ExecuteError;

/// Fatal errors caused by the recipe inputs (manifest, settings, options).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("used features not present in the catalog: {}", .0.join(", "))]
    UnknownFeatures(Vec<String>),

    #[error("duplicate catalog entry: {0}")]
    DuplicateFeature(String),

    #[error("manifest not found: {}", .0.display())]
    ManifestMissing(PathBuf),

    #[error("failed to parse manifest {}: {reason}", .path.display())]
    ManifestInvalid { path: PathBuf, reason: String },

    #[error("manifest {} has an empty `version` field", .0.display())]
    EmptyVersion(PathBuf),

    #[error("invalid settings profile {}: {reason}", .path.display())]
    InvalidProfile { path: PathBuf, reason: String },

    #[error("invalid setting `{name}`: {reason}")]
    InvalidSetting { name: String, reason: String },

    #[error("invalid file pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("current cppstd ({actual}) is lower than the required C++ standard ({required})")]
    UnsupportedCppStd { actual: String, required: String },
}

/// Any error that aborts a recipe evaluation.
#[derive(Error, Debug)]
pub enum RecipeError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Tool(#[from] ExecuteError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = RecipeError> = std::result::Result<T, E>;
