//! Evaluation context shared by every lifecycle phase.
//!
//! Built once at the start of an evaluation: the manifest is read, the
//! feature map expanded and the version resolved. Phases only borrow it, so
//! the resolved version cannot change between configure and package.

use std::path::{Path, PathBuf};

use crate::catalog::FeatureMap;
use crate::core::output;
use crate::error::ConfigurationError;
use crate::manifest::Manifest;
use crate::recipe::Recipe;
use crate::settings::Settings;
use crate::version::{self, RepoState, Resolution, Revision};

/// Immutable inputs of one recipe evaluation.
#[derive(Debug, Clone)]
pub struct RecipeContext {
    pub recipe: Recipe,
    pub recipe_folder: PathBuf,
    pub manifest: Manifest,
    pub settings: Settings,
    pub version: Resolution,
    pub features: FeatureMap,
}

impl RecipeContext {
    /// Evaluate the recipe inputs found in `recipe_folder`.
    ///
    /// `version_override` replaces resolution entirely, as when a version is
    /// given explicitly on the command line.
    pub fn evaluate(
        recipe: &Recipe,
        recipe_folder: &Path,
        settings: Settings,
        repo: Option<&dyn RepoState>,
        version_override: Option<&str>,
    ) -> Result<Self, ConfigurationError> {
        let manifest = Manifest::load_from_folder(recipe_folder)?;
        let features = recipe.boost_features()?;

        let version = match version_override {
            Some(v) => explicit_version(v)?,
            None => version::resolve(&manifest.version, repo),
        };
        if let Some(diag) = version.diagnostic() {
            output::info(&diag);
        }

        Ok(Self {
            recipe: recipe.clone(),
            recipe_folder: recipe_folder.to_path_buf(),
            manifest,
            settings,
            version,
            features,
        })
    }

    /// Resolved package version.
    pub fn version(&self) -> &str {
        &self.version.version
    }

    /// `name/version` reference of the package being built.
    pub fn reference(&self) -> String {
        self.recipe.reference(self.version())
    }
}

fn explicit_version(v: &str) -> Result<Resolution, ConfigurationError> {
    let v = v.trim();
    if v.is_empty() || v.contains(char::is_whitespace) {
        return Err(ConfigurationError::InvalidSetting {
            name: "version".to_string(),
            reason: format!("'{}' is not a valid version", v),
        });
    }
    Ok(Resolution {
        version: v.to_string(),
        revision: Revision::None,
    })
}
