//! Package recipe for qilang, the LibQi code generator
//!
//! The recipe resolves the package version, selects the Boost components
//! the generator needs, and drives CMake through the package lifecycle.
//!
//! # Version
//!
//! The declared version is read from `project.json`. Development versions
//! (ending with `-dev`) get a revision suffix from git, or from the clock
//! when the sources are not in a git checkout:
//!
//! ```text
//! 4.0.1        -> 4.0.1
//! 4.0.1-dev    -> 4.0.1-dev.a1b2c3d4        (clean checkout)
//! 4.0.1-dev    -> 4.0.1-dev.a1b2c3d4.dirty  (local modifications)
//! 4.0.1-dev    -> 4.0.1-dev.20261019143005  (no git information)
//! ```
//!
//! # Boost components
//!
//! Every Boost component is disabled unless listed in
//! [`catalog::USED_BOOST_COMPONENTS`].
//!
//! # Lifecycle
//!
//! ```text
//! RecipeContext::evaluate -> layout -> validate -> build -> package -> package_info
//! ```

pub mod catalog;
pub mod context;
pub mod core;
pub mod error;
pub mod executor;
pub mod git;
pub mod lifecycle;
pub mod manifest;
pub mod recipe;
pub mod settings;
pub mod version;

pub use catalog::{Catalog, FeatureMap};
pub use context::RecipeContext;
pub use crate::core::output;
pub use error::{ConfigurationError, RecipeError};
pub use executor::{BuildTool, CMake, ExecOptions, ExecuteError};
pub use git::GitRepository;
pub use recipe::{QILANG, Recipe};
pub use settings::{BuildType, Profile, Settings, SettingsOverrides};
pub use version::{CommitInfo, RepoState, Resolution, Unavailable};
