//! Build settings: the environment axes a binary configuration depends on.
//!
//! Settings come from three layers, later layers winning:
//! 1. host defaults
//! 2. a TOML profile (`$XDG_CONFIG_HOME/recipe/profile.toml` or `--profile`)
//! 3. command line overrides
//!
//! ```toml
//! [settings]
//! os = "Linux"
//! arch = "x86_64"
//! compiler = "gcc"
//! build_type = "Release"
//! cppstd = "17"
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

use crate::error::ConfigurationError;

/// CMake build configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildType {
    Debug,
    Release,
    RelWithDebInfo,
    MinSizeRel,
}

impl FromStr for BuildType {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "release" => Ok(Self::Release),
            "relwithdebinfo" => Ok(Self::RelWithDebInfo),
            "minsizerel" => Ok(Self::MinSizeRel),
            _ => Err(ConfigurationError::InvalidSetting {
                name: "build_type".to_string(),
                reason: format!(
                    "'{}' is not one of Debug, Release, RelWithDebInfo, MinSizeRel",
                    s
                ),
            }),
        }
    }
}

impl fmt::Display for BuildType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Debug => "Debug",
            Self::Release => "Release",
            Self::RelWithDebInfo => "RelWithDebInfo",
            Self::MinSizeRel => "MinSizeRel",
        };
        f.write_str(s)
    }
}

/// Resolved settings for one recipe evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub os: String,
    pub arch: String,
    pub compiler: String,
    pub build_type: BuildType,
    /// Language standard, e.g. "17" or "gnu20" (unset means compiler default)
    pub cppstd: Option<String>,
}

impl Settings {
    /// Settings describing the machine running the recipe.
    pub fn host() -> Self {
        let os = match std::env::consts::OS {
            "linux" => "Linux",
            "macos" => "Macos",
            "windows" => "Windows",
            "freebsd" => "FreeBSD",
            other => other,
        };
        let arch = match std::env::consts::ARCH {
            "aarch64" => "armv8",
            "x86" => "x86",
            other => other,
        };
        let compiler = match std::env::consts::OS {
            "macos" => "apple-clang",
            "windows" => "msvc",
            _ => "gcc",
        };
        Self {
            os: os.to_string(),
            arch: arch.to_string(),
            compiler: compiler.to_string(),
            build_type: BuildType::Release,
            cppstd: None,
        }
    }

    /// Apply a profile on top of these settings.
    pub fn with_profile(mut self, profile: &Profile) -> Result<Self, ConfigurationError> {
        self.apply(&profile.settings)?;
        Ok(self)
    }

    /// Apply command line (or any other) overrides.
    pub fn with_overrides(mut self, overrides: &SettingsOverrides) -> Result<Self, ConfigurationError> {
        self.apply(overrides)?;
        Ok(self)
    }

    fn apply(&mut self, o: &SettingsOverrides) -> Result<(), ConfigurationError> {
        if let Some(os) = &o.os {
            self.os = non_empty("os", os)?;
        }
        if let Some(arch) = &o.arch {
            self.arch = non_empty("arch", arch)?;
        }
        if let Some(compiler) = &o.compiler {
            self.compiler = non_empty("compiler", compiler)?;
        }
        if let Some(build_type) = &o.build_type {
            self.build_type = build_type.parse()?;
        }
        if let Some(cppstd) = &o.cppstd {
            self.cppstd = Some(non_empty("cppstd", cppstd)?);
        }
        Ok(())
    }
}

fn non_empty(name: &str, value: &str) -> Result<String, ConfigurationError> {
    let value = value.trim();
    if value.is_empty() || value.contains(char::is_whitespace) || value.contains('/') {
        return Err(ConfigurationError::InvalidSetting {
            name: name.to_string(),
            reason: format!("'{}' is not a valid value", value),
        });
    }
    Ok(value.to_string())
}

/// Optional values for every settings axis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsOverrides {
    pub os: Option<String>,
    pub arch: Option<String>,
    pub compiler: Option<String>,
    pub build_type: Option<String>,
    #[serde(alias = "compiler.cppstd")]
    pub cppstd: Option<String>,
}

/// A settings profile file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub settings: SettingsOverrides,
}

impl Profile {
    pub fn parse(source: &str, path: &Path) -> Result<Self, ConfigurationError> {
        toml::from_str(source).map_err(|e| ConfigurationError::InvalidProfile {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigurationError> {
        let source =
            std::fs::read_to_string(path).map_err(|e| ConfigurationError::InvalidProfile {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        Self::parse(&source, path)
    }

    /// Load the default profile if one exists.
    pub fn load_default() -> Result<Option<Self>, ConfigurationError> {
        match default_profile_path() {
            Some(path) if path.is_file() => Self::load(&path).map(Some),
            _ => Ok(None),
        }
    }
}

/// `$XDG_CONFIG_HOME/recipe/profile.toml`
pub fn default_profile_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("recipe").join("profile.toml"))
}
