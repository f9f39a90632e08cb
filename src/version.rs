//! Package version resolution.
//!
//! The declared version comes from `project.json`. A declared version ending
//! with [`DEV_MARKER`] is a development version and gets a revision suffix:
//!
//! - `2.1.0-dev` in a clean checkout at `a1b2c3d4...` becomes `2.1.0-dev.a1b2c3d4`
//! - the same in a modified checkout becomes `2.1.0-dev.a1b2c3d4.dirty`
//! - outside of a repository it becomes `2.1.0-dev.20261019143000`
//!
//! Stable versions are returned unchanged. Resolution is not idempotent for
//! development versions, so callers resolve once and keep the result.

use std::fmt;

use chrono::{Local, NaiveDateTime};
use thiserror::Error;

/// Literal suffix marking a development version.
pub const DEV_MARKER: &str = "-dev";

/// Appended to the revision when the working tree has local modifications.
pub const DIRTY_MARKER: &str = ".dirty";

/// Number of commit id characters kept in the revision.
pub const COMMIT_TOKEN_LEN: usize = 8;

/// Format of the fallback revision when no commit information is available.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Commit information reported by a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitInfo {
    /// Full commit identifier
    pub commit: String,
    /// True if the working tree has local modifications
    pub dirty: bool,
}

/// The repository state could not be queried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct Unavailable(pub String);

impl Unavailable {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

/// Source of commit information for development versions.
pub trait RepoState {
    fn commit_info(&self) -> Result<CommitInfo, Unavailable>;
}

/// Where the revision suffix of a resolved version came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Revision {
    /// Stable version, no suffix
    None,
    /// Suffix derived from the repository commit
    Commit(String),
    /// Suffix derived from the clock because the repository was unavailable
    Timestamp { stamp: String, cause: Unavailable },
}

/// Result of a version resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub version: String,
    pub revision: Revision,
}

impl Resolution {
    /// Informational message to report when the timestamp fallback was used.
    pub fn diagnostic(&self) -> Option<String> {
        match &self.revision {
            Revision::Timestamp { cause, .. } => Some(format!(
                "Cannot get version information from git repository, using a date revision instead ({})",
                cause
            )),
            _ => None,
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.version)
    }
}

/// Check whether a declared version is a development version.
pub fn is_dev_version(declared: &str) -> bool {
    declared.ends_with(DEV_MARKER)
}

/// Resolve `declared` against the current repository state and local time.
pub fn resolve(declared: &str, repo: Option<&dyn RepoState>) -> Resolution {
    resolve_at(declared, repo, Local::now().naive_local())
}

/// Resolve `declared` using `now` for the timestamp fallback.
pub fn resolve_at(declared: &str, repo: Option<&dyn RepoState>, now: NaiveDateTime) -> Resolution {
    if !is_dev_version(declared) {
        return Resolution {
            version: declared.to_string(),
            revision: Revision::None,
        };
    }

    let info = match repo {
        Some(repo) => repo.commit_info(),
        None => Err(Unavailable::new("no source control context")),
    };

    let (suffix, revision) = match info {
        Ok(info) => {
            let mut token: String = info.commit.chars().take(COMMIT_TOKEN_LEN).collect();
            if info.dirty {
                token.push_str(DIRTY_MARKER);
            }
            (token.clone(), Revision::Commit(token))
        }
        Err(cause) => {
            let stamp = now.format(TIMESTAMP_FORMAT).to_string();
            (stamp.clone(), Revision::Timestamp { stamp, cause })
        }
    };

    Resolution {
        version: format!("{}.{}", declared, suffix),
        revision,
    }
}
