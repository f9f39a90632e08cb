//! Git repository state for development versions.
//!
//! Queries the `git` CLI in the recipe folder. Every failure (git missing,
//! not a repository, no commits yet) is reported as [`Unavailable`].

use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::version::{CommitInfo, RepoState, Unavailable};

/// A git working tree rooted at (or containing) `dir`.
#[derive(Debug, Clone)]
pub struct GitRepository {
    dir: PathBuf,
}

impl GitRepository {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Last commit touching the folder.
    pub fn commit(&self) -> Result<String, Unavailable> {
        let out = self.git(&["rev-list", "HEAD", "-n", "1", "--full-history", "--", "."])?;
        let commit = out.trim();
        if commit.is_empty() {
            return Err(Unavailable::new(format!(
                "no commit found for {}",
                self.dir.display()
            )));
        }
        Ok(commit.to_string())
    }

    /// True if the folder has uncommitted or untracked changes.
    pub fn is_dirty(&self) -> Result<bool, Unavailable> {
        let out = self.git(&["status", "--porcelain", "--", "."])?;
        Ok(!out.trim().is_empty())
    }

    fn git(&self, args: &[&str]) -> Result<String, Unavailable> {
        let output = Command::new("git")
            .arg("-C")
            .arg(&self.dir)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| Unavailable::new(format!("failed to run git: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Unavailable::new(format!(
                "git {} failed: {}",
                args.first().copied().unwrap_or_default(),
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl RepoState for GitRepository {
    fn commit_info(&self) -> Result<CommitInfo, Unavailable> {
        let commit = self.commit()?;
        let dirty = self.is_dirty()?;
        Ok(CommitInfo { commit, dirty })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn git_available() -> bool {
        Command::new("git")
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }

    fn git(dir: &Path, args: &[&str]) {
        let status = Command::new("git")
            .arg("-C")
            .arg(dir)
            .args(["-c", "user.name=test", "-c", "user.email=test@example.com"])
            .args(args)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .unwrap();
        assert!(status.success(), "git {:?} failed", args);
    }

    #[test]
    fn test_plain_directory_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let repo = GitRepository::new(dir.path());
        assert!(repo.commit_info().is_err());
    }

    #[test]
    fn test_missing_directory_is_unavailable() {
        let repo = GitRepository::new("/nonexistent/recipe/folder");
        assert!(repo.commit_info().is_err());
    }

    #[test]
    fn test_commit_and_dirty_state() {
        if !git_available() {
            return;
        }
        let dir = TempDir::new().unwrap();
        git(dir.path(), &["init", "-q"]);
        std::fs::write(dir.path().join("project.json"), r#"{"version": "1.0-dev"}"#).unwrap();
        git(dir.path(), &["add", "."]);
        git(dir.path(), &["commit", "-q", "-m", "init"]);

        let repo = GitRepository::new(dir.path());
        let info = repo.commit_info().unwrap();
        assert_eq!(info.commit.len(), 40);
        assert!(!info.dirty);

        std::fs::write(dir.path().join("project.json"), r#"{"version": "1.1-dev"}"#).unwrap();
        assert!(repo.commit_info().unwrap().dirty);
    }

    #[test]
    fn test_empty_repository_is_unavailable() {
        if !git_available() {
            return;
        }
        let dir = TempDir::new().unwrap();
        git(dir.path(), &["init", "-q"]);
        assert!(GitRepository::new(dir.path()).commit_info().is_err());
    }
}
