//! Export phase: copy the recipe's source files to a destination folder.
//!
//! Patterns are relative to the recipe folder. A pattern matching a
//! directory copies it recursively; patterns matching nothing are skipped.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{ConfigurationError, RecipeError};

/// Copy everything matched by `patterns` from `recipe_folder` into `dest`.
/// Returns the copied files relative to `dest`, sorted and deduplicated.
pub fn export_sources(
    recipe_folder: &Path,
    patterns: &[&str],
    dest: &Path,
) -> Result<Vec<PathBuf>, RecipeError> {
    let mut copied = Vec::new();

    for pattern in patterns {
        let full = recipe_folder.join(pattern);
        let full = full.to_string_lossy();
        let matches = glob::glob(&full).map_err(|e| ConfigurationError::InvalidPattern {
            pattern: (*pattern).to_string(),
            reason: e.to_string(),
        })?;

        for entry in matches {
            let path = entry.map_err(|e| RecipeError::Io(e.into()))?;
            if path.starts_with(dest) {
                continue;
            }
            if path.is_dir() {
                for file in WalkDir::new(&path) {
                    let file = file.map_err(|e| {
                        RecipeError::Io(
                            e.into_io_error()
                                .unwrap_or_else(|| std::io::Error::other("filesystem loop")),
                        )
                    })?;
                    if file.file_type().is_file() {
                        copied.push(copy_one(recipe_folder, file.path(), dest)?);
                    }
                }
            } else if path.is_file() {
                copied.push(copy_one(recipe_folder, &path, dest)?);
            }
        }
    }

    copied.sort();
    copied.dedup();
    Ok(copied)
}

fn copy_one(recipe_folder: &Path, src: &Path, dest: &Path) -> Result<PathBuf, RecipeError> {
    let rel = src
        .strip_prefix(recipe_folder)
        .map_err(|_| std::io::Error::other(format!("{} is outside the recipe folder", src.display())))?
        .to_path_buf();
    let target = dest.join(&rel);
    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::copy(src, &target)?;
    Ok(rel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::QILANG;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let p = root.join(rel);
        std::fs::create_dir_all(p.parent().unwrap()).unwrap();
        std::fs::write(p, rel).unwrap();
    }

    #[test]
    fn test_export_recipe_sources() {
        let src = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        for f in [
            "CMakeLists.txt",
            "project.json",
            "cmake/qilang-tools-config.cmake",
            "src/parser.cpp",
            "src/grammar/lexer.ll",
            "qilang/node.hpp",
            "README.md",
            "build/CMakeCache.txt",
        ] {
            touch(src.path(), f);
        }

        let copied = export_sources(src.path(), QILANG.exports_sources, dest.path()).unwrap();

        assert!(copied.contains(&PathBuf::from("CMakeLists.txt")));
        assert!(copied.contains(&PathBuf::from("src/grammar/lexer.ll")));
        assert!(copied.contains(&PathBuf::from("cmake/qilang-tools-config.cmake")));
        assert!(!copied.contains(&PathBuf::from("README.md")));
        assert!(!copied.contains(&PathBuf::from("build/CMakeCache.txt")));
        assert_eq!(
            std::fs::read_to_string(dest.path().join("qilang/node.hpp")).unwrap(),
            "qilang/node.hpp"
        );
    }

    #[test]
    fn test_missing_patterns_are_skipped() {
        let src = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        touch(src.path(), "project.json");
        let copied = export_sources(src.path(), QILANG.exports_sources, dest.path()).unwrap();
        assert_eq!(copied, vec![PathBuf::from("project.json")]);
    }

    #[test]
    fn test_invalid_pattern() {
        let src = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        let err = export_sources(src.path(), &["src/[*"], dest.path()).unwrap_err();
        assert!(matches!(
            err,
            RecipeError::Configuration(ConfigurationError::InvalidPattern { .. })
        ));
    }
}
