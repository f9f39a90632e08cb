//! Package phase: install components into the package folder.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::info::QILANG_TOOLS_BUILDDIR;
use super::layout::Layout;
use crate::context::RecipeContext;
use crate::core::output;
use crate::error::RecipeError;
use crate::executor::BuildTool;

/// Files found in the package folder after install.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageManifest {
    /// Paths relative to the package folder, sorted
    pub files: Vec<PathBuf>,
}

impl PackageManifest {
    pub fn contains(&self, path: impl AsRef<Path>) -> bool {
        self.files.iter().any(|f| f == path.as_ref())
    }
}

/// Install every component in order, then inventory the package folder.
pub fn package(
    ctx: &RecipeContext,
    layout: &Layout,
    tool: &mut dyn BuildTool,
) -> Result<PackageManifest, RecipeError> {
    for component in ctx.recipe.install_components {
        output::sub_action(&format!("install {}", component));
        tool.install(component)?;
    }

    let manifest = collect_files(&layout.package_folder)?;
    if !manifest.files.is_empty() && !layout.package_folder.join(QILANG_TOOLS_BUILDDIR).is_dir() {
        output::warning(&format!(
            "{} not found in {}, consumers will not find qilang-tools",
            QILANG_TOOLS_BUILDDIR,
            layout.package_folder.display()
        ));
    }
    Ok(manifest)
}

/// List regular files and symlinks under `root`. A missing root is empty.
pub fn collect_files(root: &Path) -> Result<PackageManifest, RecipeError> {
    if !root.exists() {
        return Ok(PackageManifest::default());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry.map_err(|e| {
            RecipeError::Io(
                e.into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("filesystem loop")),
            )
        })?;
        if entry.file_type().is_dir() {
            continue;
        }
        if let Ok(rel) = entry.path().strip_prefix(root) {
            files.push(rel.to_path_buf());
        }
    }
    files.sort();
    Ok(PackageManifest { files })
}
