//! Lifecycle orchestration for a recipe evaluation
//!
//! The lifecycle flow:
//! 1. layout - pick the build and package folders for the settings
//! 2. validate - reject unsupported settings before any tool runs
//! 3. build - configure then build with the resolved version
//! 4. package - install the runtime and devel components
//! 5. package_info - describe the components to consumers
//!
//! Each phase borrows the same [`RecipeContext`] and runs to completion
//! before the next one starts.

mod build;
mod export;
mod info;
mod layout;
mod package;
mod validate;

pub use build::{build, configure_variables};
pub use export::export_sources;
pub use info::{Component, PackageInfo, QICC_COMPONENT, QILANG_TOOLS_BUILDDIR, package_info};
pub use layout::{BUILD_FOLDER_VARS, Layout, build_folder_name, layout, layout_for};
pub use package::{PackageManifest, collect_files, package};
pub use validate::{check_min_cppstd, validate};

use crate::context::RecipeContext;
use crate::core::output;
use crate::error::RecipeError;
use crate::executor::BuildTool;

/// Outcome of a full build-and-package run.
#[derive(Debug, Clone)]
pub struct CreateReport {
    pub layout: Layout,
    pub manifest: PackageManifest,
    pub info: PackageInfo,
}

/// Validate, build, package and describe the package.
pub fn create(
    ctx: &RecipeContext,
    layout: &Layout,
    tool: &mut dyn BuildTool,
) -> Result<CreateReport, RecipeError> {
    output::action(&format!("Building {}", ctx.reference()));

    validate(ctx)?;
    build(ctx, tool)?;
    let manifest = package(ctx, layout, tool)?;
    let info = package_info(ctx);

    output::success(&format!(
        "{} packaged ({} files)",
        ctx.reference(),
        manifest.files.len()
    ));

    Ok(CreateReport {
        layout: layout.clone(),
        manifest,
        info,
    })
}
