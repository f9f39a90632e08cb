//! Folder layout of a build.
//!
//! Build output is namespaced by the settings axes so several binary
//! configurations of the same sources can coexist:
//!
//! ```text
//! build/linux-x86_64-gcc-release/Release/
//! build/linux-x86_64-gcc-release/Release/generators/
//! package/linux-x86_64-gcc-release/
//! ```

use std::path::{Path, PathBuf};

use crate::context::RecipeContext;
use crate::settings::Settings;

/// Settings axes used to name the build folder, in order.
pub const BUILD_FOLDER_VARS: &[&str] = &["os", "arch", "compiler", "build_type"];

/// Folders used by one build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub source_folder: PathBuf,
    pub build_folder: PathBuf,
    pub generators_folder: PathBuf,
    pub package_folder: PathBuf,
}

/// Folder name made of the settings axes, e.g. `linux-x86_64-gcc-release`.
pub fn build_folder_name(settings: &Settings) -> String {
    BUILD_FOLDER_VARS
        .iter()
        .map(|var| match *var {
            "os" => settings.os.clone(),
            "arch" => settings.arch.clone(),
            "compiler" => settings.compiler.clone(),
            _ => settings.build_type.to_string(),
        })
        .map(|v| v.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

/// Compute the layout for a context. `package_folder` defaults to
/// `<recipe>/package/<axes>`.
pub fn layout(ctx: &RecipeContext, package_folder: Option<&Path>) -> Layout {
    layout_for(&ctx.recipe_folder, &ctx.settings, package_folder)
}

pub fn layout_for(recipe_folder: &Path, settings: &Settings, package_folder: Option<&Path>) -> Layout {
    let name = build_folder_name(settings);
    let build_folder = recipe_folder
        .join("build")
        .join(&name)
        .join(settings.build_type.to_string());
    let generators_folder = build_folder.join("generators");
    let package_folder = package_folder
        .map(Path::to_path_buf)
        .unwrap_or_else(|| recipe_folder.join("package").join(&name));

    Layout {
        source_folder: recipe_folder.to_path_buf(),
        build_folder,
        generators_folder,
        package_folder,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::BuildType;

    fn settings(build_type: BuildType) -> Settings {
        Settings {
            os: "Linux".into(),
            arch: "x86_64".into(),
            compiler: "gcc".into(),
            build_type,
            cppstd: Some("17".into()),
        }
    }

    #[test]
    fn test_build_folder_name() {
        assert_eq!(
            build_folder_name(&settings(BuildType::Release)),
            "linux-x86_64-gcc-release"
        );
    }

    #[test]
    fn test_cppstd_does_not_affect_folder() {
        let mut s = settings(BuildType::Debug);
        let before = build_folder_name(&s);
        s.cppstd = Some("20".into());
        assert_eq!(build_folder_name(&s), before);
    }

    #[test]
    fn test_layout_folders() {
        let l = layout_for(Path::new("/src/qilang"), &settings(BuildType::Debug), None);
        assert_eq!(l.source_folder, PathBuf::from("/src/qilang"));
        assert_eq!(
            l.build_folder,
            PathBuf::from("/src/qilang/build/linux-x86_64-gcc-debug/Debug")
        );
        assert_eq!(l.generators_folder, l.build_folder.join("generators"));
        assert_eq!(
            l.package_folder,
            PathBuf::from("/src/qilang/package/linux-x86_64-gcc-debug")
        );
    }

    #[test]
    fn test_configurations_do_not_collide() {
        let debug = layout_for(Path::new("/r"), &settings(BuildType::Debug), None);
        let release = layout_for(Path::new("/r"), &settings(BuildType::Release), None);
        assert_ne!(debug.build_folder, release.build_folder);
        assert_ne!(debug.package_folder, release.package_folder);
    }

    #[test]
    fn test_explicit_package_folder() {
        let l = layout_for(
            Path::new("/r"),
            &settings(BuildType::Release),
            Some(Path::new("/opt/pkg")),
        );
        assert_eq!(l.package_folder, PathBuf::from("/opt/pkg"));
    }
}
