//! Consumer metadata for the packaged artifacts.
//!
//! qilang ships no library, only the `qicc` generator and the
//! `qilang-tools` CMake package. The build dir has to be declared on a
//! component because package-level build dirs are ignored; `qicc` carries it
//! so that consumers find `qilang-tools` through `find_package`.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::context::RecipeContext;

/// Component holding the generator and the CMake integration files.
pub const QICC_COMPONENT: &str = "qicc";

/// Directory of the `qilang-tools` package configuration file.
pub const QILANG_TOOLS_BUILDDIR: &str = "lib/cmake/qilang-tools";

/// Metadata of one logical component of the package.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Component {
    /// Libraries to link
    pub libs: Vec<String>,
    /// Upstream components required, as `package::component`
    pub requires: Vec<String>,
    /// Extra search paths for build-tool integration files, relative to the package folder
    pub builddirs: Vec<String>,
}

/// Consumer metadata of the package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageInfo {
    pub name: String,
    pub version: String,
    pub components: BTreeMap<String, Component>,
}

impl PackageInfo {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

pub fn package_info(ctx: &RecipeContext) -> PackageInfo {
    let qicc = Component {
        libs: Vec::new(),
        requires: vec![
            "qi::qi".to_string(),
            "boost::program_options".to_string(),
            "boost::filesystem".to_string(),
        ],
        builddirs: vec![QILANG_TOOLS_BUILDDIR.to_string()],
    };

    let mut components = BTreeMap::new();
    components.insert(QICC_COMPONENT.to_string(), qicc);

    PackageInfo {
        name: ctx.recipe.name.to_string(),
        version: ctx.version().to_string(),
        components,
    }
}
