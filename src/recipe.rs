//! The qilang package recipe descriptor.
//!
//! Static metadata consumed by the package manager: identity, requirements,
//! exported sources and default options for dependencies.

use crate::catalog::{Catalog, FeatureMap, USED_BOOST_COMPONENTS};
use crate::error::ConfigurationError;

/// A package recipe.
#[derive(Debug, Clone)]
pub struct Recipe {
    pub name: &'static str,
    pub license: &'static str,
    pub url: &'static str,
    pub description: &'static str,
    /// Runtime and link requirements (`name/version-range`)
    pub requires: &'static [&'static str],
    /// Tools needed on the build machine
    pub tool_requires: &'static [&'static str],
    /// Requirements of the test suite only
    pub test_requires: &'static [&'static str],
    /// Files exported with the recipe, relative to the recipe folder
    pub exports_sources: &'static [&'static str],
    /// Settings axes the binary depends on
    pub settings: &'static [&'static str],
    /// Minimum C++ standard
    pub min_cppstd: u32,
    /// CMake cache variable receiving the resolved version
    pub version_variable: &'static str,
    /// CMake install components, in install order
    pub install_components: &'static [&'static str],
}

pub const QILANG: Recipe = Recipe {
    name: "qilang",
    license: "BSD-3-Clause",
    url: "https://github.com/aldebaran/qilang",
    description: "Code generator for strongly-typed client code for the LibQi library",
    requires: &["boost/[~1.78]", "qi/4.0.1"],
    tool_requires: &["bison/[^3.5]", "flex/[^2.6]"],
    test_requires: &["gtest/cci.20210126"],
    exports_sources: &[
        "CMakeLists.txt",
        "project.json",
        "cmake/*",
        "qilang/*",
        "src/*",
        "tests/*",
    ],
    settings: &["os", "compiler", "build_type", "arch"],
    min_cppstd: 17,
    version_variable: "QILANG_VERSION",
    install_components: &["runtime", "devel"],
};

impl Recipe {
    /// Boost components on/off, derived from the used allow-list.
    pub fn boost_features(&self) -> Result<FeatureMap, ConfigurationError> {
        Catalog::boost().expand(USED_BOOST_COMPONENTS)
    }

    /// Default options for dependencies, in a stable order.
    pub fn default_options(&self, features: &FeatureMap) -> Vec<(String, String)> {
        let mut options = vec![("boost/*:shared".to_string(), "True".to_string())];
        options.extend(features.dependency_options("boost"));
        options
    }

    /// `name/version` reference of this package.
    pub fn reference(&self, version: &str) -> String {
        format!("{}/{}", self.name, version)
    }
}
