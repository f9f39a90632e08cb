//! Optional component catalog and allow-list expansion.
//!
//! A dependency such as Boost exposes many optional components. The recipe
//! only names the few it uses; every other catalog entry is switched off:
//!
//! ```text
//! catalog = [alpha, beta, gamma]
//! used    = [beta]
//! map     = {alpha: off, beta: on, gamma: off}
//! ```
//!
//! New catalog entries default to disabled without touching the allow-list.

use std::collections::HashSet;
use std::fmt;

use crate::error::ConfigurationError;

/// Every optional Boost component the dependency can build.
pub const BOOST_COMPONENTS: &[&str] = &[
    "atomic",
    "chrono",
    "container",
    "context",
    "contract",
    "coroutine",
    "date_time",
    "exception",
    "fiber",
    "filesystem",
    "graph",
    "graph_parallel",
    "iostreams",
    "json",
    "locale",
    "log",
    "math",
    "mpi",
    "nowide",
    "program_options",
    "python",
    "random",
    "regex",
    "serialization",
    "stacktrace",
    "system",
    "test",
    "thread",
    "timer",
    "type_erasure",
    "wave",
];

/// Boost components actually linked by qicc and libqi.
pub const USED_BOOST_COMPONENTS: &[&str] = &[
    "atomic",    // required by filesystem
    "chrono",    // required by libqi
    "container", // required by libqi
    "date_time", // required by libqi
    "exception", // required by libqi
    "locale",    // required by libqi
    "filesystem",
    "program_options",
    "random", // required by libqi
    "regex",  // required by libqi
    "system", // required by filesystem
    "thread", // required by libqi
];

/// An ordered set of uniquely named optional features.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<String>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate identifiers.
    pub fn new<I, S>(entries: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let mut ordered = Vec::new();
        for entry in entries {
            let entry = entry.into();
            if !seen.insert(entry.clone()) {
                return Err(ConfigurationError::DuplicateFeature(entry));
            }
            ordered.push(entry);
        }
        Ok(Self { entries: ordered })
    }

    /// The Boost component catalog.
    pub fn boost() -> Self {
        Self {
            entries: BOOST_COMPONENTS.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Expand an allow-list into a complete on/off map over this catalog.
    pub fn expand<S: AsRef<str>>(&self, used: &[S]) -> Result<FeatureMap, ConfigurationError> {
        let mut unknown: Vec<String> = used
            .iter()
            .filter(|s| !self.contains(s.as_ref()))
            .map(|s| s.as_ref().to_string())
            .collect();
        if !unknown.is_empty() {
            unknown.sort();
            unknown.dedup();
            return Err(ConfigurationError::UnknownFeatures(unknown));
        }

        let used: HashSet<&str> = used.iter().map(|s| s.as_ref()).collect();
        let entries = self
            .entries
            .iter()
            .map(|name| (name.clone(), used.contains(name.as_str())))
            .collect();
        Ok(FeatureMap { entries })
    }
}

/// Expand `used` against `catalog`.
pub fn expand<S: AsRef<str>>(catalog: &Catalog, used: &[S]) -> Result<FeatureMap, ConfigurationError> {
    catalog.expand(used)
}

/// Complete feature on/off mapping, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureMap {
    entries: Vec<(String, bool)>,
}

impl FeatureMap {
    pub fn get(&self, name: &str) -> Option<bool> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, on)| *on)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.entries.iter().map(|(n, on)| (n.as_str(), *on))
    }

    pub fn enabled(&self) -> Vec<&str> {
        self.iter().filter(|(_, on)| *on).map(|(n, _)| n).collect()
    }

    pub fn disabled(&self) -> Vec<&str> {
        self.iter().filter(|(_, on)| !*on).map(|(n, _)| n).collect()
    }

    /// Render as package manager options for `dependency`, e.g.
    /// `boost/*:without_atomic=False`.
    pub fn dependency_options(&self, dependency: &str) -> Vec<(String, String)> {
        self.iter()
            .map(|(name, on)| {
                let value = if on { "False" } else { "True" };
                (format!("{}/*:without_{}", dependency, name), value.to_string())
            })
            .collect()
    }

    /// Render as CMake cache switches, e.g. `BOOST_WITHOUT_ATOMIC=OFF`.
    pub fn cmake_switches(&self, prefix: &str) -> Vec<(String, String)> {
        self.iter()
            .map(|(name, on)| {
                let value = if on { "OFF" } else { "ON" };
                (
                    format!("{}_WITHOUT_{}", prefix.to_uppercase(), name.to_uppercase()),
                    value.to_string(),
                )
            })
            .collect()
    }
}

impl fmt::Display for FeatureMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, on) in self.iter() {
            writeln!(f, "{}={}", name, on)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> Catalog {
        Catalog::new(["alpha", "beta", "gamma"]).unwrap()
    }

    #[test]
    fn test_expand_single_used_feature() {
        let map = abc().expand(&["beta"]).unwrap();
        let entries: Vec<_> = map.iter().collect();
        assert_eq!(
            entries,
            vec![("alpha", false), ("beta", true), ("gamma", false)]
        );
    }

    #[test]
    fn test_expand_is_total_over_catalog() {
        let catalog = Catalog::boost();
        let map = catalog.expand(USED_BOOST_COMPONENTS).unwrap();

        assert_eq!(map.len(), catalog.len());
        for name in USED_BOOST_COMPONENTS {
            assert_eq!(map.get(name), Some(true), "{} should be enabled", name);
        }
        assert_eq!(map.enabled().len(), USED_BOOST_COMPONENTS.len());
        assert_eq!(map.get("python"), Some(false));
        assert_eq!(map.get("wave"), Some(false));
    }

    #[test]
    fn test_expand_preserves_catalog_order() {
        let map = Catalog::boost().expand(&["thread", "atomic"]).unwrap();
        let names: Vec<_> = map.iter().map(|(n, _)| n).collect();
        assert_eq!(names, BOOST_COMPONENTS);
    }

    #[test]
    fn test_free_function_matches_method() {
        let catalog = abc();
        assert_eq!(expand(&catalog, &["gamma"]), catalog.expand(&["gamma"]));
        assert_eq!(catalog.iter().count(), 3);
    }

    #[test]
    fn test_expand_empty_used_set_disables_everything() {
        let map = abc().expand::<&str>(&[]).unwrap();
        assert!(map.enabled().is_empty());
        assert_eq!(map.disabled(), vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn test_unknown_used_feature_is_rejected() {
        let err = abc().expand(&["beta", "omega", "delta", "omega"]).unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::UnknownFeatures(vec!["delta".into(), "omega".into()])
        );
    }

    #[test]
    fn test_duplicate_catalog_entry_is_rejected() {
        let err = Catalog::new(["alpha", "beta", "alpha"]).unwrap_err();
        assert_eq!(err, ConfigurationError::DuplicateFeature("alpha".into()));
    }

    #[test]
    fn test_builtin_catalog_has_no_duplicates() {
        assert!(Catalog::new(BOOST_COMPONENTS.iter().copied()).is_ok());
    }

    #[test]
    fn test_dependency_options() {
        let opts = abc().expand(&["beta"]).unwrap().dependency_options("boost");
        assert_eq!(
            opts[0],
            ("boost/*:without_alpha".to_string(), "True".to_string())
        );
        assert_eq!(
            opts[1],
            ("boost/*:without_beta".to_string(), "False".to_string())
        );
    }

    #[test]
    fn test_cmake_switches() {
        let switches = abc().expand(&["gamma"]).unwrap().cmake_switches("boost");
        assert_eq!(switches[0], ("BOOST_WITHOUT_ALPHA".into(), "ON".into()));
        assert_eq!(switches[2], ("BOOST_WITHOUT_GAMMA".into(), "OFF".into()));
    }

    #[test]
    fn test_display_is_deterministic() {
        let map = abc().expand(&["alpha"]).unwrap();
        assert_eq!(map.to_string(), "alpha=true\nbeta=false\ngamma=false\n");
    }
}
