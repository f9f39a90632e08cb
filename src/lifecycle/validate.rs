//! Settings validation before any tool runs.

use crate::context::RecipeContext;
use crate::error::ConfigurationError;
use crate::settings::Settings;

/// Reject configurations the sources cannot build with.
pub fn validate(ctx: &RecipeContext) -> Result<(), ConfigurationError> {
    check_min_cppstd(&ctx.settings, ctx.recipe.min_cppstd)
}

/// Fail if `settings.cppstd` is set and older than `min`. An unset standard
/// means the compiler default and is accepted.
pub fn check_min_cppstd(settings: &Settings, min: u32) -> Result<(), ConfigurationError> {
    let Some(cppstd) = settings.cppstd.as_deref() else {
        return Ok(());
    };

    let actual = cppstd_year(cppstd).ok_or_else(|| ConfigurationError::InvalidSetting {
        name: "compiler.cppstd".to_string(),
        reason: format!("'{}' is not a known C++ standard", cppstd),
    })?;
    let required = cppstd_year(&min.to_string()).unwrap_or(u32::MAX);

    if actual < required {
        return Err(ConfigurationError::UnsupportedCppStd {
            actual: cppstd.to_string(),
            required: min.to_string(),
        });
    }
    Ok(())
}

/// Map `98`, `11`, `gnu17`, ... to a comparable year.
fn cppstd_year(value: &str) -> Option<u32> {
    let digits = value.strip_prefix("gnu").unwrap_or(value);
    match digits {
        "98" => Some(1998),
        "03" => Some(2003),
        "11" | "14" | "17" | "20" | "23" | "26" => digits.parse::<u32>().ok().map(|y| 2000 + y),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_cppstd(cppstd: Option<&str>) -> Settings {
        let mut s = Settings::host();
        s.cppstd = cppstd.map(str::to_string);
        s
    }

    #[test]
    fn test_unset_cppstd_is_accepted() {
        assert!(check_min_cppstd(&with_cppstd(None), 17).is_ok());
    }

    #[test]
    fn test_recent_standards_accepted() {
        for std in ["17", "gnu17", "20", "gnu20", "23", "26"] {
            assert!(check_min_cppstd(&with_cppstd(Some(std)), 17).is_ok(), "{}", std);
        }
    }

    #[test]
    fn test_old_standards_rejected() {
        for std in ["98", "gnu98", "03", "11", "14", "gnu14"] {
            let err = check_min_cppstd(&with_cppstd(Some(std)), 17).unwrap_err();
            assert_eq!(
                err,
                ConfigurationError::UnsupportedCppStd {
                    actual: std.to_string(),
                    required: "17".to_string()
                }
            );
        }
    }

    #[test]
    fn test_unknown_standard_rejected() {
        let err = check_min_cppstd(&with_cppstd(Some("c++17")), 17).unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidSetting { .. }));
    }
}
