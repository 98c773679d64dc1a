use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::version::error::ConfigError;

// =============================================================================
// Descriptor conventions
// =============================================================================

/// File name of the version descriptor inside a namespace's resource directory
pub const DESCRIPTOR_FILE_NAME: &str = ".version";

/// Descriptor key holding the artifact id
pub const KEY_ARTIFACT_ID: &str = "artifactId";

/// Descriptor key holding the project version
pub const KEY_VERSION: &str = "version";

/// Descriptor key holding the (optional) build number
pub const KEY_BUILD_NUMBER: &str = "buildNumber";

/// Marker used for every field of the unknown version
pub const UNKNOWN_STR: &str = "unknown";

// =============================================================================
// Environment
// =============================================================================

/// Environment variable that suppresses the unresolved-variable warning
pub const ENV_SUPPRESS_VAR_FOUND_WARNING: &str = "MODULE_VERSION_SUPPRESS_VAR_FOUND_WARNING";

/// Environment variable listing resource roots for the default resolver
pub const ENV_RESOURCE_PATH: &str = "MODULE_VERSION_PATH";

/// Resolver configuration structure
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ResolverConfig {
    /// Directories searched for `<namespace path>/.version`, in order
    pub resource_roots: Vec<PathBuf>,
    /// Overrides the environment suppression flag when set
    pub suppress_var_found_warning: Option<bool>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            resource_roots: vec![PathBuf::from(".")],
            suppress_var_found_warning: None,
        }
    }
}

impl ResolverConfig {
    /// Read a JSON config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Build the config used by the default process-wide resolver
    pub fn from_env() -> Self {
        Self::from_env_value(std::env::var_os(ENV_RESOURCE_PATH))
    }

    fn from_env_value(resource_path: Option<std::ffi::OsString>) -> Self {
        let resource_roots: Vec<PathBuf> = resource_path
            .map(|paths| {
                std::env::split_paths(&paths)
                    .filter(|path| !path.as_os_str().is_empty())
                    .collect()
            })
            .unwrap_or_default();

        if resource_roots.is_empty() {
            return Self::default();
        }

        Self {
            resource_roots,
            suppress_var_found_warning: None,
        }
    }
}

/// Interpret a boolean-like setting value.
///
/// `true`, `yes`, `on` and `1` are truthy (case-insensitive); anything else is false.
pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "yes" | "on" | "1"
    )
}

/// Returns the path to the default config file.
/// Uses $XDG_CONFIG_HOME/module-version/config.json if XDG_CONFIG_HOME is set,
/// otherwise falls back to ~/.config/module-version/config.json,
/// or ./module-version/config.json if neither is available.
pub fn config_path() -> PathBuf {
    config_dir_with_env(std::env::var("XDG_CONFIG_HOME").ok(), dirs::home_dir()).join("config.json")
}

fn config_dir_with_env(xdg_config_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let config_dir = xdg_config_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".config")))
        .unwrap_or_else(|| PathBuf::from("."));

    config_dir.join("module-version")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn resolver_config_from_empty_object_uses_defaults() {
        let result = serde_json::from_str::<ResolverConfig>("{}").unwrap();

        assert_eq!(result, ResolverConfig::default());
        assert_eq!(result.resource_roots, vec![PathBuf::from(".")]);
    }

    #[test]
    fn resolver_config_from_full_object_parses_all_fields() {
        let result = serde_json::from_str::<ResolverConfig>(
            r#"{
                "resourceRoots": ["/opt/app/resources", "target/classes"],
                "suppressVarFoundWarning": true
            }"#,
        )
        .unwrap();

        assert_eq!(
            result,
            ResolverConfig {
                resource_roots: vec![
                    PathBuf::from("/opt/app/resources"),
                    PathBuf::from("target/classes")
                ],
                suppress_var_found_warning: Some(true),
            }
        );
    }

    #[test]
    fn load_reports_missing_file() {
        let err = ResolverConfig::load(Path::new("/nonexistent/module-version.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn from_env_value_falls_back_to_current_dir() {
        assert_eq!(ResolverConfig::from_env_value(None), ResolverConfig::default());
    }

    #[test]
    fn from_env_value_splits_path_list() {
        let paths = std::env::join_paths(["/a/res", "/b/res"]).unwrap();
        let config = ResolverConfig::from_env_value(Some(paths));

        assert_eq!(
            config.resource_roots,
            vec![PathBuf::from("/a/res"), PathBuf::from("/b/res")]
        );
    }

    #[rstest]
    #[case("true", true)]
    #[case("TRUE", true)]
    #[case("yes", true)]
    #[case(" Yes ", true)]
    #[case("on", true)]
    #[case("1", true)]
    #[case("false", false)]
    #[case("no", false)]
    #[case("", false)]
    #[case("yep", false)]
    fn parse_flag_returns_expected(#[case] value: &str, #[case] expected: bool) {
        assert_eq!(parse_flag(value), expected);
    }

    #[test]
    fn config_dir_with_env_uses_xdg_config_home_when_set() {
        let path = config_dir_with_env(
            Some("/tmp/test-config".to_string()),
            Some(PathBuf::from("/home/user")),
        );

        assert_eq!(path, PathBuf::from("/tmp/test-config/module-version"));
    }

    #[test]
    fn config_dir_with_env_falls_back_to_home_config() {
        let path = config_dir_with_env(None, Some(PathBuf::from("/home/user")));

        assert_eq!(path, PathBuf::from("/home/user/.config/module-version"));
    }

    #[test]
    fn config_dir_with_env_falls_back_to_current_dir_when_no_dirs_available() {
        let path = config_dir_with_env(None, None);
        assert_eq!(path, PathBuf::from("./module-version"));
    }
}
