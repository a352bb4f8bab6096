//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use super::defaults::{DEFAULT_PRETTY_OUTPUT, ConfigPreset};
use super::types::AppConfig;
use crate::aggregate::RiskWeights;
use crate::graph::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_EXPANSIONS};
use crate::normalize::{DEFAULT_MAX_PATHS, DEFAULT_PATH_LIMIT};
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".sbom-vuln-diff.yaml",
    ".sbom-vuln-diff.yml",
    "sbom-vuln-diff.yaml",
    "sbom-vuln-diff.yml",
];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. Git repository root (if in a repo)
/// 4. User config directory (~/.config/sbom-vuln-diff/)
/// 5. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path
        && path.exists()
    {
        return Some(path.to_path_buf());
    }

    if let Ok(cwd) = std::env::current_dir()
        && let Some(path) = find_config_in_dir(&cwd)
    {
        return Some(path);
    }

    if let Some(git_root) = find_git_root()
        && let Some(path) = find_config_in_dir(&git_root)
    {
        return Some(path);
    }

    if let Some(config_dir) = dirs::config_dir()
        && let Some(path) = find_config_in_dir(&config_dir.join("sbom-vuln-diff"))
    {
        return Some(path);
    }

    dirs::home_dir().and_then(|home| find_config_in_dir(&home))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Find the git repository root by walking up the directory tree.
fn find_git_root() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    let mut current = cwd.as_path();

    loop {
        if current.join(".git").exists() {
            return Some(current.to_path_buf());
        }
        current = current.parent()?;
    }
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml_ng::Error),
}

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    // An empty file deserializes to `null`
    if content.trim().is_empty() {
        return Ok(AppConfig::default());
    }
    let config: AppConfig = serde_yaml_ng::from_str(&content)?;
    Ok(config)
}

/// Load config from discovered file, or return default.
///
/// A file that exists but fails to load is logged and ignored.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (AppConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (AppConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => (config, Some(path)),
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (AppConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Configuration Merging
// ============================================================================

impl AppConfig {
    /// Merge another config into this one, with `other` taking precedence.
    ///
    /// Only values that differ from the defaults override, so a CLI layer
    /// built from `AppConfig::default()` leaves file settings alone.
    pub fn merge(&mut self, other: &Self) {
        if other.graph.path_limit != DEFAULT_PATH_LIMIT {
            self.graph.path_limit = other.graph.path_limit;
        }
        if other.graph.max_depth != DEFAULT_MAX_DEPTH {
            self.graph.max_depth = other.graph.max_depth;
        }
        if other.graph.max_expansions != DEFAULT_MAX_EXPANSIONS {
            self.graph.max_expansions = other.graph.max_expansions;
        }
        if other.normalize.max_paths != DEFAULT_MAX_PATHS {
            self.normalize.max_paths = other.normalize.max_paths;
        }
        if other.risk != RiskWeights::default() {
            self.risk = other.risk;
        }

        if other.output.pretty != DEFAULT_PRETTY_OUTPUT {
            self.output.pretty = other.output.pretty;
        }
        if other.output.dir.is_some() {
            self.output.dir.clone_from(&other.output.dir);
        }

        if other.behavior.fail_on_new.is_some() {
            self.behavior.fail_on_new = other.behavior.fail_on_new;
        }
        if other.behavior.quiet {
            self.behavior.quiet = true;
        }
    }

    /// Load from file and merge with CLI overrides.
    #[must_use]
    pub fn from_file_with_overrides(
        config_path: Option<&Path>,
        cli_overrides: &Self,
    ) -> (Self, Option<PathBuf>) {
        let (mut config, loaded_from) = load_or_default(config_path);
        config.merge(cli_overrides);
        (config, loaded_from)
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate an example config file for a preset.
#[must_use]
pub fn generate_example_config(preset: ConfigPreset) -> String {
    format!(
        r"# sbom-vuln-diff configuration ({preset} preset)
# Place this file at .sbom-vuln-diff.yaml in your project root or ~/.config/sbom-vuln-diff/
# CLI arguments always override file settings.

{}",
        serde_yaml_ng::to_string(&preset.config()).unwrap_or_default()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Severity;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_in_dir() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join(".sbom-vuln-diff.yaml");
        std::fs::write(&config_path, "graph:\n  path_limit: 3\n").unwrap();

        assert_eq!(find_config_in_dir(tmp.path()), Some(config_path));
    }

    #[test]
    fn test_find_config_in_dir_not_found() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(find_config_in_dir(tmp.path()), None);
    }

    #[test]
    fn test_load_config_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.yaml");
        let yaml = r"
graph:
  path_limit: 2
  max_depth: 16
normalize:
  max_paths: 4
behavior:
  fail_on_new: CRITICAL
";
        std::fs::write(&config_path, yaml).unwrap();

        let config = load_config_file(&config_path).unwrap();
        assert_eq!(config.graph.path_limit, 2);
        assert_eq!(config.graph.max_depth, 16);
        assert_eq!(config.normalize.max_paths, 4);
        assert_eq!(config.behavior.fail_on_new, Some(Severity::Critical));
    }

    #[test]
    fn test_load_empty_file_is_default() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("empty.yaml");
        std::fs::write(&config_path, "\n").unwrap();
        assert_eq!(load_config_file(&config_path).unwrap(), AppConfig::default());
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config_file(Path::new("/nonexistent/config.yaml"));
        assert!(matches!(result, Err(ConfigFileError::NotFound(_))));
    }

    #[test]
    fn test_load_config_file_bad_yaml() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("bad.yaml");
        std::fs::write(&config_path, "graph: [1, 2").unwrap();
        assert!(matches!(
            load_config_file(&config_path),
            Err(ConfigFileError::Parse(_))
        ));
    }

    #[test]
    fn test_config_merge() {
        let mut base = AppConfig::builder().path_limit(2).quiet(true).build();
        let overrides = AppConfig::builder()
            .max_paths(3)
            .fail_on_new(Some(Severity::High))
            .build();

        base.merge(&overrides);

        assert_eq!(base.graph.path_limit, 2);
        assert_eq!(base.normalize.max_paths, 3);
        assert_eq!(base.behavior.fail_on_new, Some(Severity::High));
        assert!(base.behavior.quiet);
    }

    #[test]
    fn test_generate_example_config_round_trips() {
        let example = generate_example_config(ConfigPreset::Ci);
        assert!(example.contains("graph:"));
        let parsed: AppConfig = serde_yaml_ng::from_str(&example).unwrap();
        assert_eq!(parsed, ConfigPreset::Ci.config());
    }

    #[test]
    fn test_discover_explicit_path() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("custom-config.yaml");
        std::fs::write(&config_path, "graph:\n  max_depth: 8\n").unwrap();

        assert_eq!(discover_config_file(Some(&config_path)), Some(config_path));
    }
}
