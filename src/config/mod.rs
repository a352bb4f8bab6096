//! Configuration module for sbom-vuln-diff.
//!
//! This module provides a unified configuration system with:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - Named presets for common use cases
//! - YAML config file loading and discovery
//! - CLI argument merging
//!
//! # Quick Start
//!
//! ```rust
//! use sbom_vuln_diff::config::{AppConfig, ConfigPreset, Validatable};
//!
//! let config = AppConfig::builder()
//!     .path_limit(3)
//!     .max_paths(6)
//!     .build();
//! assert!(config.is_valid());
//!
//! let ci = ConfigPreset::Ci.config();
//! assert!(ci.behavior.fail_on_new.is_some());
//! ```
//!
//! # Configuration File
//!
//! Place a `.sbom-vuln-diff.yaml` file in your project root or
//! `~/.config/sbom-vuln-diff/`:
//!
//! ```yaml
//! graph:
//!   path_limit: 5
//!   max_depth: 64
//!   max_expansions: 100000
//! normalize:
//!   max_paths: 10
//! risk:
//!   critical: 5
//!   high: 3
//! behavior:
//!   fail_on_new: HIGH
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::{ConfigPreset, DEFAULT_PRETTY_OUTPUT};
pub use file::{ConfigFileError, discover_config_file, generate_example_config, load_config_file, load_or_default};
pub use types::{
    AppConfig, AppConfigBuilder, BehaviorConfig, NormalizeConfig, OutputConfig, PathSearchConfig,
};
pub use validation::{ConfigError, MAX_DEPTH_CEILING, Validatable};

/// Generate the JSON Schema for [`AppConfig`].
pub fn generate_json_schema() -> Result<String, serde_json::Error> {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_schema_lists_sections() {
        let schema = generate_json_schema().unwrap();
        for section in ["graph", "normalize", "risk", "output", "behavior"] {
            assert!(schema.contains(&format!("\"{section}\"")), "missing {section}");
        }
    }
}
