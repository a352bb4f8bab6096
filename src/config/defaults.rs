//! Named configuration presets and default values.

use super::types::{AppConfig, BehaviorConfig, NormalizeConfig, OutputConfig, PathSearchConfig};
use crate::aggregate::RiskWeights;
use crate::model::Severity;

/// Default for `output.pretty`.
pub const DEFAULT_PRETTY_OUTPUT: bool = true;

// ============================================================================
// Configuration Presets
// ============================================================================

/// Named configuration presets for common use cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ConfigPreset {
    /// Default settings
    #[default]
    Default,
    /// CI gate: compact output, fail on new HIGH or CRITICAL findings
    Ci,
    /// Wide path search for deep dependency trees
    Deep,
}

impl ConfigPreset {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Ci => "ci",
            Self::Deep => "deep",
        }
    }

    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Default => "Balanced path search and pretty JSON output",
            Self::Ci => "Compact output that fails the build on new HIGH/CRITICAL findings",
            Self::Deep => "More paths per finding and a deeper search bound",
        }
    }

    /// Build the configuration this preset stands for.
    #[must_use]
    pub fn config(&self) -> AppConfig {
        match self {
            Self::Default => AppConfig::default(),
            Self::Ci => AppConfig {
                output: OutputConfig {
                    pretty: false,
                    dir: None,
                },
                behavior: BehaviorConfig {
                    fail_on_new: Some(Severity::High),
                    quiet: true,
                },
                ..AppConfig::default()
            },
            Self::Deep => AppConfig {
                graph: PathSearchConfig {
                    path_limit: 20,
                    max_depth: 256,
                    max_expansions: 1_000_000,
                },
                normalize: NormalizeConfig { max_paths: 50 },
                risk: RiskWeights::default(),
                ..AppConfig::default()
            },
        }
    }
}

impl std::fmt::Display for ConfigPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
