//! Configuration types for sbom-vuln-diff operations.

use crate::aggregate::RiskWeights;
use crate::graph::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_EXPANSIONS, GraphConfig};
use crate::model::Severity;
use crate::normalize::{DEFAULT_MAX_PATHS, DEFAULT_PATH_LIMIT, NormalizerConfig};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration that can be loaded from CLI args or config files.
///
/// CLI arguments are layered over file settings with [`AppConfig::merge`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Dependency path enumeration
    pub graph: PathSearchConfig,
    /// Finding normalization
    pub normalize: NormalizeConfig,
    /// Per-severity weights for the risk KPIs
    pub risk: RiskWeights,
    /// Output configuration
    pub output: OutputConfig,
    /// Behavior flags
    pub behavior: BehaviorConfig,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an `AppConfig` builder.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Settings handed to [`crate::graph::SbomGraphIndex::build_with_config`].
    #[must_use]
    pub const fn graph_config(&self) -> GraphConfig {
        GraphConfig {
            max_depth: self.graph.max_depth,
            max_expansions: self.graph.max_expansions,
        }
    }

    /// Settings handed to [`crate::normalize::Normalizer::with_config`].
    #[must_use]
    pub const fn normalizer_config(&self) -> NormalizerConfig {
        NormalizerConfig {
            path_limit: self.graph.path_limit,
            max_paths: self.normalize.max_paths,
        }
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Paths requested per resolved component.
    pub const fn path_limit(mut self, limit: usize) -> Self {
        self.config.graph.path_limit = limit;
        self
    }

    /// Maximum hops walked from a component toward a root.
    pub const fn max_depth(mut self, depth: usize) -> Self {
        self.config.graph.max_depth = depth;
        self
    }

    /// Parent expansions allowed per path query.
    pub const fn max_expansions(mut self, budget: usize) -> Self {
        self.config.graph.max_expansions = budget;
        self
    }

    /// Cap on merged paths per occurrence.
    pub const fn max_paths(mut self, max: usize) -> Self {
        self.config.normalize.max_paths = max;
        self
    }

    pub const fn risk_weights(mut self, weights: RiskWeights) -> Self {
        self.config.risk = weights;
        self
    }

    /// Pretty-print JSON documents.
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.config.output.pretty = pretty;
        self
    }

    /// Directory the `run` command writes into.
    pub fn output_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.config.output.dir = dir;
        self
    }

    /// Fail when NEW findings at or above this severity appear.
    pub const fn fail_on_new(mut self, severity: Option<Severity>) -> Self {
        self.config.behavior.fail_on_new = severity;
        self
    }

    /// Enable quiet mode.
    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.config.behavior.quiet = quiet;
        self
    }

    /// Build the `AppConfig`.
    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Section types
// ============================================================================

/// Dependency path search settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct PathSearchConfig {
    /// Paths requested from the graph per resolved component
    pub path_limit: usize,
    /// Maximum number of hops from a component toward a root
    pub max_depth: usize,
    /// Parent expansions one path query may perform before giving up
    pub max_expansions: usize,
}

impl Default for PathSearchConfig {
    fn default() -> Self {
        Self {
            path_limit: DEFAULT_PATH_LIMIT,
            max_depth: DEFAULT_MAX_DEPTH,
            max_expansions: DEFAULT_MAX_EXPANSIONS,
        }
    }
}

/// Normalization settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct NormalizeConfig {
    /// Upper bound on the path set of a merged occurrence
    pub max_paths: usize,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            max_paths: DEFAULT_MAX_PATHS,
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print JSON documents
    pub pretty: bool,
    /// Output directory for the `run` command
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: true,
            dir: None,
        }
    }
}

/// Behavior flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Exit with code 2 when a NEW finding at or above this severity exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fail_on_new: Option<Severity>,
    /// Suppress non-essential output
    pub quiet: bool,
}
