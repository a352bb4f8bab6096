//! Configuration validation.

use super::types::{AppConfig, NormalizeConfig, OutputConfig, PathSearchConfig};
use crate::aggregate::RiskWeights;

/// Upper bound accepted for `graph.max_depth`.
pub const MAX_DEPTH_CEILING: usize = 4096;

// ============================================================================
// Configuration Error
// ============================================================================

/// A single failed field check.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.graph.validate());
        errors.extend(self.normalize.validate());
        errors.extend(self.risk.validate());
        errors.extend(self.output.validate());

        if self.normalize.max_paths < self.graph.path_limit {
            errors.push(ConfigError::new(
                "normalize.max_paths",
                format!(
                    "max_paths ({}) is below graph.path_limit ({}); paths would be dropped for every finding",
                    self.normalize.max_paths, self.graph.path_limit
                ),
            ));
        }
        errors
    }
}

impl Validatable for PathSearchConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.max_depth == 0 {
            errors.push(ConfigError::new("graph.max_depth", "must be at least 1"));
        } else if self.max_depth > MAX_DEPTH_CEILING {
            errors.push(ConfigError::new(
                "graph.max_depth",
                format!("must not exceed {MAX_DEPTH_CEILING}, got {}", self.max_depth),
            ));
        }
        if self.max_expansions == 0 {
            errors.push(ConfigError::new("graph.max_expansions", "must be at least 1"));
        }
        errors
    }
}

impl Validatable for NormalizeConfig {
    fn validate(&self) -> Vec<ConfigError> {
        Vec::new()
    }
}

impl Validatable for RiskWeights {
    fn validate(&self) -> Vec<ConfigError> {
        let ladder = [
            ("critical", self.critical),
            ("high", self.high),
            ("medium", self.medium),
            ("low", self.low),
            ("unknown", self.unknown),
        ];
        ladder
            .windows(2)
            .filter(|pair| pair[0].1 < pair[1].1)
            .map(|pair| {
                ConfigError::new(
                    &format!("risk.{}", pair[1].0),
                    format!(
                        "weight {} exceeds the {} weight {}",
                        pair[1].1, pair[0].0, pair[0].1
                    ),
                )
            })
            .collect()
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if let Some(ref dir) = self.dir
            && dir.exists()
            && !dir.is_dir()
        {
            errors.push(ConfigError::new(
                "output.dir",
                format!("Not a directory: {}", dir.display()),
            ));
        }
        errors
    }
}
