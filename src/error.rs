//! Unified error types for sbom-vuln-diff.
//!
//! Only malformed or missing input is fatal. Unresolvable components, path
//! limit exhaustion and module heuristic misses are absorbed where they occur
//! and never surface here.

use std::path::PathBuf;
use thiserror::Error;

use crate::parsers::ParseError;

/// Main error type for sbom-vuln-diff operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum VulnDiffError {
    /// Errors while reading an input document
    #[error("Failed to parse input: {context}")]
    Parse {
        context: String,
        #[source]
        source: ParseErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Specific parse error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ParseErrorKind {
    #[error("Invalid JSON structure: {0}")]
    InvalidJson(String),

    #[error("Missing required field: {field} in {context}")]
    MissingField { field: String, context: String },

    #[error("Invalid field value for '{field}': {message}")]
    InvalidValue { field: String, message: String },

    #[error("Unsupported schema version: {version} (supported: {supported})")]
    UnsupportedSchemaVersion { version: String, supported: String },

    #[error("Input too large: {0}")]
    TooLarge(String),
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for sbom-vuln-diff operations
pub type Result<T> = std::result::Result<T, VulnDiffError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl VulnDiffError {
    /// Create a parse error with context
    pub fn parse(context: impl Into<String>, source: ParseErrorKind) -> Self {
        Self::Parse {
            context: context.into(),
            source,
        }
    }

    /// Create a parse error for a missing required field
    pub fn missing_field(field: impl Into<String>, context: impl Into<String>) -> Self {
        Self::parse(
            "missing required field",
            ParseErrorKind::MissingField {
                field: field.into(),
                context: context.into(),
            },
        )
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Whether this error reports a missing required field.
    #[must_use]
    pub const fn is_missing_field(&self) -> bool {
        matches!(
            self,
            Self::Parse {
                source: ParseErrorKind::MissingField { .. },
                ..
            }
        )
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for VulnDiffError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for VulnDiffError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse(
            "JSON deserialization",
            ParseErrorKind::InvalidJson(err.to_string()),
        )
    }
}

impl From<ParseError> for VulnDiffError {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::IoError(message) => Self::Io {
                source: std::io::Error::other(message.clone()),
                path: None,
                message,
            },
            ParseError::JsonError(msg) => {
                Self::parse("input document", ParseErrorKind::InvalidJson(msg))
            }
            ParseError::MissingField { field, document } => Self::missing_field(field, document),
            ParseError::InvalidStructure(msg) => Self::parse(
                "input document",
                ParseErrorKind::InvalidValue {
                    field: "document".to_string(),
                    message: msg,
                },
            ),
            ParseError::FileTooLarge(msg) => {
                Self::parse("input document", ParseErrorKind::TooLarge(msg))
            }
        }
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// Context strings chain outward, so the final message reads from the
/// outermost operation to the original failure.
///
/// # Example
///
/// ```ignore
/// use sbom_vuln_diff::error::ErrorContext;
///
/// fn load_scan(path: &Path) -> Result<ScanResult> {
///     parse_scan_file(path)
///         .with_context(|| format!("loading scan result {}", path.display()))
/// }
/// ```
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<VulnDiffError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: VulnDiffError, new_ctx: &str) -> VulnDiffError {
    match err {
        VulnDiffError::Parse {
            context: existing,
            source,
        } => VulnDiffError::Parse {
            context: chain_context(new_ctx, &existing),
            source,
        },
        VulnDiffError::Io {
            path,
            message,
            source,
        } => VulnDiffError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        VulnDiffError::Config(msg) => VulnDiffError::Config(chain_context(new_ctx, &msg)),
    }
}

/// Chain two context strings as "`new`: `existing`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = VulnDiffError::missing_field("items", "diff document");
        let display = err.to_string();
        assert!(
            display.contains("missing") || display.contains("parse"),
            "Error message should mention the failure: {}",
            display
        );
        assert!(err.is_missing_field());
    }

    #[test]
    fn test_missing_field_source_names_field() {
        let err = VulnDiffError::missing_field("occurrences", "normalized document");
        let source = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(
            source.as_deref(),
            Some("Missing required field: occurrences in normalized document")
        );
    }

    #[test]
    fn test_io_error_has_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = VulnDiffError::io("/path/to/scan.json", io_err);
        assert!(err.to_string().contains("/path/to/scan.json"));
    }

    #[test]
    fn test_from_parse_error() {
        let err: VulnDiffError = ParseError::MissingField {
            field: "matches".to_string(),
            document: "scan result".to_string(),
        }
        .into();
        assert!(err.is_missing_field());

        let err: VulnDiffError = ParseError::JsonError("eof".to_string()).into();
        assert!(matches!(
            err,
            VulnDiffError::Parse {
                source: ParseErrorKind::InvalidJson(_),
                ..
            }
        ));
    }

    #[test]
    fn test_context_chaining_multiple_levels() {
        fn inner() -> Result<()> {
            Err(VulnDiffError::parse(
                "base",
                ParseErrorKind::InvalidJson("eof".to_string()),
            ))
        }

        fn middle() -> Result<()> {
            inner().context("middle layer")
        }

        fn outer() -> Result<()> {
            middle().context("outer layer")
        }

        match outer() {
            Err(VulnDiffError::Parse { context, .. }) => {
                assert_eq!(context, "outer layer: middle layer: base");
            }
            _ => panic!("Expected Parse error"),
        }
    }

    #[test]
    fn test_with_context_lazy_evaluation() {
        let mut called = false;

        let ok_result: Result<i32> = Ok(42);
        let _ = ok_result.with_context(|| {
            called = true;
            "should not be called"
        });
        assert!(!called, "Closure should not be called for Ok result");

        let err_result: Result<i32> = Err(VulnDiffError::config("error"));
        let _ = err_result.with_context(|| {
            called = true;
            "should be called"
        });
        assert!(called, "Closure should be called for Err result");
    }

    #[test]
    fn test_chain_context_helper() {
        assert_eq!(chain_context("new", ""), "new");
        assert_eq!(chain_context("new", "existing"), "new: existing");
    }
}
