//! Reading output documents back for the staged CLI commands.
//!
//! Required top-level keys are checked on the raw JSON first, so a missing
//! key is reported by name instead of as a generic deserialization error.

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::Path;

use super::documents::{DiffDocument, NormalizedDocument, SCHEMA_VERSION};
use crate::error::{ErrorContext, ParseErrorKind, Result, VulnDiffError};
use crate::parsers::MAX_INPUT_FILE_SIZE;

const NORMALIZED_REQUIRED: &[&str] = &["schema_version", "generated_at", "revision", "occurrences"];
const DIFF_REQUIRED: &[&str] = &["schema_version", "generated_at", "base", "head", "items"];

/// Parse a normalized document.
pub fn load_normalized_str(content: &str) -> Result<NormalizedDocument> {
    load_document(content, "normalized document", NORMALIZED_REQUIRED)
}

/// Parse a diff document.
pub fn load_diff_str(content: &str) -> Result<DiffDocument> {
    load_document(content, "diff document", DIFF_REQUIRED)
}

/// Read and parse a normalized document file.
pub fn load_normalized_file(path: &Path) -> Result<NormalizedDocument> {
    let content = read_document(path)?;
    load_normalized_str(&content).with_context(|| path.display().to_string())
}

/// Read and parse a diff document file.
pub fn load_diff_file(path: &Path) -> Result<DiffDocument> {
    let content = read_document(path)?;
    load_diff_str(&content).with_context(|| path.display().to_string())
}

fn read_document(path: &Path) -> Result<String> {
    let metadata = std::fs::metadata(path).map_err(|e| VulnDiffError::io(path, e))?;
    if metadata.len() > MAX_INPUT_FILE_SIZE {
        return Err(VulnDiffError::parse(
            path.display().to_string(),
            ParseErrorKind::TooLarge(format!("{} bytes", metadata.len())),
        ));
    }
    std::fs::read_to_string(path).map_err(|e| VulnDiffError::io(path, e))
}

fn load_document<T: DeserializeOwned>(content: &str, kind: &str, required: &[&str]) -> Result<T> {
    let value: Value = serde_json::from_str(content).context(kind.to_string())?;
    let Some(object) = value.as_object() else {
        return Err(VulnDiffError::parse(
            kind,
            ParseErrorKind::InvalidValue {
                field: "document".to_string(),
                message: "expected a JSON object".to_string(),
            },
        ));
    };

    if let Some(missing) = required.iter().find(|key| !object.contains_key(**key)) {
        return Err(VulnDiffError::missing_field(*missing, kind));
    }

    if let Some(version) = object.get("schema_version").and_then(Value::as_str) {
        check_schema_version(version, kind)?;
    }

    serde_json::from_value(value).context(kind.to_string())
}

/// Documents with the same major schema version are readable.
fn check_schema_version(version: &str, kind: &str) -> Result<()> {
    let major = |v: &str| v.split('.').next().map(str::to_string);
    if major(version) == major(SCHEMA_VERSION) {
        return Ok(());
    }
    Err(VulnDiffError::parse(
        kind,
        ParseErrorKind::UnsupportedSchemaVersion {
            version: version.to_string(),
            supported: SCHEMA_VERSION.to_string(),
        },
    ))
}
