//! Parser trait definitions and error types.

use std::path::Path;
use thiserror::Error;

/// Maximum accepted input file size (512 MB).
pub const MAX_INPUT_FILE_SIZE: u64 = 512 * 1024 * 1024;

/// Errors that can occur while parsing an input document
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("JSON parse error: {0}")]
    JsonError(String),

    #[error("Invalid document structure: {0}")]
    InvalidStructure(String),

    #[error("Missing required field '{field}' in {document}")]
    MissingField { field: String, document: String },

    #[error("File too large: {0}")]
    FileTooLarge(String),
}

impl ParseError {
    pub fn missing_field(field: impl Into<String>, document: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
            document: document.into(),
        }
    }
}

impl From<std::io::Error> for ParseError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonError(err.to_string())
    }
}

/// Read a whole input file, refusing anything above [`MAX_INPUT_FILE_SIZE`].
pub(crate) fn read_input(path: &Path) -> Result<String, ParseError> {
    let metadata = std::fs::metadata(path)?;
    if metadata.len() > MAX_INPUT_FILE_SIZE {
        return Err(ParseError::FileTooLarge(format!(
            "{} is {} MB, exceeding the {} MB limit",
            path.display(),
            metadata.len() / (1024 * 1024),
            MAX_INPUT_FILE_SIZE / (1024 * 1024),
        )));
    }
    Ok(std::fs::read_to_string(path)?)
}

/// Trait for input document parsers.
///
/// `Output` is the in-memory model the document is converted to: an
/// [`crate::model::Sbom`] or a [`crate::model::ScanResult`].
pub trait InputParser {
    type Output;

    /// Parse from a file path
    fn parse(&self, path: &Path) -> Result<Self::Output, ParseError> {
        let content = read_input(path)?;
        self.parse_str(&content)
    }

    /// Parse from string content
    fn parse_str(&self, content: &str) -> Result<Self::Output, ParseError>;

    /// Human-readable format name, used in log messages
    fn format_name(&self) -> &str;
}
