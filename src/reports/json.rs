//! JSON document writer.

use super::ReportError;
use serde::Serialize;
use std::io::Write;

/// Serializes output documents as JSON
#[derive(Debug, Clone, Copy)]
pub struct JsonReporter {
    /// Pretty print output
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter (pretty printed)
    #[must_use]
    pub const fn new() -> Self {
        Self { pretty: true }
    }

    /// Set pretty printing
    #[must_use]
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Render a document to a string.
    pub fn generate<T: Serialize>(&self, document: &T) -> Result<String, ReportError> {
        let json = if self.pretty {
            serde_json::to_string_pretty(document)
        } else {
            serde_json::to_string(document)
        }
        .map_err(|e| ReportError::SerializationError(e.to_string()))?;
        Ok(json)
    }

    /// Render a document into a writer, newline terminated.
    pub fn write_report<T: Serialize>(
        &self,
        document: &T,
        writer: &mut dyn Write,
    ) -> Result<(), ReportError> {
        let json = self.generate(document)?;
        writer.write_all(json.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}
