//! Output documents and their JSON serialization.
//!
//! Three documents are produced: a normalized document per revision, a diff
//! document over both revisions and an aggregate document derived from the
//! diff. Rendering them to HTML, Markdown or anything else is left to
//! downstream consumers.

mod documents;
mod json;
mod load;

pub use documents::{AggregateDocument, DiffDocument, NormalizedDocument, SCHEMA_VERSION, ToolInfo};
pub use json::JsonReporter;
pub use load::{load_diff_file, load_diff_str, load_normalized_file, load_normalized_str};

use thiserror::Error;

/// Errors that can occur while writing a document
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}
