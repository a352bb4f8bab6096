//! Diff engine.
//!
//! Classifies every `match_key` of two normalized revisions as NEW,
//! REMOVED or UNCHANGED and builds the severity × state summary matrix.
//!
//! # Example
//!
//! ```ignore
//! use sbom_vuln_diff::diff::DiffEngine;
//!
//! let result = DiffEngine::new().diff(&base.occurrences, &head.occurrences);
//! for item in result.new_items() {
//!     println!("{} {}", item.occurrence.id, item.occurrence.package.coordinate());
//! }
//! ```

mod engine;
mod result;

pub use engine::DiffEngine;
pub use result::{DiffItem, DiffResult, summarize};
