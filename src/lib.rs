//! **Vulnerability diff between two revisions of a software project.**
//!
//! Each revision is described by a CycloneDX JSON SBOM and a Grype-style JSON
//! vulnerability scan. `sbom-vuln-diff` turns each scan into a canonical set
//! of [`Occurrence`]s (one per vulnerability id and package coordinate, with
//! bounded dependency paths taken from the SBOM graph), classifies them across
//! the two revisions as NEW, REMOVED or UNCHANGED, and rolls the result up by
//! first-party module, severity-weighted risk and fix availability.
//!
//! ## Core Concepts & Modules
//!
//! - **[`graph`]**: [`SbomGraphIndex`], a read-only index over one SBOM that
//!   resolves scanner artifacts to components and enumerates bounded
//!   root-to-component dependency paths.
//! - **[`normalize`]**: [`Normalizer`], which converts raw scanner matches
//!   into occurrences and folds duplicates that share a `match_key`.
//! - **[`diff`]**: [`DiffEngine`], a set comparison of two occurrence lists.
//! - **[`aggregate`]**: [`Aggregator`], which attributes diff items to
//!   modules and computes risk and fix rollups.
//! - **[`reports`]**: the three JSON output documents.
//! - **[`pipeline`]**: stage functions shared by the CLI commands.
//!
//! ## Getting Started
//!
//! ```no_run
//! use std::path::Path;
//! use sbom_vuln_diff::{DiffEngine, Normalizer, SbomGraphIndex};
//! use sbom_vuln_diff::parsers::{parse_sbom_file, parse_scan_file};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let normalize = |sbom: &str, scan: &str| -> Result<_, Box<dyn std::error::Error>> {
//!         let sbom = parse_sbom_file(Path::new(sbom))?;
//!         let scan = parse_scan_file(Path::new(scan))?;
//!         let graph = SbomGraphIndex::build(&sbom);
//!         Ok(Normalizer::new(&graph).normalize(&scan).occurrences)
//!     };
//!
//!     let base = normalize("base/bom.json", "base/grype.json")?;
//!     let head = normalize("head/bom.json", "head/grype.json")?;
//!     let diff = DiffEngine::new().diff(&base, &head);
//!
//!     for item in diff.new_items() {
//!         println!("{} {} {}", item.severity(), item.occurrence.id, item.occurrence.package.coordinate());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Command-Line Interface (CLI)
//!
//! The `sbom-vuln-diff` binary exposes `normalize`, `diff`, `aggregate` and
//! `run` subcommands on top of this library.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
// Pedantic lints: allow categories that are design choices for this codebase
#![allow(
    // Doc completeness: # Errors / # Panics sections are not written per function
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    // Command handlers take their command struct by value
    clippy::needless_pass_by_value,
    // Variable names like `base`/`head` are clear in context
    clippy::similar_names
)]

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod diff;
pub mod error;
pub mod graph;
pub mod model;
pub mod normalize;
pub mod parsers;
pub mod pipeline;
pub mod reports;

// Re-export main types for convenience
pub use aggregate::{AggregateResult, Aggregator, RiskKpis, RiskWeights};
pub use config::{AppConfig, AppConfigBuilder, ConfigError, ConfigPreset, Validatable};
pub use diff::{DiffEngine, DiffItem, DiffResult};
pub use error::{ErrorContext, Result, VulnDiffError};
pub use graph::{GraphConfig, SbomGraphIndex};
pub use model::{Component, DiffState, Occurrence, Sbom, ScanResult, Severity};
pub use normalize::{NormalizationResult, Normalizer, NormalizerConfig};
pub use parsers::{parse_sbom_file, parse_sbom_str, parse_scan_file, parse_scan_str};
pub use reports::{AggregateDocument, DiffDocument, NormalizedDocument};
