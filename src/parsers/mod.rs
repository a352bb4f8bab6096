//! Input document parsers.
//!
//! Two inputs per revision: a CycloneDX JSON SBOM and a Grype-style JSON
//! vulnerability scan result. Both are fully materialized before processing.
//!
//! ## Usage
//!
//! ```no_run
//! use sbom_vuln_diff::parsers::{parse_sbom_file, parse_scan_file};
//! use std::path::Path;
//!
//! let sbom = parse_sbom_file(Path::new("sbom.json")).unwrap();
//! let scan = parse_scan_file(Path::new("scan.json")).unwrap();
//! println!("{} components, {} matches", sbom.component_count(), scan.finding_count());
//! ```

mod cyclonedx;
mod scan;
mod traits;

pub use cyclonedx::CycloneDxParser;
pub use scan::GrypeParser;
pub use traits::{InputParser, MAX_INPUT_FILE_SIZE, ParseError};

use crate::model::{Sbom, ScanResult};
use std::path::Path;

/// Parse a CycloneDX SBOM file.
///
/// Returns an error if the file exceeds [`MAX_INPUT_FILE_SIZE`].
pub fn parse_sbom_file(path: &Path) -> Result<Sbom, ParseError> {
    CycloneDxParser::new().parse(path)
}

/// Parse a CycloneDX SBOM from string content.
pub fn parse_sbom_str(content: &str) -> Result<Sbom, ParseError> {
    CycloneDxParser::new().parse_str(content)
}

/// Parse a scan result file.
pub fn parse_scan_file(path: &Path) -> Result<ScanResult, ParseError> {
    GrypeParser::new().parse(path)
}

/// Parse a scan result from string content.
pub fn parse_scan_str(content: &str) -> Result<ScanResult, ParseError> {
    GrypeParser::new().parse_str(content)
}
