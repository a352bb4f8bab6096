//! Input parsing stage.
//!
//! Reads the SBOM and scan result of one revision with context for error
//! messages.

use super::PipelineError;
use crate::model::{RevisionInfo, Sbom, ScanResult};
use crate::parsers::{CycloneDxParser, GrypeParser, InputParser};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Locations of one revision's inputs.
#[derive(Debug, Clone)]
pub struct RevisionPaths {
    pub sbom: PathBuf,
    pub scan: PathBuf,
}

impl RevisionPaths {
    pub fn new(sbom: impl Into<PathBuf>, scan: impl Into<PathBuf>) -> Self {
        Self {
            sbom: sbom.into(),
            scan: scan.into(),
        }
    }
}

/// Both inputs of one revision, parsed.
#[derive(Debug, Clone)]
pub struct RevisionInputs {
    pub sbom: Sbom,
    pub scan: ScanResult,
    pub revision: RevisionInfo,
}

/// Parse an SBOM with context for error messages
pub fn parse_sbom_with_context(path: &Path, quiet: bool) -> Result<Sbom> {
    let parser = CycloneDxParser::new();
    if !quiet {
        tracing::info!("Parsing {} SBOM: {}", parser.format_name(), path.display());
    }
    let sbom = parser
        .parse(path)
        .with_context(|| format!("Failed to parse SBOM: {}", path.display()))?;
    if !quiet {
        tracing::info!("Parsed {} components", sbom.component_count());
    }
    Ok(sbom)
}

/// Parse a scan result with context for error messages
pub fn parse_scan_with_context(path: &Path, quiet: bool) -> Result<ScanResult> {
    let parser = GrypeParser::new();
    if !quiet {
        tracing::info!("Parsing {} scan result: {}", parser.format_name(), path.display());
    }
    let scan = parser
        .parse(path)
        .with_context(|| format!("Failed to parse scan result: {}", path.display()))?;
    if !quiet {
        tracing::info!("Parsed {} matches", scan.finding_count());
    }
    Ok(scan)
}

/// Parse both inputs of a revision and fill in the input-derived
/// revision metadata.
pub fn parse_revision(
    paths: &RevisionPaths,
    revision: RevisionInfo,
    quiet: bool,
) -> Result<RevisionInputs, PipelineError> {
    let sbom = parse_sbom_with_context(&paths.sbom, quiet).map_err(|source| {
        PipelineError::ParseFailed {
            path: paths.sbom.display().to_string(),
            source,
        }
    })?;
    let scan = parse_scan_with_context(&paths.scan, quiet).map_err(|source| {
        PipelineError::ParseFailed {
            path: paths.scan.display().to_string(),
            source,
        }
    })?;

    let revision = RevisionInfo {
        sbom_source: Some(paths.sbom.display().to_string()),
        scan_source: Some(paths.scan.display().to_string()),
        component_count: sbom.component_count(),
        raw_match_count: scan.finding_count(),
        ..revision
    };

    Ok(RevisionInputs {
        sbom,
        scan,
        revision,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_revision_records_sources() {
        let dir = tempfile::TempDir::new().unwrap();
        let sbom = dir.path().join("sbom.json");
        let scan = dir.path().join("scan.json");
        std::fs::write(&sbom, r#"{"components": [{"bom-ref": "a", "name": "a"}]}"#).unwrap();
        std::fs::write(&scan, r#"{"matches": []}"#).unwrap();

        let inputs =
            parse_revision(&RevisionPaths::new(&sbom, &scan), RevisionInfo::new("base"), true).unwrap();
        assert_eq!(inputs.revision.name, "base");
        assert_eq!(inputs.revision.component_count, 1);
        assert_eq!(inputs.revision.raw_match_count, 0);
        assert_eq!(inputs.revision.sbom_source.as_deref(), sbom.to_str());
    }

    #[test]
    fn test_parse_failure_names_path() {
        let paths = RevisionPaths::new("/nonexistent/sbom.json", "/nonexistent/scan.json");
        let err = parse_revision(&paths, RevisionInfo::new("head"), true).unwrap_err();
        assert!(matches!(err, PipelineError::ParseFailed { ref path, .. } if path.contains("sbom.json")));
    }
}
