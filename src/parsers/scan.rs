//! Vulnerability scan result parser (Grype-style JSON).
//!
//! Each entry of `matches[]` becomes one [`RawFinding`]. Ids of
//! `relatedVulnerabilities` become aliases; their URLs and CVSS entries are
//! folded into the finding.

use crate::model::{ArtifactRef, CvssEntry, FixInfo, FixState, RawFinding, ScanResult, ScannerInfo};
use crate::parsers::traits::{InputParser, ParseError};
use serde::Deserialize;

/// Parser for Grype-style scan result documents
#[derive(Debug, Clone, Copy, Default)]
pub struct GrypeParser;

impl GrypeParser {
    pub const fn new() -> Self {
        Self
    }
}

impl InputParser for GrypeParser {
    type Output = ScanResult;

    fn parse_str(&self, content: &str) -> Result<ScanResult, ParseError> {
        let doc: GrypeDocument = serde_json::from_str(content)?;
        let matches = doc
            .matches
            .ok_or_else(|| ParseError::missing_field("matches", "scan result"))?;

        let findings: Vec<RawFinding> = matches.into_iter().map(convert_match).collect();
        let missing_ids = findings
            .iter()
            .filter(|f| f.vulnerability_id.is_none())
            .count();
        if missing_ids > 0 {
            tracing::debug!(missing_ids, "Scan matches without a vulnerability id");
        }

        Ok(ScanResult {
            scanner: doc.descriptor.and_then(|d| {
                d.name.map(|name| ScannerInfo {
                    name,
                    version: d.version,
                })
            }),
            findings,
        })
    }

    fn format_name(&self) -> &str {
        "Grype"
    }
}

fn convert_match(m: GrypeMatch) -> RawFinding {
    let vuln = m.vulnerability.unwrap_or_default();

    let mut urls = vuln.urls.unwrap_or_default();
    urls.extend(vuln.data_source.filter(|s| !s.is_empty()));
    let mut cvss: Vec<CvssEntry> = vuln
        .cvss
        .unwrap_or_default()
        .into_iter()
        .filter_map(convert_cvss)
        .collect();
    let mut aliases = Vec::new();

    for related in m.related_vulnerabilities.unwrap_or_default() {
        aliases.extend(related.id.filter(|id| !id.is_empty()));
        urls.extend(related.urls.unwrap_or_default());
        urls.extend(related.data_source.filter(|s| !s.is_empty()));
        cvss.extend(
            related
                .cvss
                .unwrap_or_default()
                .into_iter()
                .filter_map(convert_cvss),
        );
    }
    urls.retain(|u| !u.is_empty());

    let fix = vuln.fix.map(|f| FixInfo {
        state: f.state.as_deref().map_or(FixState::Unknown, FixState::parse),
        versions: f.versions.unwrap_or_default(),
    });

    let artifact = m.artifact.unwrap_or_default();

    RawFinding {
        vulnerability_id: vuln.id.filter(|id| !id.is_empty()),
        aliases,
        severity: vuln.severity,
        cvss,
        fix,
        urls,
        artifact: ArtifactRef {
            id: artifact.id,
            name: artifact.name,
            version: artifact.version,
            purl: artifact.purl.filter(|p| !p.is_empty()),
        },
    }
}

/// Entries without a finite base score carry no usable signal.
fn convert_cvss(cvss: GrypeCvss) -> Option<CvssEntry> {
    let base_score = cvss.metrics.and_then(|m| m.base_score)?;
    if !base_score.is_finite() {
        return None;
    }
    Some(CvssEntry {
        version: cvss.version,
        vector: cvss.vector,
        base_score,
    })
}

// Grype JSON structures for deserialization

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GrypeDocument {
    matches: Option<Vec<GrypeMatch>>,
    descriptor: Option<GrypeDescriptor>,
}

#[derive(Debug, Deserialize)]
struct GrypeDescriptor {
    name: Option<String>,
    version: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GrypeMatch {
    vulnerability: Option<GrypeVulnerability>,
    related_vulnerabilities: Option<Vec<GrypeVulnerability>>,
    artifact: Option<GrypeArtifact>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GrypeVulnerability {
    id: Option<String>,
    data_source: Option<String>,
    severity: Option<String>,
    urls: Option<Vec<String>>,
    cvss: Option<Vec<GrypeCvss>>,
    fix: Option<GrypeFix>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GrypeCvss {
    version: Option<String>,
    vector: Option<String>,
    metrics: Option<GrypeCvssMetrics>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GrypeCvssMetrics {
    base_score: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct GrypeFix {
    state: Option<String>,
    versions: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
struct GrypeArtifact {
    id: Option<String>,
    name: Option<String>,
    version: Option<String>,
    purl: Option<String>,
}
