//! Raw scanner findings, before normalization.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Scan result document for one revision.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanResult {
    /// Scanner that produced the matches, if recorded
    pub scanner: Option<ScannerInfo>,
    /// Raw matches in document order
    pub findings: Vec<RawFinding>,
}

impl ScanResult {
    #[must_use]
    pub fn finding_count(&self) -> usize {
        self.findings.len()
    }
}

/// Name and version of the scanner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScannerInfo {
    pub name: String,
    pub version: Option<String>,
}

/// One scanner match: a vulnerability reported against one artifact.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawFinding {
    /// The scanner's own vulnerability id
    pub vulnerability_id: Option<String>,
    /// Related identifiers for the same issue (CVE, GHSA, ...)
    pub aliases: Vec<String>,
    /// Scanner severity label, unnormalized
    pub severity: Option<String>,
    /// CVSS entries from the vulnerability and its related records
    pub cvss: Vec<CvssEntry>,
    /// Fix metadata
    pub fix: Option<FixInfo>,
    /// Reference URLs
    pub urls: Vec<String>,
    /// Affected artifact
    pub artifact: ArtifactRef,
}

/// Reference to the artifact a finding was reported against.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactRef {
    /// Scanner artifact id; some scanners reuse the SBOM `bom-ref`
    pub id: Option<String>,
    pub name: Option<String>,
    pub version: Option<String>,
    pub purl: Option<String>,
}

/// A single CVSS score entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CvssEntry {
    /// CVSS version string ("3.1", "2.0", ...)
    pub version: Option<String>,
    /// Vector string
    pub vector: Option<String>,
    /// Base score, 0.0-10.0
    pub base_score: f64,
}

impl CvssEntry {
    pub fn new(base_score: f64) -> Self {
        Self {
            version: None,
            vector: None,
            base_score,
        }
    }

    /// Total order used to pick between entries: score first, then vector
    /// and version so equal scores still resolve deterministically.
    #[must_use]
    pub fn cmp_strength(&self, other: &Self) -> std::cmp::Ordering {
        self.base_score
            .total_cmp(&other.base_score)
            .then_with(|| self.vector.cmp(&other.vector))
            .then_with(|| self.version.cmp(&other.version))
    }

    /// Highest-scoring entry of a list.
    #[must_use]
    pub fn strongest(entries: &[Self]) -> Option<&Self> {
        entries.iter().max_by(|a, b| a.cmp_strength(b))
    }
}

/// Fix availability state as reported by the scanner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum FixState {
    Fixed,
    NotFixed,
    WontFix,
    #[default]
    #[serde(other)]
    Unknown,
}

impl FixState {
    /// Parse a scanner fix-state label (case-insensitive, `_`/`-` agnostic).
    #[must_use]
    pub fn parse(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "fixed" => Self::Fixed,
            "not-fixed" | "notfixed" => Self::NotFixed,
            "wont-fix" | "wontfix" => Self::WontFix,
            _ => Self::Unknown,
        }
    }
}

/// Fix metadata: availability state plus fixed-in versions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FixInfo {
    pub state: FixState,
    pub versions: Vec<String>,
}

impl FixInfo {
    /// True when at least one fixed-in version is known.
    #[must_use]
    pub fn has_fix(&self) -> bool {
        self.versions.iter().any(|v| !v.trim().is_empty())
    }
}
