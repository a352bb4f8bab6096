//! Canonical occurrence model.
//!
//! An [`Occurrence`] is one vulnerability affecting one package version
//! within one revision. Its `match_key` is the identity used for merging
//! duplicate scanner matches and for diffing revisions.

use super::{CvssEntry, FixInfo, Severity};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// Group value used when no group/namespace could be determined.
pub const UNKNOWN_GROUP: &str = "unknown";

/// Resolved package coordinates of an occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageCoords {
    pub group: String,
    pub artifact: String,
    pub version: String,
    #[serde(default)]
    pub purl: Option<String>,
    /// SBOM handle of the resolved component, `None` when unresolved
    #[serde(default)]
    pub component_ref: Option<String>,
}

impl PackageCoords {
    /// `group:artifact:version`
    #[must_use]
    pub fn coordinate(&self) -> String {
        format!("{}:{}:{}", self.group, self.artifact, self.version)
    }

    /// Whether the package was resolved against the SBOM graph.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.component_ref.is_some()
    }
}

/// Canonical, deduplicated vulnerability occurrence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Occurrence {
    /// Primary identifier
    pub id: String,
    /// All known aliases, including `id`
    pub ids: BTreeSet<String>,
    pub severity: Severity,
    /// Highest-scoring CVSS entry observed
    pub cvss_max: Option<CvssEntry>,
    pub fix: Option<FixInfo>,
    pub urls: BTreeSet<String>,
    pub package: PackageCoords,
    /// Root-to-component label chains
    pub paths: BTreeSet<Vec<String>>,
    pub match_key: String,
}

impl Occurrence {
    /// Compose the identity key `id::group:artifact:version`.
    #[must_use]
    pub fn compose_match_key(id: &str, package: &PackageCoords) -> String {
        format!("{id}::{}", package.coordinate())
    }

    /// Whether fix metadata lists at least one fixed-in version.
    #[must_use]
    pub fn has_fix(&self) -> bool {
        self.fix.as_ref().is_some_and(FixInfo::has_fix)
    }

    /// Highest CVSS base score, if any.
    #[must_use]
    pub fn cvss_score(&self) -> Option<f64> {
        self.cvss_max.as_ref().map(|c| c.base_score)
    }

    /// Deterministic presentation order: severity (most severe first),
    /// then package coordinate, then id.
    #[must_use]
    pub fn presentation_cmp(&self, other: &Self) -> Ordering {
        self.severity
            .rank()
            .cmp(&other.severity.rank())
            .then_with(|| self.package.coordinate().cmp(&other.package.coordinate()))
            .then_with(|| self.id.cmp(&other.id))
            .then_with(|| self.match_key.cmp(&other.match_key))
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::occurrence;
    use super::*;

    #[test]
    fn test_match_key_format() {
        let occ = occurrence("GHSA-jfh8-c2jp-5v3q", "org.apache:log4j:2.14.1", Severity::Critical);
        assert_eq!(occ.match_key, "GHSA-jfh8-c2jp-5v3q::org.apache:log4j:2.14.1");
    }

    #[test]
    fn test_presentation_order() {
        let low = occurrence("CVE-1", "a:a:1", Severity::Low);
        let crit = occurrence("CVE-2", "z:z:1", Severity::Critical);
        let crit_b = occurrence("CVE-0", "z:z:1", Severity::Critical);
        let mut list = vec![low.clone(), crit.clone(), crit_b.clone()];
        list.sort_by(Occurrence::presentation_cmp);
        assert_eq!(list[0].id, "CVE-0");
        assert_eq!(list[1].id, "CVE-2");
        assert_eq!(list[2].id, "CVE-1");
    }

    #[test]
    fn test_has_fix_requires_versions() {
        let mut occ = occurrence("CVE-1", "a:a:1", Severity::Low);
        assert!(!occ.has_fix());
        occ.fix = Some(FixInfo {
            state: crate::model::FixState::Fixed,
            versions: vec!["1.1".to_string()],
        });
        assert!(occ.has_fix());
    }
}
