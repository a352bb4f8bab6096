//! Finding normalizer.
//!
//! Converts one revision's raw scanner matches into canonical
//! [`Occurrence`]s, at most one per `match_key`. Each match gets a primary
//! id, a normalized severity, package coordinates resolved through the
//! [`SbomGraphIndex`] and its bounded dependency paths; matches that collide
//! on `match_key` are folded together by [`merge::Candidate::merge`].

mod ids;
mod merge;
mod package;

pub use ids::{IdFamily, IdSelection, UNKNOWN_ID, select_primary_id};
pub use package::{UNKNOWN_FIELD, resolve_package};

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::graph::SbomGraphIndex;
use crate::model::{CvssEntry, Occurrence, RawFinding, ScanResult, Severity, SeverityCounts};
use merge::{Candidate, cap_paths};

/// Default number of paths requested per component.
pub const DEFAULT_PATH_LIMIT: usize = 5;
/// Default cap on merged paths per occurrence.
pub const DEFAULT_MAX_PATHS: usize = 10;

/// Normalizer settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizerConfig {
    /// Paths requested from the graph for each resolved component
    pub path_limit: usize,
    /// Cap on the path set of a merged occurrence
    pub max_paths: usize,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            path_limit: DEFAULT_PATH_LIMIT,
            max_paths: DEFAULT_MAX_PATHS,
        }
    }
}

/// Counters collected during normalization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizationStats {
    /// Raw matches consumed
    pub raw_matches: usize,
    /// Matches folded into an earlier match with the same key
    pub merged_duplicates: usize,
    /// Matches whose artifact did not resolve against the SBOM
    pub unresolved_packages: usize,
    /// Matches that carried no usable identifier
    pub unknown_ids: usize,
}

/// Output of one normalization run.
#[derive(Debug, Clone, Default)]
pub struct NormalizationResult {
    /// Occurrences sorted by `match_key`
    pub occurrences: Vec<Occurrence>,
    /// Per-severity occurrence counts
    pub summary: SeverityCounts,
    pub stats: NormalizationStats,
}

/// Converts raw scanner matches to occurrences for one revision.
pub struct Normalizer<'g> {
    graph: &'g SbomGraphIndex,
    config: NormalizerConfig,
}

impl<'g> Normalizer<'g> {
    #[must_use]
    pub const fn new(graph: &'g SbomGraphIndex) -> Self {
        Self {
            graph,
            config: NormalizerConfig {
                path_limit: DEFAULT_PATH_LIMIT,
                max_paths: DEFAULT_MAX_PATHS,
            },
        }
    }

    #[must_use]
    pub const fn with_config(mut self, config: NormalizerConfig) -> Self {
        self.config = config;
        self
    }

    /// Normalize a whole scan result.
    #[must_use]
    pub fn normalize(&self, scan: &ScanResult) -> NormalizationResult {
        self.normalize_findings(&scan.findings)
    }

    /// Normalize a list of raw matches.
    ///
    /// The result does not depend on the order of `findings` except for the
    /// first-writer-wins fields (package purl/ref and fix).
    #[must_use]
    pub fn normalize_findings(&self, findings: &[RawFinding]) -> NormalizationResult {
        let mut path_cache: HashMap<String, BTreeSet<Vec<String>>> = HashMap::new();
        let mut stats = NormalizationStats {
            raw_matches: findings.len(),
            ..NormalizationStats::default()
        };

        let merged = findings
            .iter()
            .map(|finding| self.normalize_match(finding, &mut path_cache, &mut stats))
            .fold(BTreeMap::<String, Candidate>::new(), |mut acc, candidate| {
                let key = candidate.occurrence.match_key.clone();
                let max_paths = self.config.max_paths;
                let folded = match acc.remove(&key) {
                    Some(existing) => existing.merge(candidate, max_paths),
                    None => candidate,
                };
                acc.insert(key, folded);
                acc
            });

        let occurrences: Vec<Occurrence> = merged.into_values().map(|c| c.occurrence).collect();
        stats.merged_duplicates = stats.raw_matches - occurrences.len();
        let summary = SeverityCounts::tally(occurrences.iter().map(|o| o.severity));

        tracing::debug!(
            raw_matches = stats.raw_matches,
            occurrences = occurrences.len(),
            merged_duplicates = stats.merged_duplicates,
            unresolved_packages = stats.unresolved_packages,
            "Normalized scan matches"
        );

        NormalizationResult {
            occurrences,
            summary,
            stats,
        }
    }

    fn normalize_match(
        &self,
        finding: &RawFinding,
        path_cache: &mut HashMap<String, BTreeSet<Vec<String>>>,
        stats: &mut NormalizationStats,
    ) -> Candidate {
        let selection = select_primary_id(finding.vulnerability_id.as_deref(), &finding.aliases);
        if selection.primary == UNKNOWN_ID {
            stats.unknown_ids += 1;
        }

        let package = resolve_package(self.graph, &finding.artifact);
        let paths = match package.component_ref.as_deref() {
            Some(component_ref) => path_cache
                .entry(component_ref.to_string())
                .or_insert_with(|| {
                    self.graph
                        .paths_to_target(component_ref, self.config.path_limit)
                        .into_iter()
                        .collect()
                })
                .clone(),
            None => {
                stats.unresolved_packages += 1;
                tracing::debug!(
                    id = %selection.primary,
                    package = %package.coordinate(),
                    "Artifact not found in SBOM, using scanner coordinates"
                );
                BTreeSet::new()
            }
        };

        let mut occurrence = Occurrence {
            match_key: Occurrence::compose_match_key(&selection.primary, &package),
            id: selection.primary,
            ids: selection.ids,
            severity: Severity::from_optional(finding.severity.as_deref()),
            cvss_max: CvssEntry::strongest(&finding.cvss).cloned(),
            fix: finding.fix.clone(),
            urls: finding.urls.iter().cloned().collect(),
            package,
            paths,
        };
        cap_paths(&mut occurrence, self.config.max_paths);
        Candidate::new(occurrence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ArtifactRef, Component, DependencyEdge, FixInfo, FixState, Sbom};

    fn make_graph() -> SbomGraphIndex {
        let mut sbom = Sbom::new();
        sbom.add_component(Component::new("app", "app").with_purl("pkg:maven/com.acme/app@1.0"));
        sbom.add_component(Component::new("lib", "vuln").with_purl("pkg:maven/org.lib/vuln@2.3"));
        sbom.add_edge(DependencyEdge::new("app", "lib"));
        SbomGraphIndex::build(&sbom)
    }

    fn make_finding(id: &str, aliases: &[&str], severity: &str, purl: &str) -> RawFinding {
        RawFinding {
            vulnerability_id: Some(id.to_string()),
            aliases: aliases.iter().map(ToString::to_string).collect(),
            severity: Some(severity.to_string()),
            artifact: ArtifactRef {
                purl: Some(purl.to_string()),
                ..ArtifactRef::default()
            },
            ..RawFinding::default()
        }
    }

    #[test]
    fn test_single_match_resolved_with_paths() {
        let graph = make_graph();
        let findings = vec![make_finding(
            "CVE-2024-1111",
            &["GHSA-aaaa-bbbb-cccc"],
            "High",
            "pkg:maven/org.lib/vuln@2.3",
        )];
        let result = Normalizer::new(&graph).normalize_findings(&findings);
        assert_eq!(result.occurrences.len(), 1);

        let occ = &result.occurrences[0];
        assert_eq!(occ.id, "GHSA-aaaa-bbbb-cccc");
        assert_eq!(occ.match_key, "GHSA-aaaa-bbbb-cccc::org.lib:vuln:2.3");
        assert_eq!(occ.severity, Severity::High);
        assert_eq!(occ.paths.len(), 1);
        assert!(occ.paths.contains(&vec![
            "com.acme:app:1.0".to_string(),
            "org.lib:vuln:2.3".to_string()
        ]));
        assert_eq!(result.summary.get(Severity::High), 1);
    }

    #[test]
    fn test_duplicates_merge_to_worse_severity() {
        let graph = make_graph();
        let mut first = make_finding("CVE-2024-1111", &[], "High", "pkg:maven/org.lib/vuln@2.3");
        first.urls = vec!["https://one".to_string()];
        let mut second =
            make_finding("CVE-2024-1111", &[], "Critical", "pkg:maven/org.lib/vuln@2.3");
        second.urls = vec!["https://two".to_string()];

        let result = Normalizer::new(&graph).normalize_findings(&[first, second]);
        assert_eq!(result.occurrences.len(), 1);
        assert_eq!(result.occurrences[0].severity, Severity::Critical);
        assert_eq!(result.occurrences[0].urls.len(), 2);
        assert_eq!(result.stats.merged_duplicates, 1);
        assert_eq!(result.summary.get(Severity::Critical), 1);
        assert_eq!(result.summary.get(Severity::High), 0);
    }

    #[test]
    fn test_unresolved_artifact_is_kept() {
        let graph = make_graph();
        let finding = RawFinding {
            vulnerability_id: Some("CVE-2024-2222".to_string()),
            severity: Some("negligible".to_string()),
            artifact: ArtifactRef {
                name: Some("zlib".to_string()),
                version: Some("1.2".to_string()),
                ..ArtifactRef::default()
            },
            ..RawFinding::default()
        };
        let result = Normalizer::new(&graph).normalize_findings(&[finding]);
        let occ = &result.occurrences[0];
        assert_eq!(occ.match_key, "CVE-2024-2222::unknown:zlib:1.2");
        assert_eq!(occ.severity, Severity::Low);
        assert!(occ.paths.is_empty());
        assert_eq!(result.stats.unresolved_packages, 1);
    }

    #[test]
    fn test_missing_id_becomes_unknown() {
        let graph = make_graph();
        let finding = RawFinding {
            severity: Some("whatever".to_string()),
            ..RawFinding::default()
        };
        let result = Normalizer::new(&graph).normalize_findings(&[finding]);
        assert_eq!(result.occurrences[0].id, UNKNOWN_ID);
        assert!(result.occurrences[0].ids.is_empty());
        assert_eq!(result.occurrences[0].severity, Severity::Unknown);
        assert_eq!(result.stats.unknown_ids, 1);
    }

    #[test]
    fn test_output_sorted_by_match_key() {
        let graph = make_graph();
        let findings = vec![
            make_finding("CVE-2024-9", &[], "Low", "pkg:maven/org.lib/vuln@2.3"),
            make_finding("CVE-2024-1", &[], "Low", "pkg:maven/org.lib/vuln@2.3"),
        ];
        let result = Normalizer::new(&graph).normalize_findings(&findings);
        let keys: Vec<_> = result.occurrences.iter().map(|o| o.match_key.as_str()).collect();
        assert_eq!(keys, ["CVE-2024-1::org.lib:vuln:2.3", "CVE-2024-9::org.lib:vuln:2.3"]);
    }

    #[test]
    fn test_order_independent_merge() {
        let graph = make_graph();
        let mut a = make_finding("CVE-1", &[], "Medium", "pkg:maven/org.lib/vuln@2.3");
        a.cvss = vec![CvssEntry::new(6.5)];
        a.fix = Some(FixInfo {
            state: FixState::Fixed,
            versions: vec!["2.4".to_string()],
        });
        let mut b = make_finding("CVE-1", &[], "High", "pkg:maven/org.lib/vuln@2.3");
        b.cvss = vec![CvssEntry::new(7.5)];
        // separate occurrence
        let c = make_finding("CVE-2", &[], "Low", "pkg:maven/org.lib/vuln@2.3");

        let normalizer = Normalizer::new(&graph);
        let forward = normalizer.normalize_findings(&[a.clone(), b.clone(), c.clone()]);
        let backward = normalizer.normalize_findings(&[c, b, a]);
        let keys = |r: &NormalizationResult| {
            r.occurrences.iter().map(|o| o.match_key.clone()).collect::<Vec<_>>()
        };
        assert_eq!(keys(&forward), keys(&backward));
        assert_eq!(forward.occurrences.len(), 2);
        assert_eq!(forward.occurrences[0].severity, Severity::High);
        assert_eq!(forward.occurrences[0].cvss_score(), Some(7.5));
        for (f, b) in forward.occurrences.iter().zip(&backward.occurrences) {
            assert_eq!(f.severity, b.severity);
            assert_eq!(f.cvss_max, b.cvss_max);
            assert_eq!(f.urls, b.urls);
            assert_eq!(f.paths, b.paths);
        }
    }
}
