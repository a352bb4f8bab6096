//! Normalization stage: graph build plus finding normalization for one
//! revision.

use super::parse::RevisionInputs;
use crate::config::AppConfig;
use crate::graph::SbomGraphIndex;
use crate::normalize::Normalizer;
use crate::reports::NormalizedDocument;

/// Build the graph index for a revision and normalize its scan result.
#[must_use]
pub fn normalize_revision(inputs: &RevisionInputs, config: &AppConfig) -> NormalizedDocument {
    let quiet = config.behavior.quiet;
    let graph = SbomGraphIndex::build_with_config(&inputs.sbom, config.graph_config());
    let result = Normalizer::new(&graph)
        .with_config(config.normalizer_config())
        .normalize(&inputs.scan);

    if !quiet {
        tracing::info!(
            revision = %inputs.revision.name,
            "Normalized {} matches into {} occurrences ({} unresolved packages)",
            result.stats.raw_matches,
            result.occurrences.len(),
            result.stats.unresolved_packages
        );
    }

    NormalizedDocument::new(inputs.revision.clone(), result)
}
