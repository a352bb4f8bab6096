//! Package coordinate resolution for scanner artifacts.

use crate::graph::SbomGraphIndex;
use crate::model::{ArtifactRef, Component, PackageCoords, PurlParts, UNKNOWN_GROUP};

/// Placeholder for artifact name or version when neither the SBOM nor the
/// scanner supplied one.
pub const UNKNOWN_FIELD: &str = "unknown";

/// Resolve an artifact against the SBOM graph.
///
/// Resolution tries the artifact purl, then its id as a component handle.
/// Unresolved artifacts get coordinates synthesized from their own purl or
/// name/version fields, with `component_ref` left empty.
#[must_use]
pub fn resolve_package(graph: &SbomGraphIndex, artifact: &ArtifactRef) -> PackageCoords {
    match graph.resolve(artifact.purl.as_deref(), artifact.id.as_deref()) {
        Some(hit) => from_component(hit.component, hit.component_ref, artifact),
        None => synthesize(artifact),
    }
}

fn from_component(component: &Component, component_ref: &str, artifact: &ArtifactRef) -> PackageCoords {
    let purl = component.purl.clone().or_else(|| artifact.purl.clone());
    let parts = purl.as_deref().and_then(PurlParts::parse);

    let group = parts
        .as_ref()
        .and_then(|p| p.namespace.clone())
        .or_else(|| component.group.clone());
    let name = parts
        .as_ref()
        .map(|p| p.name.clone())
        .or_else(|| Some(component.name.clone()));
    let version = parts
        .as_ref()
        .and_then(|p| p.version.clone())
        .or_else(|| component.version.clone())
        .or_else(|| artifact.version.clone());

    PackageCoords {
        group: non_empty_or(group, UNKNOWN_GROUP),
        artifact: non_empty_or(name, UNKNOWN_FIELD),
        version: non_empty_or(version, UNKNOWN_FIELD),
        purl,
        component_ref: Some(component_ref.to_string()),
    }
}

fn synthesize(artifact: &ArtifactRef) -> PackageCoords {
    let parts = artifact.purl.as_deref().and_then(PurlParts::parse);

    let (group, name, version) = match parts {
        Some(p) => (
            p.namespace,
            Some(p.name),
            p.version.or_else(|| artifact.version.clone()),
        ),
        None => (None, artifact.name.clone(), artifact.version.clone()),
    };

    PackageCoords {
        group: non_empty_or(group, UNKNOWN_GROUP),
        artifact: non_empty_or(name, UNKNOWN_FIELD),
        version: non_empty_or(version, UNKNOWN_FIELD),
        purl: artifact.purl.clone(),
        component_ref: None,
    }
}

fn non_empty_or(value: Option<String>, fallback: &str) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}
