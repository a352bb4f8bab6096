//! CycloneDX SBOM parser (JSON).
//!
//! Only the parts that feed the dependency graph are read: components
//! (including nested ones), the metadata component and the dependency list.

use crate::model::{Component, DependencyEdge, Sbom};
use crate::parsers::traits::{InputParser, ParseError};
use serde::Deserialize;

/// Parser for CycloneDX JSON documents
#[derive(Debug, Clone, Copy, Default)]
pub struct CycloneDxParser;

impl CycloneDxParser {
    pub const fn new() -> Self {
        Self
    }
}

impl InputParser for CycloneDxParser {
    type Output = Sbom;

    fn parse_str(&self, content: &str) -> Result<Sbom, ParseError> {
        let cdx: CycloneDxBom = serde_json::from_str(content)?;
        convert_bom(cdx)
    }

    fn format_name(&self) -> &str {
        "CycloneDX"
    }
}

fn convert_bom(cdx: CycloneDxBom) -> Result<Sbom, ParseError> {
    if let Some(format) = cdx.bom_format.as_deref()
        && !format.eq_ignore_ascii_case("CycloneDX")
    {
        return Err(ParseError::InvalidStructure(format!(
            "bomFormat is '{format}', expected 'CycloneDX'"
        )));
    }
    let components = cdx
        .components
        .ok_or_else(|| ParseError::missing_field("components", "CycloneDX SBOM"))?;

    let mut sbom = Sbom::new();
    let mut position = 0usize;

    if let Some(primary) = cdx.metadata.and_then(|m| m.component) {
        let handle = component_handle(&primary, position);
        position += 1;
        sbom.set_primary_component(handle.clone());
        add_component_tree(&mut sbom, primary, handle, &mut position);
    }

    for cdx_comp in components {
        let handle = component_handle(&cdx_comp, position);
        position += 1;
        add_component_tree(&mut sbom, cdx_comp, handle, &mut position);
    }

    for dep in cdx.dependencies.unwrap_or_default() {
        for child in dep.depends_on.unwrap_or_default() {
            sbom.add_edge(DependencyEdge::new(dep.ref_field.clone(), child));
        }
    }

    tracing::debug!(
        components = sbom.component_count(),
        edges = sbom.edge_count(),
        "Parsed CycloneDX SBOM"
    );
    Ok(sbom)
}

/// Add a component and, depth-first, its nested components.
fn add_component_tree(sbom: &mut Sbom, cdx_comp: CdxComponent, handle: String, position: &mut usize) {
    let nested = cdx_comp.components.unwrap_or_default();
    let mut component = Component::new(handle, cdx_comp.name.unwrap_or_default());
    component.purl = cdx_comp.purl.filter(|p| !p.is_empty());
    component.version = cdx_comp.version.filter(|v| !v.is_empty());
    component.group = cdx_comp.group.filter(|g| !g.is_empty());
    sbom.add_component(component);

    for child in nested {
        let child_handle = component_handle(&child, *position);
        *position += 1;
        add_component_tree(sbom, child, child_handle, position);
    }
}

/// Graph handle of a component: `bom-ref`, else purl, else name, else a
/// positional placeholder.
fn component_handle(cdx_comp: &CdxComponent, position: usize) -> String {
    [&cdx_comp.bom_ref, &cdx_comp.purl, &cdx_comp.name]
        .into_iter()
        .flatten()
        .find(|s| !s.is_empty())
        .cloned()
        .unwrap_or_else(|| format!("component-{position}"))
}

// CycloneDX JSON structures for deserialization

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CycloneDxBom {
    bom_format: Option<String>,
    metadata: Option<CdxMetadata>,
    components: Option<Vec<CdxComponent>>,
    dependencies: Option<Vec<CdxDependency>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CdxMetadata {
    component: Option<CdxComponent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CdxComponent {
    #[serde(alias = "bom-ref")]
    bom_ref: Option<String>,
    name: Option<String>,
    version: Option<String>,
    group: Option<String>,
    purl: Option<String>,
    components: Option<Vec<CdxComponent>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CdxDependency {
    #[serde(rename = "ref")]
    ref_field: String,
    depends_on: Option<Vec<String>>,
}
