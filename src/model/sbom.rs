//! SBOM component and dependency structures.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Parsed SBOM for one revision: the component inventory plus its static
/// dependency edges.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Sbom {
    /// Components indexed by their graph-local handle (`bom-ref`)
    pub components: IndexMap<String, Component>,
    /// Dependency edges (`from` depends on `to`)
    pub edges: Vec<DependencyEdge>,
    /// Handle of the component the SBOM describes (CycloneDX `metadata.component`)
    pub primary_component_ref: Option<String>,
}

impl Sbom {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a component.
    ///
    /// Returns `true` if a component with the same handle was already
    /// present; the first one is kept.
    pub fn add_component(&mut self, component: Component) -> bool {
        if self.components.contains_key(&component.component_ref) {
            tracing::debug!(
                component_ref = %component.component_ref,
                "Duplicate component handle, keeping first occurrence"
            );
            return true;
        }
        self.components
            .insert(component.component_ref.clone(), component);
        false
    }

    /// Add a dependency edge.
    pub fn add_edge(&mut self, edge: DependencyEdge) {
        self.edges.push(edge);
    }

    /// Get a component by handle.
    #[must_use]
    pub fn get_component(&self, component_ref: &str) -> Option<&Component> {
        self.components.get(component_ref)
    }

    #[must_use]
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Set the primary component by handle.
    pub fn set_primary_component(&mut self, component_ref: impl Into<String>) {
        self.primary_component_ref = Some(component_ref.into());
    }
}

/// A single SBOM component. Immutable once the SBOM is parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    /// Graph-local handle
    pub component_ref: String,
    /// Package URL
    pub purl: Option<String>,
    /// Component name
    pub name: String,
    /// Component version
    pub version: Option<String>,
    /// Group / namespace
    pub group: Option<String>,
}

impl Component {
    /// Create a component with only a handle and a name.
    pub fn new(component_ref: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            component_ref: component_ref.into(),
            purl: None,
            name: name.into(),
            version: None,
            group: None,
        }
    }

    #[must_use]
    pub fn with_purl(mut self, purl: impl Into<String>) -> Self {
        self.purl = Some(purl.into());
        self
    }

    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }
}

/// Directed dependency edge between two component handles.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DependencyEdge {
    /// Parent (the component declaring the dependency)
    pub from: String,
    /// Child (the dependency)
    pub to: String,
}

impl DependencyEdge {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}
