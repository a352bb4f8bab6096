//! Per-revision SBOM graph index.

use std::collections::{HashMap, HashSet, VecDeque};

use indexmap::IndexMap;

use super::labels::component_label;
use crate::model::{Component, Sbom};

/// Default maximum search depth for backward path enumeration.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Default number of parent expansions one path query may perform.
pub const DEFAULT_MAX_EXPANSIONS: usize = 100_000;

/// Configuration for graph path queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphConfig {
    /// Maximum number of hops walked backward from a target
    pub max_depth: usize,
    /// Parent expansions allowed per query, whatever was found so far
    pub max_expansions: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_expansions: DEFAULT_MAX_EXPANSIONS,
        }
    }
}

/// Outcome of one bounded path query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathQuery {
    /// Distinct root-to-target label chains
    pub paths: Vec<Vec<String>>,
    /// Parent expansions performed
    pub expansions: usize,
    /// Whether the limit, depth or expansion bound cut the search short
    pub truncated: bool,
    /// Whether the expansion budget ran out
    pub exhausted: bool,
}

/// Result of [`SbomGraphIndex::resolve`].
#[derive(Debug, Clone, Copy)]
pub struct Resolved<'a> {
    pub component: &'a Component,
    /// Canonical handle of the resolved component
    pub component_ref: &'a str,
}

/// In-memory index over one SBOM's components and dependency edges.
///
/// Parent lists are stably sorted by `(label, ref)` when the index is built,
/// so every query that walks them is reproducible.
#[derive(Debug, Clone, Default)]
pub struct SbomGraphIndex {
    /// `component_ref` -> component, in document order
    by_ref: IndexMap<String, Component>,
    /// `purl` -> `component_ref` (first component wins)
    by_purl: HashMap<String, String>,
    /// `parent_ref` -> children
    children_of: HashMap<String, Vec<String>>,
    /// `child_ref` -> parents, sorted by (label, ref)
    parents_of: HashMap<String, Vec<String>>,
    /// Components with no incoming edges in document order, then the
    /// primary component if it has parents
    roots: Vec<String>,
    /// Handles that terminate a backward walk even when they have parents
    flagged_roots: HashSet<String>,
    /// Handles with at least one root among their ancestors, roots included
    reaches_root: HashSet<String>,
    /// Display label for every known handle, dangling ones included
    labels: HashMap<String, String>,
    config: GraphConfig,
}

impl SbomGraphIndex {
    /// Build the index with default configuration.
    #[must_use]
    pub fn build(sbom: &Sbom) -> Self {
        Self::build_with_config(sbom, GraphConfig::default())
    }

    /// Build the index.
    ///
    /// Edges naming handles that are not components are kept as dangling
    /// nodes; duplicate edges are ignored.
    #[must_use]
    pub fn build_with_config(sbom: &Sbom, config: GraphConfig) -> Self {
        let mut by_ref = IndexMap::with_capacity(sbom.component_count());
        let mut by_purl = HashMap::new();
        let mut labels = HashMap::with_capacity(sbom.component_count());

        for (component_ref, component) in &sbom.components {
            if let Some(purl) = component.purl.as_deref().filter(|p| !p.is_empty()) {
                by_purl
                    .entry(purl.to_string())
                    .or_insert_with(|| component_ref.clone());
            }
            labels.insert(component_ref.clone(), component_label(component));
            by_ref.insert(component_ref.clone(), component.clone());
        }

        let mut children_of: HashMap<String, Vec<String>> = HashMap::new();
        let mut parents_of: HashMap<String, Vec<String>> = HashMap::new();
        let mut seen_edges: HashSet<(&str, &str)> = HashSet::with_capacity(sbom.edge_count());
        let mut dangling = 0usize;

        for edge in &sbom.edges {
            if !seen_edges.insert((edge.from.as_str(), edge.to.as_str())) {
                continue;
            }
            for handle in [&edge.from, &edge.to] {
                if !labels.contains_key(handle) {
                    dangling += 1;
                    labels.insert(handle.clone(), handle.clone());
                }
            }
            children_of
                .entry(edge.from.clone())
                .or_default()
                .push(edge.to.clone());
            parents_of
                .entry(edge.to.clone())
                .or_default()
                .push(edge.from.clone());
        }

        for parents in parents_of.values_mut() {
            parents.sort_by(|a, b| labels.get(a).cmp(&labels.get(b)).then_with(|| a.cmp(b)));
        }

        let mut roots: Vec<String> = by_ref
            .keys()
            .filter(|r| parents_of.get(*r).is_none_or(Vec::is_empty))
            .cloned()
            .collect();

        let mut flagged_roots = HashSet::new();
        if let Some(primary) = sbom.primary_component_ref.as_ref() {
            if !roots.contains(primary) {
                roots.push(primary.clone());
            }
            flagged_roots.insert(primary.clone());
        }

        if dangling > 0 {
            tracing::debug!(dangling, "Dependency edges reference unknown component handles");
        }

        let reaches_root = root_closure(&labels, &children_of, &parents_of, &flagged_roots);

        Self {
            by_ref,
            by_purl,
            children_of,
            parents_of,
            roots,
            flagged_roots,
            reaches_root,
            labels,
            config,
        }
    }

    /// Resolve a component, preferring an exact purl match over a handle match.
    ///
    /// Returns `None` when neither resolves; this is not an error.
    #[must_use]
    pub fn resolve(&self, purl: Option<&str>, component_ref: Option<&str>) -> Option<Resolved<'_>> {
        let by_purl = purl
            .filter(|p| !p.is_empty())
            .and_then(|p| self.by_purl.get(p))
            .and_then(|r| self.by_ref.get_key_value(r.as_str()));
        let hit = by_purl.or_else(|| component_ref.and_then(|r| self.by_ref.get_key_value(r)));
        hit.map(|(component_ref, component)| Resolved {
            component,
            component_ref,
        })
    }

    /// Enumerate up to `limit` distinct root-to-target label chains.
    ///
    /// Walks `parents_of` backward from `target`. A branch ends at a node
    /// with no parents or at a flagged root. A target that is itself
    /// parentless (or flagged) yields the single self path. Cycles are cut by
    /// skipping nodes already on the current branch and by the configured
    /// maximum depth. See [`Self::search_paths`] for the work bound.
    #[must_use]
    pub fn paths_to_target(&self, target: &str, limit: usize) -> Vec<Vec<String>> {
        self.search_paths(target, limit).paths
    }

    /// Bounded path query reporting how much work it did.
    ///
    /// Parents that cannot reach any root are never entered, and the query
    /// stops after `max_expansions` parent expansions even when fewer than
    /// `limit` paths were found.
    #[must_use]
    pub fn search_paths(&self, target: &str, limit: usize) -> PathQuery {
        if limit == 0 {
            return PathQuery::default();
        }
        if self.is_root(target) {
            return PathQuery {
                paths: vec![vec![self.label(target).to_string()]],
                ..PathQuery::default()
            };
        }
        if !self.reaches_root.contains(target) {
            return PathQuery::default();
        }

        let mut search = PathSearch {
            index: self,
            limit,
            found: Vec::new(),
            seen: HashSet::new(),
            branch: vec![target],
            on_branch: HashSet::from([target]),
            expansions: 0,
            truncated: false,
            exhausted: false,
        };
        search.walk(target);

        if search.exhausted {
            tracing::warn!(
                component = %target,
                found = search.found.len(),
                max_expansions = self.config.max_expansions,
                "Path enumeration ran out of its expansion budget"
            );
        } else if search.truncated {
            tracing::debug!(
                component = %target,
                limit,
                max_depth = self.config.max_depth,
                "Path enumeration stopped at its bound"
            );
        }
        PathQuery {
            paths: search.found,
            expansions: search.expansions,
            truncated: search.truncated,
            exhausted: search.exhausted,
        }
    }

    /// Display label of a handle. Unknown handles label as themselves.
    #[must_use]
    pub fn label<'a>(&'a self, component_ref: &'a str) -> &'a str {
        self.labels
            .get(component_ref)
            .map_or(component_ref, String::as_str)
    }

    /// Sorted parent handles of a node.
    #[must_use]
    pub fn parents(&self, component_ref: &str) -> &[String] {
        self.parents_of
            .get(component_ref)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Child handles of a node, in edge order.
    #[must_use]
    pub fn children(&self, component_ref: &str) -> &[String] {
        self.children_of
            .get(component_ref)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Parentless components plus the flagged primary component.
    #[must_use]
    pub fn roots(&self) -> &[String] {
        &self.roots
    }

    /// Whether some root can be reached from a handle by following parents.
    #[must_use]
    pub fn reaches_root(&self, component_ref: &str) -> bool {
        self.reaches_root.contains(component_ref) || self.is_root(component_ref)
    }

    /// Whether a handle is a root, either parentless or flagged.
    #[must_use]
    pub fn is_root(&self, component_ref: &str) -> bool {
        self.flagged_roots.contains(component_ref) || self.parents(component_ref).is_empty()
    }

    #[must_use]
    pub fn get_component(&self, component_ref: &str) -> Option<&Component> {
        self.by_ref.get(component_ref)
    }

    #[must_use]
    pub fn component_count(&self) -> usize {
        self.by_ref.len()
    }

    #[must_use]
    pub const fn config(&self) -> &GraphConfig {
        &self.config
    }
}

/// Every handle from which a backward walk can end at a root.
///
/// Seeds with the roots and follows child edges forward once, so the cost is
/// linear in the edge count.
fn root_closure(
    labels: &HashMap<String, String>,
    children_of: &HashMap<String, Vec<String>>,
    parents_of: &HashMap<String, Vec<String>>,
    flagged_roots: &HashSet<String>,
) -> HashSet<String> {
    let mut reached: HashSet<String> = labels
        .keys()
        .filter(|h| parents_of.get(*h).is_none_or(Vec::is_empty))
        .chain(flagged_roots)
        .cloned()
        .collect();
    let mut queue: VecDeque<String> = reached.iter().cloned().collect();

    while let Some(node) = queue.pop_front() {
        for child in children_of.get(&node).map(Vec::as_slice).unwrap_or(&[]) {
            if reached.insert(child.clone()) {
                queue.push_back(child.clone());
            }
        }
    }
    reached
}

/// Mutable state of one backward DFS.
struct PathSearch<'a> {
    index: &'a SbomGraphIndex,
    limit: usize,
    found: Vec<Vec<String>>,
    seen: HashSet<Vec<String>>,
    /// Current chain, target first
    branch: Vec<&'a str>,
    on_branch: HashSet<&'a str>,
    expansions: usize,
    truncated: bool,
    exhausted: bool,
}

impl<'a> PathSearch<'a> {
    fn walk(&mut self, node: &'a str) {
        let depth = self.branch.len() - 1;
        if depth >= self.index.config.max_depth {
            self.truncated = true;
            return;
        }

        let index = self.index;
        for parent in index.parents(node) {
            if self.exhausted {
                return;
            }
            if self.found.len() >= self.limit {
                self.truncated = true;
                return;
            }
            let parent = parent.as_str();
            if self.on_branch.contains(parent) || !index.reaches_root.contains(parent) {
                continue;
            }
            if self.expansions >= index.config.max_expansions {
                self.exhausted = true;
                self.truncated = true;
                return;
            }
            self.expansions += 1;

            self.branch.push(parent);
            self.on_branch.insert(parent);

            if index.is_root(parent) {
                self.emit();
            } else {
                self.walk(parent);
            }

            self.on_branch.remove(parent);
            self.branch.pop();
        }
    }

    fn emit(&mut self) {
        let chain: Vec<String> = self
            .branch
            .iter()
            .rev()
            .map(|r| self.index.label(r).to_string())
            .collect();
        if self.seen.insert(chain.clone()) {
            self.found.push(chain);
        }
    }
}
