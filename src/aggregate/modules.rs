//! Module attribution from dependency path structure.
//!
//! For a path `root -> ... -> target`, the root's group id names the
//! project. The last later hop in that same group is the build module that
//! pulled the target in; the hops after it are the tail.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::model::MavenCoordinates;

/// Separator used when rendering a tail as one string.
pub const TAIL_SEPARATOR: &str = " -> ";

/// Group and artifact parsed from a path hop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hop {
    pub group: String,
    pub artifact: String,
}

impl Hop {
    /// Parse `group:artifact[:version...]` or `pkg:maven/group/artifact@version`.
    ///
    /// Other purl types and plain names yield `None`.
    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        let label = label.trim();
        if label.starts_with("pkg:") {
            let coords = MavenCoordinates::from_purl(label)?;
            return Some(Self {
                group: coords.group,
                artifact: coords.artifact,
            });
        }

        let mut parts = label.split(':');
        let group = parts.next().filter(|g| !g.is_empty())?;
        let artifact = parts.next().filter(|a| !a.is_empty())?;
        Some(Self {
            group: group.to_string(),
            artifact: artifact.to_string(),
        })
    }
}

/// Module and tail of a single path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathAttribution {
    pub module: String,
    /// Hops after the module hop, module excluded
    pub tail: Vec<String>,
}

impl PathAttribution {
    /// Tail rendered with [`TAIL_SEPARATOR`].
    #[must_use]
    pub fn tail_string(&self) -> String {
        self.tail.join(TAIL_SEPARATOR)
    }
}

/// Attribute one path to a module.
///
/// Returns `None` when the root hop has no parseable group or no later hop
/// shares it; such a path contributes no module.
#[must_use]
pub fn attribute_path(path: &[String]) -> Option<PathAttribution> {
    let (first, rest) = path.split_first()?;
    let root_group = Hop::parse(first)?.group;

    let (offset, hop) = rest
        .iter()
        .enumerate()
        .rev()
        .filter_map(|(i, label)| Hop::parse(label).map(|hop| (i, hop)))
        .find(|(_, hop)| hop.group == root_group)?;

    Some(PathAttribution {
        module: hop.artifact,
        tail: rest[offset + 1..].to_vec(),
    })
}

/// Attribution of an occurrence aggregated over all of its paths.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleAttribution {
    /// Distinct module names
    pub modules: BTreeSet<String>,
    /// Module -> distinct tails
    pub module_paths: BTreeMap<String, BTreeSet<String>>,
}

impl ModuleAttribution {
    /// Attribute every path and merge the results.
    #[must_use]
    pub fn from_paths<'a, I>(paths: I) -> Self
    where
        I: IntoIterator<Item = &'a Vec<String>>,
    {
        let mut attribution = Self::default();
        for found in paths.into_iter().filter_map(|p| attribute_path(p)) {
            attribution
                .module_paths
                .entry(found.module.clone())
                .or_default()
                .insert(found.tail_string());
            attribution.modules.insert(found.module);
        }
        attribution
    }

    /// More than one module pulls in the vulnerable component.
    #[must_use]
    pub fn is_multi_module(&self) -> bool {
        self.modules.len() > 1
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}
