//! SBOM dependency graph index.
//!
//! Answers "how is component X reachable from a root?" for one revision:
//! purl/handle resolution plus bounded backward path enumeration. Paths are
//! made of display labels (see [`component_label`]) rather than handles.

mod index;
mod labels;

pub use index::{
    DEFAULT_MAX_DEPTH, DEFAULT_MAX_EXPANSIONS, GraphConfig, PathQuery, Resolved, SbomGraphIndex,
};
pub use labels::component_label;
