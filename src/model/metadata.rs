//! Revision metadata carried into every output document.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Describes one compared revision.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RevisionInfo {
    /// Display name ("base", "head", a branch name, ...)
    pub name: String,
    /// Git ref the revision was resolved from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git_ref: Option<String>,
    /// Commit id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,
    /// Path of the SBOM document this revision was read from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sbom_source: Option<String>,
    /// Path of the scan result document this revision was read from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scan_source: Option<String>,
    /// Component count of the SBOM
    #[serde(default)]
    pub component_count: usize,
    /// Raw match count of the scan result
    #[serde(default)]
    pub raw_match_count: usize,
}

impl RevisionInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_git_ref(mut self, git_ref: Option<String>) -> Self {
        self.git_ref = git_ref;
        self
    }

    #[must_use]
    pub fn with_commit(mut self, commit: Option<String>) -> Self {
        self.commit = commit;
        self
    }
}
