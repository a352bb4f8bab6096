//! Output document types.
//!
//! Field names, severity names and state names are the wire contract read
//! by downstream renderers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::aggregate::AggregateResult;
use crate::diff::{DiffItem, DiffResult};
use crate::model::{Occurrence, RevisionInfo, SeverityCounts, SeverityStateMatrix};
use crate::normalize::{NormalizationResult, NormalizationStats};

/// Version of the document schema written by this build.
pub const SCHEMA_VERSION: &str = "1.0";

/// Producer of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
}

impl ToolInfo {
    #[must_use]
    pub fn current() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl Default for ToolInfo {
    fn default() -> Self {
        Self::current()
    }
}

fn schema_version() -> String {
    SCHEMA_VERSION.to_string()
}

/// Per-revision normalized document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedDocument {
    #[serde(default = "schema_version")]
    pub schema_version: String,
    pub generated_at: DateTime<Utc>,
    #[serde(default)]
    pub tool: ToolInfo,
    pub revision: RevisionInfo,
    #[serde(default)]
    pub summary: SeverityCounts,
    #[serde(default)]
    pub stats: NormalizationStats,
    pub occurrences: Vec<Occurrence>,
}

impl NormalizedDocument {
    #[must_use]
    pub fn new(revision: RevisionInfo, result: NormalizationResult) -> Self {
        Self {
            schema_version: schema_version(),
            generated_at: Utc::now(),
            tool: ToolInfo::current(),
            revision,
            summary: result.summary,
            stats: result.stats,
            occurrences: result.occurrences,
        }
    }
}

/// Diff document over two revisions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffDocument {
    #[serde(default = "schema_version")]
    pub schema_version: String,
    pub generated_at: DateTime<Utc>,
    #[serde(default)]
    pub tool: ToolInfo,
    pub base: RevisionInfo,
    pub head: RevisionInfo,
    #[serde(default)]
    pub summary: SeverityStateMatrix,
    pub items: Vec<DiffItem>,
}

impl DiffDocument {
    #[must_use]
    pub fn new(base: RevisionInfo, head: RevisionInfo, result: DiffResult) -> Self {
        Self {
            schema_version: schema_version(),
            generated_at: Utc::now(),
            tool: ToolInfo::current(),
            base,
            head,
            summary: result.summary,
            items: result.items,
        }
    }
}

/// Aggregate document derived from a diff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateDocument {
    #[serde(default = "schema_version")]
    pub schema_version: String,
    pub generated_at: DateTime<Utc>,
    #[serde(default)]
    pub tool: ToolInfo,
    pub base: RevisionInfo,
    pub head: RevisionInfo,
    #[serde(flatten)]
    pub aggregate: AggregateResult,
}

impl AggregateDocument {
    #[must_use]
    pub fn new(base: RevisionInfo, head: RevisionInfo, aggregate: AggregateResult) -> Self {
        Self {
            schema_version: schema_version(),
            generated_at: Utc::now(),
            tool: ToolInfo::current(),
            base,
            head,
            aggregate,
        }
    }
}
