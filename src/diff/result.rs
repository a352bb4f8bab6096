//! Diff result types.

use serde::{Deserialize, Serialize};

use crate::model::{DiffState, Occurrence, Severity, SeverityStateMatrix, Side};

/// One classified occurrence.
///
/// Serializes as the occurrence's own fields plus `state` and
/// `observed_in`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffItem {
    #[serde(flatten)]
    pub occurrence: Occurrence,
    pub state: DiffState,
    /// Revisions the occurrence was observed on
    pub observed_in: Vec<Side>,
}

impl DiffItem {
    #[must_use]
    pub fn new(occurrence: Occurrence, state: DiffState) -> Self {
        let observed_in = match state {
            DiffState::New => vec![Side::Head],
            DiffState::Removed => vec![Side::Base],
            DiffState::Unchanged => vec![Side::Base, Side::Head],
        };
        Self {
            occurrence,
            state,
            observed_in,
        }
    }

    #[must_use]
    pub fn match_key(&self) -> &str {
        &self.occurrence.match_key
    }

    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.occurrence.severity
    }
}

/// Output of the diff engine: every `match_key` of base ∪ head, classified.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiffResult {
    /// Severity × state counts over `items`
    pub summary: SeverityStateMatrix,
    /// Items in presentation order
    pub items: Vec<DiffItem>,
}

impl DiffResult {
    /// Build a result from items, computing the summary and sorting.
    #[must_use]
    pub fn from_items(items: Vec<DiffItem>) -> Self {
        let mut result = Self {
            summary: summarize(&items),
            items,
        };
        result.sort_for_presentation();
        result
    }

    /// Sort items by severity (most severe first), then
    /// `group:artifact:version`, then id.
    pub fn sort_for_presentation(&mut self) {
        self.items
            .sort_by(|a, b| a.occurrence.presentation_cmp(&b.occurrence));
    }

    /// Items in one state, in presentation order.
    pub fn items_in(&self, state: DiffState) -> impl Iterator<Item = &DiffItem> {
        self.items.iter().filter(move |i| i.state == state)
    }

    pub fn new_items(&self) -> impl Iterator<Item = &DiffItem> {
        self.items_in(DiffState::New)
    }

    pub fn removed_items(&self) -> impl Iterator<Item = &DiffItem> {
        self.items_in(DiffState::Removed)
    }

    pub fn unchanged_items(&self) -> impl Iterator<Item = &DiffItem> {
        self.items_in(DiffState::Unchanged)
    }

    /// Whether any NEW item is at or above `threshold`.
    #[must_use]
    pub fn has_new_at_or_above(&self, threshold: Severity) -> bool {
        self.new_items().any(|i| i.severity().is_at_least(threshold))
    }

    /// Whether anything was introduced or removed.
    #[must_use]
    pub const fn has_changes(&self) -> bool {
        self.summary.totals.new > 0 || self.summary.totals.removed > 0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Severity × state matrix of a list of items.
#[must_use]
pub fn summarize(items: &[DiffItem]) -> SeverityStateMatrix {
    let mut matrix = SeverityStateMatrix::new();
    for item in items {
        matrix.record(item.severity(), item.state);
    }
    matrix
}
