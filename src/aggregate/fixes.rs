//! Fix-availability rollups.

use serde::{Deserialize, Serialize};

use crate::diff::DiffItem;
use crate::model::{DiffState, SeverityCounts};

/// Occurrences split by whether a fixed-in version is known.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixCounts {
    pub with_fix: SeverityCounts,
    pub without_fix: SeverityCounts,
}

impl FixCounts {
    fn record(&mut self, item: &DiffItem) {
        if item.occurrence.has_fix() {
            self.with_fix.increment(item.severity());
        } else {
            self.without_fix.increment(item.severity());
        }
    }

    #[must_use]
    pub const fn total(&self) -> usize {
        self.with_fix.total() + self.without_fix.total()
    }
}

/// Fix availability per visibility scope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixAvailability {
    /// NEW ∪ UNCHANGED
    pub head: FixCounts,
    /// REMOVED ∪ UNCHANGED
    pub base: FixCounts,
    /// NEW only
    pub new_only: FixCounts,
}

impl FixAvailability {
    #[must_use]
    pub fn compute(items: &[DiffItem]) -> Self {
        let mut rollup = Self::default();
        for item in items {
            if item.state.in_head() {
                rollup.head.record(item);
            }
            if item.state.in_base() {
                rollup.base.record(item);
            }
            if item.state == DiffState::New {
                rollup.new_only.record(item);
            }
        }
        rollup
    }
}
