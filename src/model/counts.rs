//! Zero-filled count tables keyed by severity and diff state.
//!
//! These are explicit structs rather than maps so every key is always
//! present in the serialized output, including zero cells.

use super::{DiffState, Severity};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Count of occurrences per severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SeverityCounts {
    #[serde(rename = "CRITICAL")]
    pub critical: usize,
    #[serde(rename = "HIGH")]
    pub high: usize,
    #[serde(rename = "MEDIUM")]
    pub medium: usize,
    #[serde(rename = "LOW")]
    pub low: usize,
    #[serde(rename = "UNKNOWN")]
    pub unknown: usize,
}

impl SeverityCounts {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count severities from an iterator.
    pub fn tally<I: IntoIterator<Item = Severity>>(severities: I) -> Self {
        let mut counts = Self::default();
        for severity in severities {
            counts.increment(severity);
        }
        counts
    }

    #[must_use]
    pub const fn get(&self, severity: Severity) -> usize {
        match severity {
            Severity::Critical => self.critical,
            Severity::High => self.high,
            Severity::Medium => self.medium,
            Severity::Low => self.low,
            Severity::Unknown => self.unknown,
        }
    }

    pub fn increment(&mut self, severity: Severity) {
        *self.slot(severity) += 1;
    }

    fn slot(&mut self, severity: Severity) -> &mut usize {
        match severity {
            Severity::Critical => &mut self.critical,
            Severity::High => &mut self.high,
            Severity::Medium => &mut self.medium,
            Severity::Low => &mut self.low,
            Severity::Unknown => &mut self.unknown,
        }
    }

    #[must_use]
    pub const fn total(&self) -> usize {
        self.critical + self.high + self.medium + self.low + self.unknown
    }
}

/// Count of diff items per state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct StateCounts {
    #[serde(rename = "NEW")]
    pub new: usize,
    #[serde(rename = "REMOVED")]
    pub removed: usize,
    #[serde(rename = "UNCHANGED")]
    pub unchanged: usize,
}

impl StateCounts {
    #[must_use]
    pub const fn get(&self, state: DiffState) -> usize {
        match state {
            DiffState::New => self.new,
            DiffState::Removed => self.removed,
            DiffState::Unchanged => self.unchanged,
        }
    }

    pub fn increment(&mut self, state: DiffState) {
        match state {
            DiffState::New => self.new += 1,
            DiffState::Removed => self.removed += 1,
            DiffState::Unchanged => self.unchanged += 1,
        }
    }

    #[must_use]
    pub const fn total(&self) -> usize {
        self.new + self.removed + self.unchanged
    }
}

/// Severity × state matrix with per-state totals.
///
/// All 15 cells are always present; `totals` is kept in step by
/// [`SeverityStateMatrix::record`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SeverityStateMatrix {
    pub by_severity: SeverityRows,
    pub totals: StateCounts,
}

/// One [`StateCounts`] row per severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SeverityRows {
    #[serde(rename = "CRITICAL")]
    pub critical: StateCounts,
    #[serde(rename = "HIGH")]
    pub high: StateCounts,
    #[serde(rename = "MEDIUM")]
    pub medium: StateCounts,
    #[serde(rename = "LOW")]
    pub low: StateCounts,
    #[serde(rename = "UNKNOWN")]
    pub unknown: StateCounts,
}

impl SeverityRows {
    #[must_use]
    pub const fn row(&self, severity: Severity) -> &StateCounts {
        match severity {
            Severity::Critical => &self.critical,
            Severity::High => &self.high,
            Severity::Medium => &self.medium,
            Severity::Low => &self.low,
            Severity::Unknown => &self.unknown,
        }
    }

    fn row_mut(&mut self, severity: Severity) -> &mut StateCounts {
        match severity {
            Severity::Critical => &mut self.critical,
            Severity::High => &mut self.high,
            Severity::Medium => &mut self.medium,
            Severity::Low => &mut self.low,
            Severity::Unknown => &mut self.unknown,
        }
    }
}

impl SeverityStateMatrix {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one item in the matrix.
    pub fn record(&mut self, severity: Severity, state: DiffState) {
        self.by_severity.row_mut(severity).increment(state);
        self.totals.increment(state);
    }

    /// Count for a single cell.
    #[must_use]
    pub const fn cell(&self, severity: Severity, state: DiffState) -> usize {
        self.by_severity.row(severity).get(state)
    }

    /// Total number of recorded items.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.totals.total()
    }

    /// Number of non-zero cells.
    #[must_use]
    pub fn populated_cells(&self) -> usize {
        Severity::ALL
            .iter()
            .flat_map(|s| DiffState::ALL.iter().map(move |st| self.cell(*s, *st)))
            .filter(|&n| n > 0)
            .count()
    }
}
