//! Severity-weighted risk KPIs.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::diff::DiffItem;
use crate::model::{DiffState, Severity};

/// Weight of one occurrence per severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct RiskWeights {
    pub critical: u32,
    pub high: u32,
    pub medium: u32,
    pub low: u32,
    pub unknown: u32,
}

impl Default for RiskWeights {
    fn default() -> Self {
        Self {
            critical: 5,
            high: 3,
            medium: 2,
            low: 1,
            unknown: 0,
        }
    }
}

impl RiskWeights {
    #[must_use]
    pub fn weight(&self, severity: Severity) -> i64 {
        let w = match severity {
            Severity::Critical => self.critical,
            Severity::High => self.high,
            Severity::Medium => self.medium,
            Severity::Low => self.low,
            Severity::Unknown => self.unknown,
        };
        i64::from(w)
    }

    /// Weighted sum of a set of severities.
    pub fn weighted<I: IntoIterator<Item = Severity>>(&self, severities: I) -> i64 {
        severities.into_iter().map(|s| self.weight(s)).sum()
    }
}

/// Risk KPIs over one diff.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskKpis {
    /// Weighted sum over NEW
    pub new_weighted: i64,
    /// Weighted sum over REMOVED
    pub removed_weighted: i64,
    /// `new_weighted - removed_weighted`
    pub net_risk: i64,
    /// Weighted sum over NEW ∪ UNCHANGED
    pub head_stock_risk: i64,
    /// Weighted sum over REMOVED ∪ UNCHANGED
    pub base_stock_risk: i64,
}

impl RiskKpis {
    #[must_use]
    pub fn compute(items: &[DiffItem], weights: &RiskWeights) -> Self {
        let sum = |keep: fn(DiffState) -> bool| {
            weights.weighted(items.iter().filter(|i| keep(i.state)).map(DiffItem::severity))
        };
        let new_weighted = sum(|s| s == DiffState::New);
        let removed_weighted = sum(|s| s == DiffState::Removed);
        Self {
            new_weighted,
            removed_weighted,
            net_risk: new_weighted - removed_weighted,
            head_stock_risk: sum(DiffState::in_head),
            base_stock_risk: sum(DiffState::in_base),
        }
    }
}
