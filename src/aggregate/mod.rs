//! Aggregator: derived, non-authoritative views over a diff.
//!
//! - per-module severity × state matrices, attributed from dependency paths
//! - severity-weighted risk KPIs
//! - fix-availability rollups
//! - occurrences shared by more than one build module

mod fixes;
mod modules;
mod risk;

pub use fixes::{FixAvailability, FixCounts};
pub use modules::{Hop, ModuleAttribution, PathAttribution, TAIL_SEPARATOR, attribute_path};
pub use risk::{RiskKpis, RiskWeights};

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::diff::DiffItem;
use crate::model::{DiffState, Severity, SeverityStateMatrix};

/// An occurrence whose paths attribute to more than one module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiModuleFinding {
    pub match_key: String,
    pub id: String,
    pub severity: Severity,
    pub state: DiffState,
    /// `group:artifact:version` of the vulnerable package
    pub package: String,
    pub modules: BTreeSet<String>,
    pub module_paths: BTreeMap<String, BTreeSet<String>>,
}

/// Everything the aggregator derives from one diff.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateResult {
    /// Module name -> severity × state matrix
    pub modules: BTreeMap<String, SeverityStateMatrix>,
    /// Items that attribute to no module
    pub unattributed: SeverityStateMatrix,
    pub risk: RiskKpis,
    pub fix_availability: FixAvailability,
    /// In presentation order
    pub multi_module_findings: Vec<MultiModuleFinding>,
}

/// Computes [`AggregateResult`]s.
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    weights: RiskWeights,
}

impl Aggregator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_weights(mut self, weights: RiskWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Aggregate diff items. Items are expected in presentation order; the
    /// multi-module list keeps that order.
    #[must_use]
    pub fn aggregate(&self, items: &[DiffItem]) -> AggregateResult {
        let mut modules: BTreeMap<String, SeverityStateMatrix> = BTreeMap::new();
        let mut unattributed = SeverityStateMatrix::new();
        let mut multi_module_findings = Vec::new();

        for item in items {
            let attribution = ModuleAttribution::from_paths(&item.occurrence.paths);
            if attribution.is_empty() {
                unattributed.record(item.severity(), item.state);
                continue;
            }
            for module in &attribution.modules {
                modules
                    .entry(module.clone())
                    .or_default()
                    .record(item.severity(), item.state);
            }
            if attribution.is_multi_module() {
                multi_module_findings.push(MultiModuleFinding {
                    match_key: item.occurrence.match_key.clone(),
                    id: item.occurrence.id.clone(),
                    severity: item.severity(),
                    state: item.state,
                    package: item.occurrence.package.coordinate(),
                    modules: attribution.modules,
                    module_paths: attribution.module_paths,
                });
            }
        }

        tracing::debug!(
            modules = modules.len(),
            unattributed = unattributed.total(),
            multi_module = multi_module_findings.len(),
            "Aggregated diff items"
        );

        AggregateResult {
            modules,
            unattributed,
            risk: RiskKpis::compute(items, &self.weights),
            fix_availability: FixAvailability::compute(items),
            multi_module_findings,
        }
    }
}
