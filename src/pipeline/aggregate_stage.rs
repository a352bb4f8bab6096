//! Aggregation stage.

use crate::aggregate::{Aggregator, RiskWeights};
use crate::reports::{AggregateDocument, DiffDocument};

/// Roll a diff document up by module, risk and fix availability.
#[must_use]
pub fn aggregate_diff(diff: &DiffDocument, weights: RiskWeights, quiet: bool) -> AggregateDocument {
    let aggregate = Aggregator::new().with_weights(weights).aggregate(&diff.items);

    if !quiet {
        tracing::info!(
            "Aggregated {} items into {} modules (net risk {})",
            diff.items.len(),
            aggregate.modules.len(),
            aggregate.risk.net_risk
        );
    }

    AggregateDocument::new(diff.base.clone(), diff.head.clone(), aggregate)
}
