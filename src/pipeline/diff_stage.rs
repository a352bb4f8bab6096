//! Diff computation stage.

use super::exit_codes;
use crate::diff::DiffEngine;
use crate::model::{DiffState, Severity};
use crate::reports::{DiffDocument, NormalizedDocument};

/// Diff two normalized documents.
#[must_use]
pub fn compute_diff(base: &NormalizedDocument, head: &NormalizedDocument, quiet: bool) -> DiffDocument {
    if !quiet {
        tracing::info!(
            "Computing vulnerability diff: {} ({} occurrences) -> {} ({} occurrences)",
            base.revision.name,
            base.occurrences.len(),
            head.revision.name,
            head.occurrences.len()
        );
    }

    let result = DiffEngine::new().diff(&base.occurrences, &head.occurrences);

    if !quiet {
        let totals = &result.summary.totals;
        tracing::info!(
            "Diff complete: {} new, {} removed, {} unchanged",
            totals.new,
            totals.removed,
            totals.unchanged
        );
    }

    DiffDocument::new(base.revision.clone(), head.revision.clone(), result)
}

/// Exit code for a diff under the `--fail-on-new` gate.
#[must_use]
pub fn gate_exit_code(diff: &DiffDocument, fail_on_new: Option<Severity>) -> i32 {
    let Some(threshold) = fail_on_new else {
        return exit_codes::SUCCESS;
    };
    let tripped = diff
        .items
        .iter()
        .filter(|item| item.state == DiffState::New && item.severity().is_at_least(threshold))
        .inspect(|item| {
            tracing::debug!(match_key = %item.match_key(), "New finding at or above the gate");
        })
        .count();

    if tripped == 0 {
        exit_codes::SUCCESS
    } else {
        tracing::warn!(
            "{} new finding(s) at or above {}",
            tripped,
            threshold.as_str()
        );
        exit_codes::NEW_FINDINGS
    }
}
