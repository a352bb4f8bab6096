//! Occurrence diff engine.

use std::collections::BTreeMap;

use super::result::{DiffItem, DiffResult};
use crate::model::{DiffState, Occurrence};

/// Classifies occurrences of two revisions by `match_key`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiffEngine;

impl DiffEngine {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Diff two occurrence lists.
    ///
    /// Keys in both revisions are UNCHANGED and carry the head fields; keys
    /// only in base are REMOVED; keys only in head are NEW. Exactly one item
    /// is produced per key of base ∪ head.
    #[must_use]
    pub fn diff(&self, base: &[Occurrence], head: &[Occurrence]) -> DiffResult {
        let base_map = index_by_key(base, "base");
        let head_map = index_by_key(head, "head");

        let mut items = Vec::with_capacity(base_map.len().max(head_map.len()));
        for (key, occurrence) in &head_map {
            let state = if base_map.contains_key(key) {
                DiffState::Unchanged
            } else {
                DiffState::New
            };
            items.push(DiffItem::new((*occurrence).clone(), state));
        }
        for (key, occurrence) in &base_map {
            if !head_map.contains_key(key) {
                items.push(DiffItem::new((*occurrence).clone(), DiffState::Removed));
            }
        }

        let result = DiffResult::from_items(items);
        tracing::debug!(
            new = result.summary.totals.new,
            removed = result.summary.totals.removed,
            unchanged = result.summary.totals.unchanged,
            "Computed occurrence diff"
        );
        result
    }
}

/// `match_key` -> occurrence. Duplicate keys keep the last entry.
fn index_by_key<'a>(occurrences: &'a [Occurrence], side: &str) -> BTreeMap<&'a str, &'a Occurrence> {
    let mut map = BTreeMap::new();
    for occurrence in occurrences {
        if map.insert(occurrence.match_key.as_str(), occurrence).is_some() {
            tracing::warn!(
                side,
                match_key = %occurrence.match_key,
                "Duplicate match_key in normalized input, keeping the last one"
            );
        }
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::test_support::occurrence;
    use crate::model::{Severity, Side};

    #[test]
    fn test_end_to_end_classification() {
        let base = vec![
            occurrence("CVE-A", "g:a:1.0", Severity::High),
            occurrence("CVE-B", "g:b:2.0", Severity::Low),
        ];
        let head = vec![
            occurrence("CVE-A", "g:a:1.0", Severity::High),
            occurrence("CVE-C", "g:c:3.0", Severity::Critical),
        ];
        let result = DiffEngine::new().diff(&base, &head);

        assert_eq!(result.len(), 3);
        let ids = |items: Vec<&DiffItem>| items.iter().map(|i| i.occurrence.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(result.new_items().collect()), ["CVE-C"]);
        assert_eq!(ids(result.removed_items().collect()), ["CVE-B"]);
        assert_eq!(ids(result.unchanged_items().collect()), ["CVE-A"]);
        assert_eq!(result.items_in(DiffState::New).count(), 1);

        let m = &result.summary;
        assert_eq!(m.cell(Severity::Critical, DiffState::New), 1);
        assert_eq!(m.cell(Severity::Low, DiffState::Removed), 1);
        assert_eq!(m.cell(Severity::High, DiffState::Unchanged), 1);
        assert_eq!(m.populated_cells(), 3);
        assert_eq!(m.total(), 3);
    }

    #[test]
    fn test_unchanged_carries_head_fields() {
        let base = vec![occurrence("CVE-A", "g:a:1", Severity::Medium)];
        let mut head_occ = occurrence("CVE-A", "g:a:1", Severity::High);
        head_occ.urls.insert("https://head".to_string());
        let result = DiffEngine::new().diff(&base, &[head_occ]);

        let item = &result.items[0];
        assert_eq!(item.state, DiffState::Unchanged);
        assert_eq!(item.severity(), Severity::High);
        assert!(item.occurrence.urls.contains("https://head"));
        assert_eq!(item.observed_in, vec![Side::Base, Side::Head]);
    }

    #[test]
    fn test_presentation_order() {
        let head = vec![
            occurrence("CVE-1", "z:z:1", Severity::Low),
            occurrence("CVE-2", "b:b:1", Severity::Critical),
            occurrence("CVE-3", "a:a:1", Severity::Critical),
        ];
        let result = DiffEngine::new().diff(&[], &head);
        let ids: Vec<_> = result.items.iter().map(|i| i.occurrence.id.as_str()).collect();
        assert_eq!(ids, ["CVE-3", "CVE-2", "CVE-1"]);
    }

    #[test]
    fn test_fail_gate() {
        let head = vec![occurrence("CVE-1", "a:a:1", Severity::Medium)];
        let result = DiffEngine::new().diff(&[], &head);
        assert!(result.has_new_at_or_above(Severity::Medium));
        assert!(!result.has_new_at_or_above(Severity::High));
        assert!(result.has_changes());
    }

    #[test]
    fn test_empty_inputs() {
        let result = DiffEngine::new().diff(&[], &[]);
        assert!(result.is_empty());
        assert!(!result.has_changes());
        assert_eq!(result.summary.total(), 0);
    }

    #[test]
    fn test_item_serializes_flat() {
        let result = DiffEngine::new().diff(&[], &[occurrence("CVE-1", "a:b:1", Severity::Low)]);
        let value = serde_json::to_value(&result.items[0]).unwrap();
        assert_eq!(value["state"], "NEW");
        assert_eq!(value["severity"], "LOW");
        assert_eq!(value["match_key"], "CVE-1::a:b:1");
        assert_eq!(value["observed_in"][0], "head");

        let back: DiffItem = serde_json::from_value(value).unwrap();
        assert_eq!(back, result.items[0]);
    }
}
