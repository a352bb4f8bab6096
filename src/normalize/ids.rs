//! Primary identifier selection.

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Identifier used when a match carries no id at all.
pub const UNKNOWN_ID: &str = "UNKNOWN";

static GHSA_REGEX: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"(?i)^GHSA(-[0-9a-z]{4}){3}$"));

static CVE_REGEX: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"(?i)^CVE-\d{4}-\d{4,}$"));

/// Identifier family, in order of preference for the primary id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum IdFamily {
    Ghsa,
    Cve,
    Other,
}

impl IdFamily {
    /// Classify an identifier.
    #[must_use]
    pub fn of(id: &str) -> Self {
        let matches = |re: &LazyLock<Result<Regex, regex::Error>>| {
            re.as_ref().is_ok_and(|re| re.is_match(id))
        };
        if matches(&GHSA_REGEX) {
            Self::Ghsa
        } else if matches(&CVE_REGEX) {
            Self::Cve
        } else {
            Self::Other
        }
    }
}

/// Chosen primary id plus the alias bag it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdSelection {
    pub primary: String,
    /// Every non-empty id seen on the match. Contains `primary` unless it
    /// fell back to [`UNKNOWN_ID`], in which case it is empty.
    pub ids: BTreeSet<String>,
}

/// Pick the primary id of a match.
///
/// The lexicographically smallest GHSA id wins, then the smallest CVE id,
/// then the scanner's own id, then [`UNKNOWN_ID`].
#[must_use]
pub fn select_primary_id(scanner_id: Option<&str>, aliases: &[String]) -> IdSelection {
    let scanner_id = scanner_id.map(str::trim).filter(|id| !id.is_empty());
    let mut ids: BTreeSet<String> = aliases
        .iter()
        .map(|a| a.trim())
        .filter(|a| !a.is_empty())
        .chain(scanner_id)
        .map(ToString::to_string)
        .collect();

    // BTreeSet iteration is sorted, so the first hit per family is the smallest
    let best_of = |family: IdFamily| ids.iter().find(|id| IdFamily::of(id) == family).cloned();

    let primary = best_of(IdFamily::Ghsa)
        .or_else(|| best_of(IdFamily::Cve))
        .or_else(|| scanner_id.map(ToString::to_string))
        .unwrap_or_else(|| UNKNOWN_ID.to_string());

    IdSelection { primary, ids }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aliases(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_family_classification() {
        assert_eq!(IdFamily::of("GHSA-jfh8-c2jp-5v3q"), IdFamily::Ghsa);
        assert_eq!(IdFamily::of("CVE-2021-44228"), IdFamily::Cve);
        assert_eq!(IdFamily::of("cve-2021-44228"), IdFamily::Cve);
        assert_eq!(IdFamily::of("GO-2022-0001"), IdFamily::Other);
        assert_eq!(IdFamily::of("CVE-21-1"), IdFamily::Other);
    }

    #[test]
    fn test_ghsa_preferred_over_cve() {
        let sel = select_primary_id(Some("CVE-2021-44228"), &aliases(&["GHSA-jfh8-c2jp-5v3q"]));
        assert_eq!(sel.primary, "GHSA-jfh8-c2jp-5v3q");
        assert_eq!(sel.ids.len(), 2);
    }

    #[test]
    fn test_smallest_in_family_wins() {
        let sel = select_primary_id(
            None,
            &aliases(&["CVE-2022-0002", "CVE-2021-9999", "GO-1"]),
        );
        assert_eq!(sel.primary, "CVE-2021-9999");
    }

    #[test]
    fn test_scanner_id_fallback() {
        let sel = select_primary_id(Some("GO-2022-0001"), &[]);
        assert_eq!(sel.primary, "GO-2022-0001");
    }

    #[test]
    fn test_unknown_when_no_ids() {
        let sel = select_primary_id(Some("  "), &aliases(&[""]));
        assert_eq!(sel.primary, UNKNOWN_ID);
        assert!(sel.ids.is_empty());
    }

    #[test]
    fn test_selection_independent_of_alias_order() {
        let a = select_primary_id(None, &aliases(&["GHSA-bbbb-bbbb-bbbb", "GHSA-aaaa-aaaa-aaaa"]));
        let b = select_primary_id(None, &aliases(&["GHSA-aaaa-aaaa-aaaa", "GHSA-bbbb-bbbb-bbbb"]));
        assert_eq!(a, b);
        assert_eq!(a.primary, "GHSA-aaaa-aaaa-aaaa");
    }
}
