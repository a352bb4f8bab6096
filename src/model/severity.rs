//! Severity and diff-state enumerations.
//!
//! Both enums are part of the output wire contract: they serialize as the
//! exact uppercase strings consumers key on.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalized vulnerability severity.
///
/// Variants are declared from most to least severe, so the derived `Ord`
/// sorts `Critical` first.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    #[default]
    Unknown,
}

impl Severity {
    /// All severities in presentation order (most severe first).
    pub const ALL: [Self; 5] = [
        Self::Critical,
        Self::High,
        Self::Medium,
        Self::Low,
        Self::Unknown,
    ];

    /// Parse a scanner-supplied severity label.
    ///
    /// Matching is case-insensitive. `Negligible` is folded into `Low`;
    /// anything unrecognized maps to `Unknown`.
    #[must_use]
    pub fn parse(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "critical" => Self::Critical,
            "high" => Self::High,
            "medium" | "moderate" => Self::Medium,
            "low" | "negligible" => Self::Low,
            _ => Self::Unknown,
        }
    }

    /// Parse an optional label, treating absence as `Unknown`.
    #[must_use]
    pub fn from_optional(label: Option<&str>) -> Self {
        label.map_or(Self::Unknown, Self::parse)
    }

    /// Presentation rank, 0 for `Critical` up to 4 for `Unknown`.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Critical => 0,
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
            Self::Unknown => 4,
        }
    }

    /// The more severe of two severities.
    #[must_use]
    pub fn worse(self, other: Self) -> Self {
        if other.rank() < self.rank() { other } else { self }
    }

    /// True when `self` is at least as severe as `threshold`.
    #[must_use]
    pub const fn is_at_least(self, threshold: Self) -> bool {
        self.rank() <= threshold.rank()
    }

    /// Wire name of the severity.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "CRITICAL",
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    /// Strict parse used for CLI/config values: unlike [`Severity::parse`],
    /// unrecognized labels are rejected instead of mapping to `Unknown`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = Self::parse(s);
        if parsed == Self::Unknown && !s.trim().eq_ignore_ascii_case("unknown") {
            return Err(format!(
                "invalid severity '{s}' (expected critical, high, medium, low or unknown)"
            ));
        }
        Ok(parsed)
    }
}

/// Classification of an occurrence between the base and head revisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum DiffState {
    New,
    Removed,
    Unchanged,
}

impl DiffState {
    pub const ALL: [Self; 3] = [Self::New, Self::Removed, Self::Unchanged];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "NEW",
            Self::Removed => "REMOVED",
            Self::Unchanged => "UNCHANGED",
        }
    }

    /// Whether an item in this state is visible on the head revision.
    #[must_use]
    pub const fn in_head(self) -> bool {
        matches!(self, Self::New | Self::Unchanged)
    }

    /// Whether an item in this state is visible on the base revision.
    #[must_use]
    pub const fn in_base(self) -> bool {
        matches!(self, Self::Removed | Self::Unchanged)
    }
}

impl fmt::Display for DiffState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which revision an occurrence was observed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Base,
    Head,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_labels() {
        assert_eq!(Severity::parse("Critical"), Severity::Critical);
        assert_eq!(Severity::parse("HIGH"), Severity::High);
        assert_eq!(Severity::parse(" medium "), Severity::Medium);
        assert_eq!(Severity::parse("Negligible"), Severity::Low);
        assert_eq!(Severity::parse("bogus"), Severity::Unknown);
        assert_eq!(Severity::from_optional(None), Severity::Unknown);
    }

    #[test]
    fn test_order_most_severe_first() {
        let mut all = vec![Severity::Low, Severity::Unknown, Severity::Critical, Severity::High];
        all.sort();
        assert_eq!(
            all,
            vec![Severity::Critical, Severity::High, Severity::Low, Severity::Unknown]
        );
    }

    #[test]
    fn test_worse_is_commutative() {
        for a in Severity::ALL {
            for b in Severity::ALL {
                assert_eq!(a.worse(b), b.worse(a));
            }
        }
        assert_eq!(Severity::High.worse(Severity::Critical), Severity::Critical);
    }

    #[test]
    fn test_wire_names() {
        let json = serde_json::to_string(&Severity::Critical).unwrap();
        assert_eq!(json, "\"CRITICAL\"");
        let json = serde_json::to_string(&DiffState::Unchanged).unwrap();
        assert_eq!(json, "\"UNCHANGED\"");
        let parsed: Severity = serde_json::from_str("\"LOW\"").unwrap();
        assert_eq!(parsed, Severity::Low);
    }

    #[test]
    fn test_strict_from_str() {
        assert_eq!("high".parse::<Severity>(), Ok(Severity::High));
        assert_eq!("unknown".parse::<Severity>(), Ok(Severity::Unknown));
        assert!("severe".parse::<Severity>().is_err());
    }

    #[test]
    fn test_is_at_least() {
        assert!(Severity::Critical.is_at_least(Severity::High));
        assert!(Severity::High.is_at_least(Severity::High));
        assert!(!Severity::Medium.is_at_least(Severity::High));
    }
}
