//! Reducer for matches that share a `match_key`.
//!
//! [`Candidate::merge`] is associative and commutative for severity, CVSS,
//! ids, urls and paths. Package and fix are first-writer-wins, so they
//! depend on which side is the receiver.

use std::cmp::Ordering;

use crate::model::{CvssEntry, Occurrence, Severity};

/// One occurrence under construction, plus the bookkeeping the reducer needs.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub occurrence: Occurrence,
    /// Severity of the match that supplied `occurrence.cvss_max`
    cvss_source: Severity,
    /// Number of raw matches folded into this candidate
    pub matches: usize,
}

impl Candidate {
    /// Wrap a single-match occurrence.
    #[must_use]
    pub fn new(occurrence: Occurrence) -> Self {
        Self {
            cvss_source: occurrence.severity,
            occurrence,
            matches: 1,
        }
    }

    /// Fold `other` into `self`. `self` is the earlier writer.
    #[must_use]
    pub fn merge(mut self, other: Self, max_paths: usize) -> Self {
        let (cvss_max, cvss_source) = pick_cvss(
            (self.occurrence.cvss_max.take(), self.cvss_source),
            (other.occurrence.cvss_max, other.cvss_source),
        );
        self.occurrence.cvss_max = cvss_max;
        self.cvss_source = cvss_source;

        self.occurrence.severity = self.occurrence.severity.worse(other.occurrence.severity);
        self.occurrence.ids.extend(other.occurrence.ids);
        self.occurrence.urls.extend(other.occurrence.urls);
        self.occurrence.paths.extend(other.occurrence.paths);
        cap_paths(&mut self.occurrence, max_paths);

        if self.occurrence.fix.is_none() {
            self.occurrence.fix = other.occurrence.fix;
        }
        self.matches += other.matches;
        self
    }
}

/// Keep at most `max_paths` chains: the lexicographically smallest ones.
pub fn cap_paths(occurrence: &mut Occurrence, max_paths: usize) {
    while occurrence.paths.len() > max_paths {
        occurrence.paths.pop_last();
    }
}

/// Present beats absent; among present entries the one from the worse
/// severity wins, then the higher score.
fn pick_cvss(
    a: (Option<CvssEntry>, Severity),
    b: (Option<CvssEntry>, Severity),
) -> (Option<CvssEntry>, Severity) {
    let b_wins = match (&a.0, &b.0) {
        (None, Some(_)) => true,
        (Some(ea), Some(eb)) => {
            let order = b
                .1
                .rank()
                .cmp(&a.1.rank())
                .then_with(|| ea.cmp_strength(eb));
            order == Ordering::Less
        }
        _ => false,
    };
    if b_wins { b } else { a }
}
