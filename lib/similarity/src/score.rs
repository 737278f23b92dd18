//! Pair scoring
//!
//! A pair goes through three gates before it is rated:
//!
//! 1. **Hard gate**: tester kits must be equal as multisets.
//! 2. **Strong test**: every strong attribute must be equal. Two absent
//!    values are equal but add no match, which tells apart data of
//!    different quality.
//! 3. **Grouped test**: at least one grouped attribute must be equal with
//!    a value. Absent-absent pairs leave the denominator.
//!
//! The ratio is a weighted Jaccard index where each match is worth one
//! point:
//!
//! ```text
//! ratio = (|K∩| + smatch + gmatch + |T|) / (|K∪| + stotal + gtotal + |T|)
//! ```

use crate::behavior::{AttributeBehavior, CompareMode};
use dedupx_core::ParsedRecord;

/// Terms of the ratio for one pair that passed all gates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PairScore {
    pub keyword_intersection: usize,
    pub keyword_union: usize,
    pub smatch: usize,
    pub stotal: usize,
    pub gmatch: usize,
    pub gtotal: usize,
    pub tmatch: usize,
}

impl PairScore {
    /// Ratio rounded half-to-even to two decimals, 0 when the denominator is 0
    pub fn ratio(&self) -> f64 {
        let numerator = self.keyword_intersection + self.smatch + self.gmatch + self.tmatch;
        let denominator = self.keyword_union + self.stotal + self.gtotal + self.tmatch;
        if denominator == 0 {
            return 0.0;
        }
        round2(numerator as f64 / denominator as f64)
    }
}

#[inline]
fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Run the gates on a pair; `None` when any gate rejects it
pub fn gate_pair(x: &ParsedRecord, y: &ParsedRecord, behavior: &AttributeBehavior) -> Option<PairScore> {
    if x.tester != y.tester {
        return None;
    }

    let mut score = PairScore {
        tmatch: x.tester.len(),
        keyword_intersection: x.keywords.intersection(&y.keywords).count(),
        keyword_union: x.keywords.union(&y.keywords).count(),
        ..PairScore::default()
    };

    for attr in behavior.attrs(CompareMode::Strong) {
        let (a, b) = (x.attribute(attr), y.attribute(attr));
        if a != b {
            return None;
        }
        if a.is_some() {
            score.smatch += 1;
        }
        score.stotal += 1;
    }

    let grouped = behavior.count(CompareMode::Grouped);
    if grouped > 0 {
        score.gtotal = grouped;
        for attr in behavior.attrs(CompareMode::Grouped) {
            let (a, b) = (x.attribute(attr), y.attribute(attr));
            if a == b {
                if a.is_none() {
                    score.gtotal -= 1;
                } else {
                    score.gmatch += 1;
                }
            }
        }
        if score.gmatch == 0 {
            return None;
        }
    }

    Some(score)
}

/// Ratio of a pair if it passes all gates and exceeds the threshold
pub fn score_pair(
    x: &ParsedRecord,
    y: &ParsedRecord,
    behavior: &AttributeBehavior,
    threshold: f64,
) -> Option<f64> {
    let ratio = gate_pair(x, y, behavior)?.ratio();
    (ratio > threshold).then_some(ratio)
}
