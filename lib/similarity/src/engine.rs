//! Pairwise similarity engine
//!
//! Every unordered pair of records is rated in combination order
//! `(0,1), (0,2), …, (1,2), …`. Rating is independent per pair and runs in
//! parallel; leader/follower suppression then walks the accepted pairs in
//! that same order:
//!
//! - a pair is emitted only if neither item was already claimed as a follower;
//! - once emitted, the follower is claimed and can no longer lead a pair.
//!
//! Clusters are therefore non-transitive and depend on the input order,
//! deterministically: `A~B`, `A~C`, `B~C` yields `A→B`, `A→C` and never `B→C`.

use crate::behavior::AttributeBehavior;
use crate::score::score_pair;
use dedupx_core::ParsedRecord;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Default similarity threshold
pub const DEFAULT_THRESHOLD: f64 = 0.01;

/// An accepted pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityResult {
    pub leader: String,
    pub follower: String,
    pub ratio: f64,
}

/// Compares parsed records under an attribute behavior
#[derive(Debug, Clone)]
pub struct SimilarityEngine {
    behavior: AttributeBehavior,
    threshold: f64,
}

impl SimilarityEngine {
    pub fn new(behavior: AttributeBehavior, threshold: f64) -> Self {
        Self { behavior, threshold }
    }

    pub fn behavior(&self) -> &AttributeBehavior {
        &self.behavior
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Rate every pair, in enumeration order, keeping those above the threshold
    pub fn rated_pairs(&self, records: &[ParsedRecord]) -> Vec<(usize, usize, f64)> {
        let n = records.len();
        (0..n)
            .into_par_iter()
            .flat_map_iter(|i| {
                ((i + 1)..n).filter_map(move |j| {
                    score_pair(&records[i], &records[j], &self.behavior, self.threshold)
                        .map(|ratio| (i, j, ratio))
                })
            })
            .collect()
    }

    /// Compare all records and return the suppressed result set
    pub fn compare(&self, records: &[ParsedRecord]) -> Vec<SimilarityResult> {
        let rated = self.rated_pairs(records);
        let accepted = rated.len();

        let mut claimed = vec![false; records.len()];
        let mut results = Vec::new();

        for (i, j, ratio) in rated {
            if claimed[i] || claimed[j] {
                continue;
            }
            claimed[j] = true;
            results.push(SimilarityResult {
                leader: records[i].item.clone(),
                follower: records[j].item.clone(),
                ratio,
            });
        }

        tracing::info!(
            records = records.len(),
            accepted,
            emitted = results.len(),
            threshold = self.threshold,
            "compared records"
        );

        results
    }
}

impl Default for SimilarityEngine {
    fn default() -> Self {
        Self::new(AttributeBehavior::default(), DEFAULT_THRESHOLD)
    }
}
