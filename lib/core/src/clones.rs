//! Clone partition
//!
//! Byte-identical catalog lines are trivial duplicates. They are counted and
//! moved out of the sample before any pairwise work happens.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// An item value that occurs more than once in the input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloneGroup {
    pub item: String,
    pub count: usize,
}

/// Result of splitting the filtered input into unique items and clones
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    /// Items occurring exactly once, in first-seen order
    pub sample: Vec<String>,
    /// Items occurring two or more times, in first-seen order
    pub clones: Vec<CloneGroup>,
}

impl Partition {
    /// Total number of input lines that were clones
    pub fn clone_lines(&self) -> usize {
        self.clones.iter().map(|c| c.count).sum()
    }
}

/// Count exact string occurrences and separate clones from the sample
pub fn partition<I, S>(items: I) -> Partition
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut order: Vec<String> = Vec::new();
    let mut counts: AHashMap<String, usize> = AHashMap::new();

    for item in items {
        let item = item.into();
        match counts.get_mut(&item) {
            Some(count) => *count += 1,
            None => {
                counts.insert(item.clone(), 1);
                order.push(item);
            }
        }
    }

    let mut result = Partition::default();
    for item in order {
        let count = counts.get(&item).copied().unwrap_or(1);
        if count > 1 {
            result.clones.push(CloneGroup { item, count });
        } else {
            result.sample.push(item);
        }
    }

    tracing::debug!(
        sample = result.sample.len(),
        clones = result.clones.len(),
        "partitioned input"
    );

    result
}
