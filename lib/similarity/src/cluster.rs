//! Report view of similarity results
//!
//! Groups accepted pairs by leader, the way the duplicates report lists them.

use crate::engine::SimilarityResult;
use serde::Serialize;

/// A leader with the followers attached to it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cluster {
    pub leader: String,
    /// Followers with their ratio, best first
    pub followers: Vec<(String, f64)>,
}

impl Cluster {
    pub fn len(&self) -> usize {
        self.followers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.followers.is_empty()
    }
}

/// Group results by leader (first-seen order). Followers are sorted by
/// descending ratio, then by text.
pub fn cluster(results: &[SimilarityResult]) -> Vec<Cluster> {
    let mut clusters: Vec<Cluster> = Vec::new();

    for result in results {
        match clusters.iter_mut().find(|c| c.leader == result.leader) {
            Some(cluster) => cluster.followers.push((result.follower.clone(), result.ratio)),
            None => clusters.push(Cluster {
                leader: result.leader.clone(),
                followers: vec![(result.follower.clone(), result.ratio)],
            }),
        }
    }

    for cluster in &mut clusters {
        cluster.followers.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
    }

    clusters
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(leader: &str, follower: &str, ratio: f64) -> SimilarityResult {
        SimilarityResult {
            leader: leader.to_string(),
            follower: follower.to_string(),
            ratio,
        }
    }

    #[test]
    fn test_cluster_groups_and_sorts() {
        let results = vec![
            result("A", "B", 0.5),
            result("A", "D", 0.9),
            result("C", "E", 0.3),
            result("A", "C2", 0.9),
        ];
        let clusters = cluster(&results);

        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].leader, "A");
        assert_eq!(
            clusters[0].followers,
            vec![("C2".to_string(), 0.9), ("D".to_string(), 0.9), ("B".to_string(), 0.5)]
        );
        assert_eq!(clusters[1].leader, "C");
        assert_eq!(clusters[1].len(), 1);
    }

    #[test]
    fn test_cluster_empty() {
        assert!(cluster(&[]).is_empty());
    }
}
