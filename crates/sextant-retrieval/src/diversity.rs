//! Community-diversity reranking.

use std::collections::HashSet;

use sextant_core::ScoredNode;
use sextant_graph::CommunityAssignment;

use crate::fusion::sort_results;

/// Boost the first result of each community, then re-sort.
///
/// Walks `results` in fused order; the first node seen from a community
/// gets `score × boost`. Does nothing unless there are more than
/// `min_results` results and a partition. Returns whether it ran.
pub fn diversify(
    results: &mut [ScoredNode],
    communities: Option<&CommunityAssignment>,
    boost: f64,
    min_results: usize,
) -> bool {
    let Some(communities) = communities else {
        return false;
    };
    if results.len() <= min_results {
        return false;
    }

    let mut seen = HashSet::new();
    for result in results.iter_mut() {
        if let Some(c) = communities.community_of(&result.node_id) {
            if seen.insert(c) {
                result.score *= boost;
            }
        }
    }
    sort_results(results);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use sextant_core::config::GraphConfig;
    use sextant_core::{Edge, Node, SignalBreakdown};
    use sextant_graph::GraphSnapshot;

    /// Two 4-cliques {n0..n3}, {n4..n7} joined by n3 -> n4.
    fn partition() -> CommunityAssignment {
        let nodes = (0..8).map(|i| Node::new(format!("n{i}"), "", "t")).collect();
        let mut edges = Vec::new();
        for base in [0, 4] {
            for i in base..base + 4 {
                for j in (i + 1)..base + 4 {
                    edges.push(Edge::new(
                        format!("e{i}{j}"),
                        format!("n{i}"),
                        format!("n{j}"),
                        "related_to",
                    ));
                }
            }
        }
        edges.push(Edge::new("bridge", "n3", "n4", "related_to"));
        let snapshot = GraphSnapshot::build("g", nodes, edges);
        CommunityAssignment::detect(&snapshot, &GraphConfig::default()).unwrap()
    }

    fn result(id: &str, score: f64) -> ScoredNode {
        ScoredNode {
            node_id: id.to_string(),
            name: id.to_string(),
            score,
            per_signal: SignalBreakdown::default(),
            method: "text".to_string(),
        }
    }

    #[test]
    fn first_of_each_community_is_boosted() {
        let communities = partition();
        let mut results = vec![
            result("n0", 0.9),
            result("n1", 0.8),
            result("n4", 0.7),
            result("n5", 0.6),
        ];
        assert!(diversify(&mut results, Some(&communities), 1.05, 3));
        assert_eq!(results[0].score, 0.9 * 1.05);
        assert_eq!(results[1].score, 0.8);
        assert_eq!(results[2].score, 0.7 * 1.05);
        assert_eq!(results[3].score, 0.6);
    }

    #[test]
    fn boost_can_reorder() {
        let communities = partition();
        let mut results = vec![
            result("n0", 0.9),
            result("n1", 0.72),
            result("n4", 0.7),
            result("n5", 0.6),
        ];
        diversify(&mut results, Some(&communities), 1.05, 3);
        let ids: Vec<&str> = results.iter().map(|r| r.node_id.as_str()).collect();
        assert_eq!(ids, ["n0", "n4", "n1", "n5"]);
    }

    #[test]
    fn inactive_at_or_below_threshold() {
        let communities = partition();
        let mut results = vec![result("n0", 0.9), result("n4", 0.7), result("n5", 0.6)];
        assert!(!diversify(&mut results, Some(&communities), 1.05, 3));
        assert_eq!(results[1].score, 0.7);
    }

    #[test]
    fn inactive_without_partition() {
        let mut results: Vec<ScoredNode> =
            (0..5).map(|i| result(&format!("n{i}"), 1.0 - i as f64 * 0.1)).collect();
        let before = results.clone();
        assert!(!diversify(&mut results, None, 1.05, 3));
        assert_eq!(results, before);
    }
}
