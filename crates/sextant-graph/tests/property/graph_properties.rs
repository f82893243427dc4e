//! Property tests for authority, communities, and graph-derived signals.

use proptest::prelude::*;
use sextant_core::config::GraphConfig;
use sextant_core::models::AuthorityOutcome;
use sextant_core::{Edge, EdgeTypeWeights, Intent, Node};
use sextant_graph::{
    score_intent_edges, AuthorityScores, CommunityAssignment, GraphSnapshot, ProximityBooster,
};

const TYPES: &[&str] = &["uses", "precedes", "related_to", "causes", "mystery"];

fn graph() -> impl Strategy<Value = GraphSnapshot> {
    (2usize..14).prop_flat_map(|n| {
        prop::collection::vec((0..n, 0..n, 0..TYPES.len()), 0..60).prop_map(move |raw| {
            let nodes = (0..n).map(|i| Node::new(format!("n{i:02}"), "", "t")).collect();
            let edges = raw
                .into_iter()
                .enumerate()
                .map(|(k, (s, t, ty))| {
                    Edge::new(format!("e{k}"), format!("n{s:02}"), format!("n{t:02}"), TYPES[ty])
                })
                .collect();
            GraphSnapshot::build("g", nodes, edges)
        })
    })
}

fn in_unit(v: f64) -> bool {
    (0.0..=1.0 + 1e-12).contains(&v)
}

proptest! {
    #[test]
    fn authority_sums_to_one_or_is_uniform(s in graph()) {
        let a = AuthorityScores::compute(&s, &GraphConfig::default());
        let total: f64 = a.scores().values().sum();
        prop_assert!((total - 1.0).abs() < 1e-6);
        match a.outcome() {
            AuthorityOutcome::Skipped | AuthorityOutcome::Degraded => {
                let share = 1.0 / s.node_count() as f64;
                prop_assert!(a.scores().values().all(|v| (v - share).abs() < 1e-12));
            }
            AuthorityOutcome::Converged { .. } => {
                prop_assert!(s.edge_count() >= 20);
            }
            AuthorityOutcome::NotComputed => prop_assert!(false),
        }
    }

    #[test]
    fn communities_cover_every_node_with_dense_ids(s in graph()) {
        if let Some(c) = CommunityAssignment::detect(&s, &GraphConfig::default()) {
            prop_assert!(s.edge_count() >= 10);
            prop_assert!(c.count() >= 1);
            let mut seen = vec![false; c.count()];
            for node in s.nodes() {
                let id = c.community_of(&node.id);
                prop_assert!(id.is_some());
                let id = id.unwrap_or(usize::MAX);
                prop_assert!(id < c.count());
                seen[id] = true;
            }
            prop_assert!(seen.into_iter().all(|x| x));
        } else {
            prop_assert!(s.edge_count() < 10 || s.edges().all(|(a, b, _)| a == b));
        }
    }

    #[test]
    fn graph_signals_stay_in_unit_interval(s in graph(), seed_picks in prop::collection::vec(0usize..14, 0..4)) {
        let cfg = GraphConfig::default();
        let weights = EdgeTypeWeights::default();
        let seeds: Vec<String> = seed_picks
            .into_iter()
            .filter(|i| *i < s.node_count())
            .map(|i| format!("n{i:02}"))
            .collect();
        let authority = AuthorityScores::compute(&s, &cfg);
        let booster = ProximityBooster::new(&s, &weights, &cfg);
        for intent in [Intent::General, Intent::Workflow] {
            let boosted = booster.boost(&seeds, intent, &authority, &[]);
            prop_assert!(boosted.values().all(|v| in_unit(*v)));
        }
        let types = vec!["uses".to_string(), "causes".to_string()];
        let edges = score_intent_edges(&s, &seeds, &types, &cfg);
        prop_assert!(edges.values().all(|v| in_unit(*v) && *v > 0.0));
    }
}
