//! A 15-edge graph: too sparse for PageRank, dense enough for communities.

use std::collections::HashMap;
use std::sync::Arc;

use sextant_core::config::GraphConfig;
use sextant_core::models::AuthorityOutcome;
use sextant_core::SearchMode;
use sextant_graph::{AuthorityScores, CommunityAssignment, GraphSnapshot};
use sextant_retrieval::RetrievalEngine;
use test_fixtures::{fifteen_edge_graph, offline_config, InMemoryGraphStore};

fn snapshot() -> GraphSnapshot {
    let g = fifteen_edge_graph();
    GraphSnapshot::build("pipeline", g.nodes, g.edges)
}

#[test]
fn authority_is_skipped_and_uniform() {
    let s = snapshot();
    let authority = AuthorityScores::compute(&s, &GraphConfig::default());
    assert_eq!(authority.outcome(), AuthorityOutcome::Skipped);
    for score in authority.scores().values() {
        assert!((score - 1.0 / 8.0).abs() < 1e-12);
    }
}

#[test]
fn communities_split_the_two_clusters() {
    let s = snapshot();
    let c = CommunityAssignment::detect(&s, &GraphConfig::default()).unwrap();
    assert_eq!(c.count(), 2);
    for id in ["ingest", "parse", "validate", "normalize"] {
        assert_eq!(c.community_of(id), c.community_of("ingest"));
    }
    for id in ["index", "rank", "cache", "respond"] {
        assert_eq!(c.community_of(id), c.community_of("index"));
    }
    assert_ne!(c.community_of("ingest"), c.community_of("index"));
}

#[test]
fn engine_reports_skipped_authority_and_partition() {
    let store = Arc::new(InMemoryGraphStore::new());
    store.insert_graph("pipeline", fifteen_edge_graph());
    let engine = RetrievalEngine::new(store, offline_config()).unwrap();

    let response = engine
        .search("pipeline", "ranking service", SearchMode::Hybrid, None)
        .unwrap();
    assert_eq!(response.authority, AuthorityOutcome::Skipped);
    assert_eq!(response.communities, Some(2));
    assert!(response.results.len() > 3);

    // every score is the fused score, boosted at most once per community
    let c = CommunityAssignment::detect(&snapshot(), &GraphConfig::default()).unwrap();
    let mut boosted: HashMap<usize, usize> = HashMap::new();
    for r in &response.results {
        let fused = r.per_signal.fuse(&response.weights);
        if r.score != fused {
            assert_eq!(r.score, fused * 1.05);
            let community = c.community_of(&r.node_id).unwrap();
            *boosted.entry(community).or_default() += 1;
        }
    }
    assert!(!boosted.is_empty());
    assert!(boosted.values().all(|n| *n == 1));
}
