//! End-to-end searches over a JSON fixture with non-standard field names.

use std::sync::Arc;

use sextant_core::models::AuthorityOutcome;
use sextant_core::{Intent, SearchMode};
use sextant_retrieval::RetrievalEngine;
use test_fixtures::{offline_config, FullTextMode, InMemoryGraphStore};

fn engine_with(mode: FullTextMode) -> RetrievalEngine {
    let store = Arc::new(InMemoryGraphStore::new().with_full_text(mode));
    store
        .load_fixture_graph("kb", "knowledge_base.json")
        .unwrap();
    RetrievalEngine::with_embedder(store, offline_config(), None).unwrap()
}

#[test]
fn lexical_mode_skips_graph_signals() {
    let engine = engine_with(FullTextMode::Absent);
    let response = engine
        .search("kb", "bm25 ranking", SearchMode::Lexical, None)
        .unwrap();
    assert_eq!(response.results[0].node_id, "n-bm25");
    assert_eq!(response.authority, AuthorityOutcome::NotComputed);
    assert_eq!(response.communities, None);
    for r in &response.results {
        assert_eq!(r.per_signal.graph, 0.0);
        assert_eq!(r.per_signal.intent, 0.0);
        assert_eq!(r.method, "text");
    }
}

#[test]
fn embedding_mode_uses_the_supplied_vector() {
    let engine = engine_with(FullTextMode::Absent);
    let response = engine
        .search_with_vector(
            "kb",
            "graph centrality",
            SearchMode::Embedding,
            None,
            Some(&[0.0, 0.0, 1.0, 0.0]),
        )
        .unwrap();
    assert_eq!(response.results[0].node_id, "n-pagerank");
    assert!(response.results.iter().all(|r| r.method == "embedding"));
}

#[test]
fn exploratory_intent_follows_related_edges() {
    let engine = engine_with(FullTextMode::Absent);
    let response = engine
        .search("kb", "what else is related to pagerank", SearchMode::Hybrid, None)
        .unwrap();
    assert_eq!(response.intent, Intent::Exploratory);
    let modularity = response
        .results
        .iter()
        .find(|r| r.node_id == "n-modularity")
        .unwrap();
    assert!(modularity.per_signal.intent > 0.0);
    assert!(modularity.per_signal.graph > 0.0);
}

#[test]
fn full_text_hits_extend_the_text_signal() {
    let engine = engine_with(FullTextMode::NameContains);
    let response = engine
        .search("kb", "fusion", SearchMode::Lexical, None)
        .unwrap();
    let ids: Vec<&str> = response.results.iter().map(|r| r.node_id.as_str()).collect();
    assert!(ids.contains(&"n-fusion"));
    assert!(ids.contains(&"n-rrf"));
}

#[test]
fn failing_full_text_falls_back_to_bm25() {
    let engine = engine_with(FullTextMode::Failing);
    let response = engine
        .search("kb", "bm25 ranking", SearchMode::Lexical, None)
        .unwrap();
    assert_eq!(response.results[0].node_id, "n-bm25");
}

#[test]
fn dangling_edges_are_dropped() {
    let store = Arc::new(InMemoryGraphStore::new());
    store
        .load_fixture_graph("kb", "knowledge_base.json")
        .unwrap();
    let snapshot = sextant_graph::GraphSnapshot::load(store.as_ref(), "kb").unwrap();
    assert_eq!(snapshot.dropped_edges(), 1);
    assert_eq!(snapshot.edge_count(), 11);
}
