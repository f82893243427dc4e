//! An identifier-shaped query ranks the node with that exact name first.

use std::sync::Arc;

use sextant_core::{Intent, SearchMode};
use sextant_retrieval::RetrievalEngine;
use test_fixtures::{exact_match_graph, offline_config, InMemoryGraphStore};

fn engine() -> RetrievalEngine {
    let store = Arc::new(InMemoryGraphStore::new());
    store.insert_graph("components", exact_match_graph());
    RetrievalEngine::new(store, offline_config()).unwrap()
}

#[test]
fn exact_name_is_first_under_text_heavy_weights() {
    let engine = engine();
    let response = engine
        .search("components", "`QueryCache`", SearchMode::Hybrid, None)
        .unwrap();

    assert_eq!(response.intent, Intent::ExactMatch);
    assert!(response.weights.text >= 0.60);
    assert!(response.weights.graph <= 0.10);
    assert!(response.weights.intent <= 0.10);

    let top = &response.results[0];
    assert_eq!(top.node_id, "c1");
    assert_eq!(top.name, "QueryCache");
    assert_eq!(top.per_signal.text, 1.0);
    assert!(top.method.starts_with("text"));
}

#[test]
fn bare_identifier_without_quotes_is_still_exact_match() {
    let engine = engine();
    let response = engine
        .search("components", "where is QUERY_CACHE configured", SearchMode::Hybrid, None)
        .unwrap();
    assert_eq!(response.intent, Intent::ExactMatch);
}

#[test]
fn results_are_sorted_with_id_tie_break() {
    let engine = engine();
    let response = engine
        .search("components", "cache", SearchMode::Lexical, None)
        .unwrap();
    for pair in response.results.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!(a.score > b.score || (a.score == b.score && a.node_id < b.node_id));
    }
}
