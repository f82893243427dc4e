//! A search that is mid-computation when its graph is invalidated must not
//! leave its pre-invalidation result in the query cache.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use sextant_core::models::{Edge, Node};
use sextant_core::traits::IGraphAccessor;
use sextant_core::{SearchMode, SearchResponse, SextantResult};
use sextant_retrieval::RetrievalEngine;
use test_fixtures::{offline_config, GraphBuilder, InMemoryGraphStore};

/// Store whose first full-text call parks until the test releases it.
struct GatedStore {
    inner: InMemoryGraphStore,
    armed: AtomicBool,
    gate: Barrier,
}

impl GatedStore {
    fn new() -> Self {
        Self {
            inner: InMemoryGraphStore::new(),
            armed: AtomicBool::new(true),
            gate: Barrier::new(2),
        }
    }

    fn put_widget(&self, node_id: &str) {
        self.inner
            .insert_graph("g", GraphBuilder::new().node(node_id, "widget", "part").build());
    }
}

impl IGraphAccessor for GatedStore {
    fn has_graph(&self, graph_id: &str) -> SextantResult<bool> {
        self.inner.has_graph(graph_id)
    }

    fn list_nodes(&self, graph_id: &str) -> SextantResult<Vec<Node>> {
        self.inner.list_nodes(graph_id)
    }

    fn list_edges(&self, graph_id: &str) -> SextantResult<Vec<Edge>> {
        self.inner.list_edges(graph_id)
    }

    fn get_node_vector(&self, graph_id: &str, node_id: &str) -> SextantResult<Option<Vec<f32>>> {
        self.inner.get_node_vector(graph_id, node_id)
    }

    fn full_text_search(
        &self,
        graph_id: &str,
        query: &str,
        limit: usize,
    ) -> SextantResult<Option<Vec<(String, f64)>>> {
        if self.armed.swap(false, Ordering::SeqCst) {
            // entered, then wait for release
            self.gate.wait();
            self.gate.wait();
        }
        self.inner.full_text_search(graph_id, query, limit)
    }
}

fn ids(response: &SearchResponse) -> Vec<&str> {
    response.results.iter().map(|r| r.node_id.as_str()).collect()
}

/// Replace the graph and invalidate while a search is parked mid-compute.
fn mutate_during_search(scope: Option<&str>) -> (Arc<SearchResponse>, Arc<SearchResponse>, u64) {
    let store = Arc::new(GatedStore::new());
    store.put_widget("old");
    let engine = Arc::new(RetrievalEngine::with_embedder(store.clone(), offline_config(), None).unwrap());

    let searcher = {
        let engine = Arc::clone(&engine);
        thread::spawn(move || engine.search("g", "widget", SearchMode::Lexical, None).unwrap())
    };
    store.gate.wait();
    store.put_widget("new");
    engine.invalidate(scope);
    store.gate.wait();

    let in_flight = searcher.join().unwrap();
    let after = engine.search("g", "widget", SearchMode::Lexical, None).unwrap();
    (in_flight, after, engine.stats().computations)
}

#[test]
fn graph_invalidation_discards_in_flight_result() {
    let (in_flight, after, computations) = mutate_during_search(Some("g"));
    assert_eq!(ids(&in_flight), ["old"]);
    assert_eq!(ids(&after), ["new"]);
    assert!(!Arc::ptr_eq(&in_flight, &after));
    assert_eq!(computations, 2);
}

#[test]
fn global_invalidation_discards_in_flight_result() {
    let (in_flight, after, computations) = mutate_during_search(None);
    assert_eq!(ids(&in_flight), ["old"]);
    assert_eq!(ids(&after), ["new"]);
    assert_eq!(computations, 2);
}

#[test]
fn result_is_cached_when_nothing_intervenes() {
    let store = Arc::new(GatedStore::new());
    store.armed.store(false, Ordering::SeqCst);
    store.put_widget("old");
    let engine = RetrievalEngine::with_embedder(store.clone(), offline_config(), None).unwrap();

    let a = engine.search("g", "widget", SearchMode::Lexical, None).unwrap();
    let b = engine.search("g", "widget", SearchMode::Lexical, None).unwrap();
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(engine.stats().computations, 1);
}
