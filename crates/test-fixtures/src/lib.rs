//! Test fixtures for sextant: an in-memory graph store, graph builders, and
//! JSON graph fixtures loaded through schema detection.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use sextant_core::errors::GraphError;
use sextant_core::schema::SchemaProfile;
use sextant_core::traits::IGraphAccessor;
use sextant_core::{Edge, Node, SextantConfig, SextantError, SextantResult};

/// Root directory of the JSON graph fixtures.
pub fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("graphs")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Default config with the local model tier disabled, so engines built in
/// tests never touch the network.
pub fn offline_config() -> SextantConfig {
    let mut config = SextantConfig::default();
    config.embedding.local_endpoint = None;
    config.embedding.api_endpoint = None;
    config
}

/// Raw node and edge records, in whatever field naming the source uses.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphFixture {
    pub nodes: Vec<Value>,
    #[serde(default)]
    pub edges: Vec<Value>,
}

/// Property names that hold a node's stored vector.
const VECTOR_FIELDS: &[&str] = &["embedding", "vector"];

#[derive(Debug, Default)]
struct StoredGraph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    vectors: HashMap<String, Vec<f32>>,
}

/// How the store answers full-text search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FullTextMode {
    /// No full-text facility (`Ok(None)`).
    #[default]
    Absent,
    /// Count of query words contained in the node name.
    NameContains,
    /// Every call fails.
    Failing,
}

/// `IGraphAccessor` over in-memory graphs.
#[derive(Default)]
pub struct InMemoryGraphStore {
    graphs: RwLock<HashMap<String, StoredGraph>>,
    profiles: RwLock<HashMap<String, SchemaProfile>>,
    full_text: FullTextMode,
    node_loads: AtomicUsize,
}

impl InMemoryGraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_full_text(mut self, mode: FullTextMode) -> Self {
        self.full_text = mode;
        self
    }

    /// Insert or replace a graph.
    pub fn insert_graph(&self, graph_id: &str, built: BuiltGraph) {
        let stored = StoredGraph {
            nodes: built.nodes,
            edges: built.edges,
            vectors: built.vectors,
        };
        if let Ok(mut graphs) = self.graphs.write() {
            graphs.insert(graph_id.to_string(), stored);
        }
    }

    pub fn remove_graph(&self, graph_id: &str) {
        if let Ok(mut graphs) = self.graphs.write() {
            graphs.remove(graph_id);
        }
    }

    /// Map raw records onto the graph. The schema profile is detected on the
    /// first load for a graph id and reused afterwards.
    pub fn load_records(
        &self,
        graph_id: &str,
        node_records: &[Value],
        edge_records: &[Value],
    ) -> SextantResult<SchemaProfile> {
        let profile = {
            let mut profiles = self.profiles.write().map_err(poisoned)?;
            let existing = profiles.get(graph_id).cloned();
            match existing {
                Some(p) => p,
                None => {
                    let p = SchemaProfile::detect(node_records, edge_records)?;
                    profiles.insert(graph_id.to_string(), p.clone());
                    p
                }
            }
        };

        let mut builder = GraphBuilder::new();
        for record in node_records {
            let mut node = profile.node_from_record(record)?;
            for field in VECTOR_FIELDS {
                if let Some(value) = node.properties.remove(*field) {
                    builder.vectors.insert(node.id.clone(), parse_vector(&value)?);
                }
            }
            builder.nodes.push(node);
        }
        for (ordinal, record) in edge_records.iter().enumerate() {
            builder.edges.push(profile.edge_from_record(record, ordinal)?);
        }
        self.insert_graph(graph_id, builder.build());
        Ok(profile)
    }

    /// Load a JSON fixture from `graphs/` under `graph_id`.
    pub fn load_fixture_graph(
        &self,
        graph_id: &str,
        relative_path: &str,
    ) -> SextantResult<SchemaProfile> {
        let fixture: GraphFixture = load_fixture(relative_path);
        self.load_records(graph_id, &fixture.nodes, &fixture.edges)
    }

    /// How many times `list_nodes` has been called.
    pub fn node_loads(&self) -> usize {
        self.node_loads.load(Ordering::SeqCst)
    }

    fn with_graph<T>(
        &self,
        graph_id: &str,
        f: impl FnOnce(&StoredGraph) -> T,
    ) -> SextantResult<T> {
        let graphs = self.graphs.read().map_err(poisoned)?;
        graphs
            .get(graph_id)
            .map(f)
            .ok_or_else(|| SextantError::UnknownGraph {
                graph_id: graph_id.to_string(),
            })
    }
}

impl IGraphAccessor for InMemoryGraphStore {
    fn has_graph(&self, graph_id: &str) -> SextantResult<bool> {
        let graphs = self.graphs.read().map_err(poisoned)?;
        Ok(graphs.contains_key(graph_id))
    }

    fn list_nodes(&self, graph_id: &str) -> SextantResult<Vec<Node>> {
        self.node_loads.fetch_add(1, Ordering::SeqCst);
        self.with_graph(graph_id, |g| g.nodes.clone())
    }

    fn list_edges(&self, graph_id: &str) -> SextantResult<Vec<Edge>> {
        self.with_graph(graph_id, |g| g.edges.clone())
    }

    fn get_node_vector(&self, graph_id: &str, node_id: &str) -> SextantResult<Option<Vec<f32>>> {
        self.with_graph(graph_id, |g| g.vectors.get(node_id).cloned())
    }

    fn full_text_search(
        &self,
        graph_id: &str,
        query: &str,
        limit: usize,
    ) -> SextantResult<Option<Vec<(String, f64)>>> {
        match self.full_text {
            FullTextMode::Absent => Ok(None),
            FullTextMode::Failing => Err(GraphError::AccessorFailed {
                graph_id: graph_id.to_string(),
                reason: "full-text index offline".to_string(),
            }
            .into()),
            FullTextMode::NameContains => {
                let words: Vec<String> =
                    query.split_whitespace().map(str::to_lowercase).collect();
                self.with_graph(graph_id, |g| {
                    let mut hits: Vec<(String, f64)> = g
                        .nodes
                        .iter()
                        .filter_map(|n| {
                            let name = n.name.to_lowercase();
                            let count = words.iter().filter(|w| name.contains(w.as_str())).count();
                            (count > 0).then(|| (n.id.clone(), count as f64))
                        })
                        .collect();
                    hits.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
                    hits.truncate(limit);
                    Some(hits)
                })
            }
        }
    }
}

fn poisoned<E>(_: E) -> SextantError {
    SextantError::ConcurrencyError("in-memory graph store lock poisoned".to_string())
}

fn parse_vector(value: &Value) -> SextantResult<Vec<f32>> {
    let malformed = || GraphError::MalformedRecord {
        reason: "vector must be an array of numbers".to_string(),
    };
    value
        .as_array()
        .ok_or_else(malformed)?
        .iter()
        .map(|v| v.as_f64().map(|f| f as f32).ok_or_else(malformed))
        .collect::<Result<Vec<f32>, GraphError>>()
        .map_err(SextantError::from)
}

/// Output of [`GraphBuilder::build`].
#[derive(Debug, Clone, Default)]
pub struct BuiltGraph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub vectors: HashMap<String, Vec<f32>>,
}

/// Fluent graph construction for tests.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    vectors: HashMap<String, Vec<f32>>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(mut self, id: &str, name: &str, node_type: &str) -> Self {
        self.nodes.push(Node::new(id, name, node_type));
        self
    }

    pub fn node_with(mut self, node: Node) -> Self {
        self.nodes.push(node);
        self
    }

    /// Edge with an id derived from its position.
    pub fn edge(mut self, source: &str, target: &str, edge_type: &str) -> Self {
        let id = format!("e{}", self.edges.len());
        self.edges.push(Edge::new(id, source, target, edge_type));
        self
    }

    pub fn vector(mut self, node_id: &str, vector: Vec<f32>) -> Self {
        self.vectors.insert(node_id.to_string(), vector);
        self
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn build(self) -> BuiltGraph {
        BuiltGraph {
            nodes: self.nodes,
            edges: self.edges,
            vectors: self.vectors,
        }
    }
}

/// One-hot-ish vector of `dims` with weight on `axis`.
pub fn axis_vector(dims: usize, axis: usize) -> Vec<f32> {
    let mut v = vec![0.05; dims];
    v[axis % dims] = 1.0;
    v
}

/// A small component catalog where exactly one node is named `QueryCache`
/// and several others mention "query" or "cache" separately.
pub fn exact_match_graph() -> BuiltGraph {
    let dims = 8;
    GraphBuilder::new()
        .node("c1", "QueryCache", "component")
        .node("c2", "Query planner", "component")
        .node("c3", "Cache eviction policy", "concept")
        .node("c4", "Vector cache warmer", "component")
        .node("c5", "Query log", "artifact")
        .node("c6", "Graph snapshot", "component")
        .edge("c2", "c1", "uses")
        .edge("c1", "c3", "depends_on")
        .edge("c4", "c3", "implements")
        .edge("c5", "c2", "mentions")
        .edge("c6", "c1", "related_to")
        .vector("c1", axis_vector(dims, 0))
        .vector("c2", axis_vector(dims, 1))
        .vector("c3", axis_vector(dims, 2))
        .vector("c4", axis_vector(dims, 3))
        .vector("c5", axis_vector(dims, 4))
        .vector("c6", axis_vector(dims, 5))
        .build()
}

/// Two 4-node clusters joined by one bridge, 15 edges in total: sparse
/// enough to skip PageRank, dense enough for community detection.
pub fn fifteen_edge_graph() -> BuiltGraph {
    let ingest = ["ingest", "parse", "validate", "normalize"];
    let serve = ["index", "rank", "cache", "respond"];
    let mut builder = GraphBuilder::new();
    for id in ingest {
        builder = builder.node(id, &format!("{id} stage"), "stage");
    }
    for id in serve {
        builder = builder.node(id, &format!("{id} service"), "service");
    }
    for cluster in [ingest, serve] {
        for i in 0..cluster.len() {
            for j in (i + 1)..cluster.len() {
                builder = builder.edge(cluster[i], cluster[j], "precedes");
            }
        }
    }
    builder
        .edge("ingest", "validate", "uses")
        .edge("index", "cache", "uses")
        .edge("normalize", "index", "produces")
        .build()
}
