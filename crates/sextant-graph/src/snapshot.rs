//! petgraph::StableGraph snapshot of one graph, with id → index lookup.

use std::collections::HashMap;

use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::visit::{EdgeRef, IntoEdgeReferences};
use petgraph::{Directed, Direction};
use sextant_core::errors::{SextantError, SextantResult};
use sextant_core::traits::IGraphAccessor;
use sextant_core::{Edge, Node};
use tracing::debug;

/// Weight stored on each snapshot edge.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotEdge {
    pub edge_type: String,
    pub weight: Option<f64>,
}

/// Node weights are positions in [`GraphSnapshot::nodes`].
pub type SnapshotGraph = StableGraph<usize, SnapshotEdge, Directed>;

/// Immutable view of a graph's nodes and edges at one point in time.
#[derive(Debug)]
pub struct GraphSnapshot {
    graph_id: String,
    nodes: Vec<Node>,
    graph: SnapshotGraph,
    node_index: HashMap<String, NodeIndex>,
    dropped_edges: usize,
}

impl GraphSnapshot {
    /// Build from node and edge lists. Edges whose endpoints are not in
    /// `nodes` are dropped. Duplicate node ids keep the first occurrence.
    pub fn build(graph_id: &str, nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        let mut graph = SnapshotGraph::default();
        let mut node_index = HashMap::with_capacity(nodes.len());
        let mut kept = Vec::with_capacity(nodes.len());
        for node in nodes {
            if node_index.contains_key(&node.id) {
                continue;
            }
            let idx = graph.add_node(kept.len());
            node_index.insert(node.id.clone(), idx);
            kept.push(node);
        }

        let mut dropped_edges = 0;
        for edge in edges {
            match (node_index.get(&edge.source), node_index.get(&edge.target)) {
                (Some(&s), Some(&t)) => {
                    graph.add_edge(
                        s,
                        t,
                        SnapshotEdge {
                            edge_type: edge.edge_type,
                            weight: edge.weight,
                        },
                    );
                }
                _ => dropped_edges += 1,
            }
        }

        debug!(
            graph_id,
            nodes = kept.len(),
            edges = graph.edge_count(),
            dropped_edges,
            "graph snapshot built"
        );

        Self {
            graph_id: graph_id.to_string(),
            nodes: kept,
            graph,
            node_index,
            dropped_edges,
        }
    }

    /// Load through the accessor. Unknown graphs are an error.
    pub fn load(accessor: &dyn IGraphAccessor, graph_id: &str) -> SextantResult<Self> {
        if !accessor.has_graph(graph_id)? {
            return Err(SextantError::UnknownGraph {
                graph_id: graph_id.to_string(),
            });
        }
        let nodes = accessor.list_nodes(graph_id)?;
        let edges = accessor.list_edges(graph_id)?;
        Ok(Self::build(graph_id, nodes, edges))
    }

    pub fn graph_id(&self) -> &str {
        &self.graph_id
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, node_id: &str) -> Option<&Node> {
        self.node_index
            .get(node_id)
            .and_then(|idx| self.graph.node_weight(*idx))
            .map(|pos| &self.nodes[*pos])
    }

    /// Position of a node in [`GraphSnapshot::nodes`].
    pub fn position(&self, node_id: &str) -> Option<usize> {
        self.node_index
            .get(node_id)
            .and_then(|idx| self.graph.node_weight(*idx))
            .copied()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn dropped_edges(&self) -> usize {
        self.dropped_edges
    }

    /// `(target id, edge)` for every edge leaving `node_id`.
    pub fn outgoing<'a>(
        &'a self,
        node_id: &str,
    ) -> impl Iterator<Item = (&'a str, &'a SnapshotEdge)> + 'a {
        self.adjacent(node_id, Direction::Outgoing)
    }

    /// `(source id, edge)` for every edge entering `node_id`.
    pub fn incoming<'a>(
        &'a self,
        node_id: &str,
    ) -> impl Iterator<Item = (&'a str, &'a SnapshotEdge)> + 'a {
        self.adjacent(node_id, Direction::Incoming)
    }

    /// Every edge as `(source position, target position, edge)`.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, &SnapshotEdge)> + '_ {
        self.graph.edge_references().filter_map(|e| {
            let s = self.graph.node_weight(e.source())?;
            let t = self.graph.node_weight(e.target())?;
            Some((*s, *t, e.weight()))
        })
    }

    fn adjacent<'a>(
        &'a self,
        node_id: &str,
        direction: Direction,
    ) -> impl Iterator<Item = (&'a str, &'a SnapshotEdge)> + 'a {
        let idx = self.node_index.get(node_id).copied();
        idx.into_iter()
            .flat_map(move |idx| self.graph.edges_directed(idx, direction))
            .filter_map(move |e| {
                let other = match direction {
                    Direction::Outgoing => e.target(),
                    Direction::Incoming => e.source(),
                };
                let pos = self.graph.node_weight(other)?;
                Some((self.nodes[*pos].id.as_str(), e.weight()))
            })
    }
}
