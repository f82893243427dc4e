use crate::errors::SextantResult;
use crate::models::{Edge, Node};

/// Read-only access to the graph store the engine searches.
///
/// Implementations own storage and schema resolution; the engine only
/// reads through this trait and never mutates the graph.
pub trait IGraphAccessor: Send + Sync {
    /// Whether the store knows this graph.
    fn has_graph(&self, graph_id: &str) -> SextantResult<bool>;

    fn list_nodes(&self, graph_id: &str) -> SextantResult<Vec<Node>>;

    fn list_edges(&self, graph_id: &str) -> SextantResult<Vec<Edge>>;

    /// Stored representation vector of a node, if any.
    fn get_node_vector(&self, graph_id: &str, node_id: &str) -> SextantResult<Option<Vec<f32>>>;

    /// Optional store-side full-text search: `(node_id, raw score)` pairs.
    /// `Ok(None)` means the store has no full-text facility.
    fn full_text_search(
        &self,
        _graph_id: &str,
        _query: &str,
        _limit: usize,
    ) -> SextantResult<Option<Vec<(String, f64)>>> {
        Ok(None)
    }
}
