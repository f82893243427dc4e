//! Batched cosine similarity against a per-graph embedding matrix.

use ndarray::{Array1, Array2, ArrayView1, Axis};
use rayon::prelude::*;
use sextant_core::errors::SextantResult;
use sextant_core::traits::IGraphAccessor;
use sextant_core::{Node, SignalMap};
use tracing::{debug, warn};

/// Query vectors with a norm below this produce no signal.
const ZERO_NORM_EPSILON: f32 = 1e-12;

/// Node vectors of one graph, stacked row-major with one fixed dimension.
#[derive(Debug, Clone)]
pub struct EmbeddingMatrix {
    matrix: Array2<f32>,
    /// Per-row L2 norms; zero-norm rows are stored as 1.
    norms: Array1<f32>,
    node_ids: Vec<String>,
    dimensions: usize,
}

impl EmbeddingMatrix {
    /// Stack vectors into a matrix. The first non-empty vector fixes the
    /// dimension; vectors of any other length are skipped.
    pub fn build(rows: Vec<(String, Vec<f32>)>) -> Self {
        let dimensions = rows
            .iter()
            .map(|(_, v)| v.len())
            .find(|len| *len > 0)
            .unwrap_or(0);

        let mut node_ids = Vec::with_capacity(rows.len());
        let mut data = Vec::with_capacity(rows.len() * dimensions);
        for (node_id, vector) in rows {
            if vector.len() != dimensions || dimensions == 0 {
                debug!(
                    node_id = %node_id,
                    len = vector.len(),
                    expected = dimensions,
                    "skipping node vector with mismatched dimension"
                );
                continue;
            }
            node_ids.push(node_id);
            data.extend(vector);
        }

        let matrix = Array2::from_shape_vec((node_ids.len(), dimensions), data)
            .unwrap_or_else(|_| Array2::zeros((0, dimensions)));
        let norms = matrix.map_axis(Axis(1), |row| {
            let n = row.dot(&row).sqrt();
            if n > 0.0 {
                n
            } else {
                1.0
            }
        });

        Self {
            matrix,
            norms,
            node_ids,
            dimensions,
        }
    }

    /// Fetch every node's stored vector through the accessor.
    pub fn from_accessor(
        accessor: &dyn IGraphAccessor,
        graph_id: &str,
        nodes: &[Node],
    ) -> SextantResult<Self> {
        let fetched: Vec<Option<(String, Vec<f32>)>> = nodes
            .par_iter()
            .map(|node| {
                accessor
                    .get_node_vector(graph_id, &node.id)
                    .map(|v| v.map(|v| (node.id.clone(), v)))
            })
            .collect::<SextantResult<_>>()?;
        let rows: Vec<(String, Vec<f32>)> = fetched.into_iter().flatten().collect();
        let missing = nodes.len() - rows.len();
        let matrix = Self::build(rows);
        debug!(
            graph_id,
            rows = matrix.len(),
            missing,
            dims = matrix.dimensions,
            "embedding matrix built"
        );
        Ok(matrix)
    }

    /// Cosine similarity of the query against every row, clamped to [0, 1].
    /// Only positive similarities are returned.
    pub fn similarities(&self, query: &[f32]) -> SignalMap {
        if self.is_empty() {
            return SignalMap::new();
        }
        if query.len() != self.dimensions {
            warn!(
                expected = self.dimensions,
                actual = query.len(),
                "query vector dimension mismatch, embedding signal skipped"
            );
            return SignalMap::new();
        }

        let q = ArrayView1::from(query);
        let q_norm = q.dot(&q).sqrt();
        if q_norm.is_nan() || q_norm < ZERO_NORM_EPSILON {
            return SignalMap::new();
        }

        let dots = self.matrix.dot(&q);
        dots.iter()
            .zip(self.norms.iter())
            .zip(&self.node_ids)
            .filter_map(|((dot, norm), id)| {
                let sim = f64::from(dot / (norm * q_norm)).clamp(0.0, 1.0);
                (sim > 0.0).then(|| (id.clone(), sim))
            })
            .collect()
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    pub fn len(&self) -> usize {
        self.node_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_ids.is_empty()
    }
}
