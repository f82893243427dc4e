//! Property tests for batched similarity and the hashed fallback.

use proptest::prelude::*;
use sextant_core::traits::IEmbeddingProvider;
use sextant_embeddings::{fit_dimensions, EmbeddingMatrix, HashedFallback};

const DIMS: usize = 6;

fn vector() -> impl Strategy<Value = Vec<f32>> {
    prop::collection::vec(-10.0f32..10.0, DIMS)
}

fn rows() -> impl Strategy<Value = Vec<(String, Vec<f32>)>> {
    prop::collection::vec(vector(), 1..20).prop_map(|vs| {
        vs.into_iter()
            .enumerate()
            .map(|(i, v)| (format!("n{i}"), v))
            .collect()
    })
}

proptest! {
    #[test]
    fn similarities_lie_in_unit_interval(rows in rows(), query in vector()) {
        let matrix = EmbeddingMatrix::build(rows);
        for sim in matrix.similarities(&query).values() {
            prop_assert!(*sim > 0.0 && *sim <= 1.0);
        }
    }

    #[test]
    fn positive_scaling_of_query_preserves_similarities(
        rows in rows(), query in vector(), scale in 0.5f32..4.0,
    ) {
        let matrix = EmbeddingMatrix::build(rows);
        let base = matrix.similarities(&query);
        let scaled: Vec<f32> = query.iter().map(|v| v * scale).collect();
        let other = matrix.similarities(&scaled);
        for (id, sim) in &base {
            if let Some(s) = other.get(id) {
                prop_assert!((sim - s).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn fitted_vectors_have_requested_length(v in vector(), dims in 0usize..16) {
        prop_assert_eq!(fit_dimensions(v, dims).len(), dims);
    }

    #[test]
    fn hashed_fallback_is_unit_or_zero(text in "[a-z ]{0,60}") {
        let v = HashedFallback::new(32).embed(&text).unwrap();
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        prop_assert!(norm == 0.0 || (norm - 1.0).abs() < 1e-4);
    }
}
