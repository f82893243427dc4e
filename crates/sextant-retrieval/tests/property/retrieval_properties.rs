//! Property tests for classification, fusion, diversity, and cache keys.

use proptest::prelude::*;
use sextant_core::signals::SignalMap;
use sextant_core::{Intent, IntentProfile, ScoredNode, SearchMode, SignalBreakdown};
use sextant_retrieval::cache::normalize_query;
use sextant_retrieval::{diversify, fuse, IntentClassifier, QueryKey, SignalSet};

fn signal() -> impl Strategy<Value = SignalMap> {
    prop::collection::hash_map("[a-z]{1,3}", 0.0f64..=1.0, 0..8)
}

fn profile() -> impl Strategy<Value = IntentProfile> {
    (0.0f64..1.0, 0.0f64..1.0, 0.0f64..1.0, 0.0f64..1.0)
        .prop_filter("non-zero", |(a, b, c, d)| a + b + c + d > 1e-3)
        .prop_map(|(a, b, c, d)| {
            let s = a + b + c + d;
            IntentProfile {
                embedding: a / s,
                text: b / s,
                graph: c / s,
                intent: d / s,
            }
        })
}

proptest! {
    #[test]
    fn classification_is_deterministic(query in ".{0,60}") {
        let c = IntentClassifier::default();
        prop_assert_eq!(c.classify(&query), c.classify(&query));
    }

    #[test]
    fn override_always_wins(query in ".{0,40}", idx in 0usize..Intent::COUNT) {
        let c = IntentClassifier::default();
        let intent = Intent::ALL[idx];
        prop_assert_eq!(c.resolve(&query, Some(intent)), intent);
    }

    #[test]
    fn fused_results_are_sorted_and_bounded(
        embedding in signal(), text in signal(), graph in signal(), intent in signal(),
        weights in profile(),
    ) {
        let signals = SignalSet { embedding, text, graph, intent };
        let results = fuse(&signals, &weights, |_| None);
        for r in &results {
            prop_assert!(r.score > 0.0 && r.score <= 1.0 + 1e-9);
            prop_assert_eq!(r.score, r.per_signal.fuse(&weights));
        }
        for pair in results.windows(2) {
            prop_assert!(
                pair[0].score > pair[1].score
                    || (pair[0].score == pair[1].score && pair[0].node_id < pair[1].node_id)
            );
        }
    }

    #[test]
    fn diversity_never_fires_without_partition(scores in prop::collection::vec(0.01f64..1.0, 0..10)) {
        let mut results: Vec<ScoredNode> = scores
            .iter()
            .enumerate()
            .map(|(i, s)| ScoredNode {
                node_id: format!("n{i}"),
                name: String::new(),
                score: *s,
                per_signal: SignalBreakdown::default(),
                method: "text".to_string(),
            })
            .collect();
        let before = results.clone();
        prop_assert!(!diversify(&mut results, None, 1.05, 3));
        prop_assert_eq!(results, before);
    }

    #[test]
    fn query_normalization_is_idempotent(query in ".{0,60}") {
        let once = normalize_query(&query);
        prop_assert_eq!(normalize_query(&once), once.clone());
        let a = QueryKey::new("g", &query, SearchMode::Hybrid, Intent::General, None);
        let b = QueryKey::new("g", &once, SearchMode::Hybrid, Intent::General, None);
        prop_assert_eq!(a, b);
    }
}
