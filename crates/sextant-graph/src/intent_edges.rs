//! Intent-specific edge traversal signal.

use sextant_core::config::GraphConfig;
use sextant_core::signals::{normalize_by_max, SignalMap};

use crate::snapshot::GraphSnapshot;

/// Score nodes one typed hop away from the seeds.
///
/// Only edges whose type is in `edge_types` count. A seed's outgoing match
/// credits the target with `intent_forward`, an incoming match credits the
/// source with `intent_backward`. Normalized by max; an empty type set
/// yields an empty signal.
pub fn score_intent_edges(
    snapshot: &GraphSnapshot,
    seeds: &[String],
    edge_types: &[String],
    config: &GraphConfig,
) -> SignalMap {
    let mut signal = SignalMap::new();
    if edge_types.is_empty() {
        return signal;
    }
    let matches = |t: &str| edge_types.iter().any(|e| e == t);

    for seed in seeds {
        for (target, edge) in snapshot.outgoing(seed) {
            if matches(edge.edge_type.as_str()) {
                *signal.entry(target.to_string()).or_insert(0.0) += config.intent_forward;
            }
        }
        for (source, edge) in snapshot.incoming(seed) {
            if matches(edge.edge_type.as_str()) {
                *signal.entry(source.to_string()).or_insert(0.0) += config.intent_backward;
            }
        }
    }
    normalize_by_max(&mut signal);
    signal
}
