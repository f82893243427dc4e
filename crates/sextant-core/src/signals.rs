//! Helpers for per-node signal maps.

use std::cmp::Ordering;
use std::collections::HashMap;

/// Node id → signal score.
pub type SignalMap = HashMap<String, f64>;

/// Divide every value by the map's maximum. No-op when the maximum is not positive.
pub fn normalize_by_max(signal: &mut SignalMap) {
    let max = signal.values().copied().fold(0.0_f64, f64::max);
    if max > 0.0 {
        for v in signal.values_mut() {
            *v /= max;
        }
    }
}

/// Descending by score, ties by node id ascending.
pub fn rank_order(a: (&str, f64), b: (&str, f64)) -> Ordering {
    b.1.partial_cmp(&a.1)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.0.cmp(b.0))
}

/// Ids of the `k` highest positive entries, in rank order.
pub fn top_k(signal: &SignalMap, k: usize) -> Vec<String> {
    let mut entries: Vec<(&str, f64)> = signal
        .iter()
        .filter(|(_, v)| **v > 0.0)
        .map(|(id, v)| (id.as_str(), *v))
        .collect();
    entries.sort_by(|a, b| rank_order(*a, *b));
    entries
        .into_iter()
        .take(k)
        .map(|(id, _)| id.to_string())
        .collect()
}
