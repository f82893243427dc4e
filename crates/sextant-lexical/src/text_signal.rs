use sextant_core::signals::normalize_by_max;
use sextant_core::SignalMap;

/// Combine BM25 with the store's full-text result.
///
/// Each source is normalized by its own maximum; a node's text score is the
/// larger of the two. Without a full-text result this is normalized BM25.
pub fn combine_text_signal(bm25: SignalMap, full_text: Option<&[(String, f64)]>) -> SignalMap {
    let mut text = bm25;
    normalize_by_max(&mut text);

    let Some(hits) = full_text else {
        return text;
    };
    let mut fts: SignalMap = SignalMap::new();
    for (node_id, score) in hits {
        if score.is_finite() && *score > 0.0 {
            let entry = fts.entry(node_id.clone()).or_insert(0.0);
            *entry = entry.max(*score);
        }
    }
    normalize_by_max(&mut fts);

    for (node_id, score) in fts {
        let entry = text.entry(node_id).or_insert(0.0);
        *entry = entry.max(score);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, f64)]) -> SignalMap {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn bm25_only_is_normalized() {
        let out = combine_text_signal(map(&[("a", 4.0), ("b", 2.0)]), None);
        assert_eq!(out["a"], 1.0);
        assert_eq!(out["b"], 0.5);
    }

    #[test]
    fn takes_per_node_maximum_of_both_sources() {
        let fts = vec![("b".to_string(), 10.0), ("c".to_string(), 5.0)];
        let out = combine_text_signal(map(&[("a", 4.0), ("b", 2.0)]), Some(&fts));
        assert_eq!(out["a"], 1.0);
        assert_eq!(out["b"], 1.0);
        assert_eq!(out["c"], 0.5);
    }

    #[test]
    fn ignores_non_positive_full_text_scores() {
        let fts = vec![("x".to_string(), -3.0), ("y".to_string(), f64::NAN)];
        let out = combine_text_signal(map(&[("a", 1.0)]), Some(&fts));
        assert_eq!(out.len(), 1);
    }
}
