//! Weighted fusion of the four per-node signals.

use std::collections::BTreeSet;

use sextant_core::signals::{rank_order, SignalMap};
use sextant_core::{IntentProfile, ScoredNode, SignalBreakdown};

/// The signals computed for one query. Absent entries count as 0.
#[derive(Debug, Clone, Default)]
pub struct SignalSet {
    pub embedding: SignalMap,
    pub text: SignalMap,
    pub graph: SignalMap,
    pub intent: SignalMap,
}

impl SignalSet {
    pub fn breakdown(&self, node_id: &str) -> SignalBreakdown {
        let get = |m: &SignalMap| m.get(node_id).copied().unwrap_or(0.0);
        SignalBreakdown {
            embedding: get(&self.embedding),
            text: get(&self.text),
            graph: get(&self.graph),
            intent: get(&self.intent),
        }
    }

    /// Every node with a positive value in at least one signal.
    pub fn candidates(&self) -> BTreeSet<&str> {
        [&self.embedding, &self.text, &self.graph, &self.intent]
            .into_iter()
            .flat_map(|m| m.iter())
            .filter(|(_, v)| **v > 0.0)
            .map(|(id, _)| id.as_str())
            .collect()
    }
}

/// `score = α·emb + β·text + γ·graph + δ·intent` for every candidate,
/// sorted descending with ties broken by node id. Candidates whose fused
/// score is not positive are dropped. `name_of` resolves display names.
pub fn fuse<'a>(
    signals: &SignalSet,
    weights: &IntentProfile,
    name_of: impl Fn(&str) -> Option<&'a str>,
) -> Vec<ScoredNode> {
    let mut results: Vec<ScoredNode> = signals
        .candidates()
        .into_iter()
        .filter_map(|id| {
            let per_signal = signals.breakdown(id);
            let score = per_signal.fuse(weights);
            (score > 0.0).then(|| ScoredNode {
                node_id: id.to_string(),
                name: name_of(id).unwrap_or(id).to_string(),
                score,
                per_signal,
                method: per_signal.method_tag(),
            })
        })
        .collect();
    sort_results(&mut results);
    results
}

/// Descending by score, ties by node id ascending.
pub fn sort_results(results: &mut [ScoredNode]) {
    results.sort_by(|a, b| rank_order((a.node_id.as_str(), a.score), (b.node_id.as_str(), b.score)));
}
