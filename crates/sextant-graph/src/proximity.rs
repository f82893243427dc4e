//! Graph proximity boost around the query's seed nodes.

use std::collections::HashSet;

use sextant_core::config::GraphConfig;
use sextant_core::signals::{normalize_by_max, top_k, SignalMap};
use sextant_core::{EdgeTypeWeights, Intent};
use tracing::debug;

use crate::authority::AuthorityScores;
use crate::snapshot::GraphSnapshot;

/// Spreads seed relevance over typed edges and blends in authority.
///
/// Outgoing hops score `type_weight × forward_hop_factor` on the target,
/// incoming hops `type_weight × backward_hop_factor` on the source. Intents
/// listed in `two_hop_intents` additionally credit the neighbours of the
/// strongest 1-hop nodes.
pub struct ProximityBooster<'a> {
    snapshot: &'a GraphSnapshot,
    weights: &'a EdgeTypeWeights,
    config: &'a GraphConfig,
}

impl<'a> ProximityBooster<'a> {
    pub fn new(
        snapshot: &'a GraphSnapshot,
        weights: &'a EdgeTypeWeights,
        config: &'a GraphConfig,
    ) -> Self {
        Self {
            snapshot,
            weights,
            config,
        }
    }

    /// Raw (unnormalized) proximity from the seeds.
    pub fn proximity(&self, seeds: &[String], intent: Intent) -> SignalMap {
        let mut prox = SignalMap::new();
        for seed in seeds {
            for (target, edge) in self.snapshot.outgoing(seed) {
                *prox.entry(target.to_string()).or_insert(0.0) +=
                    self.weights.weight(&edge.edge_type) * self.config.forward_hop_factor;
            }
            for (source, edge) in self.snapshot.incoming(seed) {
                *prox.entry(source.to_string()).or_insert(0.0) +=
                    self.weights.weight(&edge.edge_type) * self.config.backward_hop_factor;
            }
        }

        if self.config.two_hop_intents.contains(&intent) {
            let increment = self.config.two_hop_increment();
            let frontier = top_k(&prox, self.config.two_hop_frontier);
            for node in &frontier {
                let neighbours = self
                    .snapshot
                    .outgoing(node)
                    .chain(self.snapshot.incoming(node))
                    .map(|(id, _)| id);
                for id in neighbours {
                    *prox.entry(id.to_string()).or_insert(0.0) += increment;
                }
            }
        }
        prox
    }

    /// Blended `[0, 1]` graph signal over the candidate set: the seeds,
    /// every node reached by traversal, and `extra_candidates`.
    pub fn boost(
        &self,
        seeds: &[String],
        intent: Intent,
        authority: &AuthorityScores,
        extra_candidates: &[&str],
    ) -> SignalMap {
        let mut prox = self.proximity(seeds, intent);
        normalize_by_max(&mut prox);

        let authority_max = authority.max();
        let mut candidates: HashSet<&str> = prox.keys().map(String::as_str).collect();
        candidates.extend(seeds.iter().map(String::as_str));
        candidates.extend(extra_candidates.iter().copied());

        let mut blended: SignalMap = candidates
            .into_iter()
            .filter(|id| self.snapshot.node(id).is_some())
            .map(|id| {
                let p = prox.get(id).copied().unwrap_or(0.0);
                let a = if authority_max > 0.0 {
                    authority.get(id) / authority_max
                } else {
                    0.0
                };
                let score = self.config.proximity_blend * p + self.config.authority_blend * a;
                (id.to_string(), score)
            })
            .filter(|(_, score)| *score > 0.0)
            .collect();
        normalize_by_max(&mut blended);

        debug!(
            graph_id = self.snapshot.graph_id(),
            seeds = seeds.len(),
            reached = prox.len(),
            scored = blended.len(),
            %intent,
            "graph proximity computed"
        );
        blended
    }
}
