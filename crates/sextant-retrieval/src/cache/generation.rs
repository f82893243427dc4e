//! Invalidation generations.
//!
//! Every invalidation advances a counter, either for one graph or (global)
//! for all of them. A search records the generation before it loads
//! artifacts and publishes its result only if no invalidation happened in
//! between. Publishing and advancing exclude each other, so a result
//! computed from pre-invalidation artifacts can never land in the cache
//! after the invalidation cleared it.

use std::sync::{PoisonError, RwLock};

use dashmap::DashMap;

/// Generation observed by a search before it started computing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generation {
    epoch: u64,
    graph: u64,
}

#[derive(Debug, Default)]
pub struct GenerationClock {
    // Bumped by global invalidation.
    epoch: RwLock<u64>,
    graphs: DashMap<String, u64>,
}

impl GenerationClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self, graph_id: &str) -> Generation {
        let epoch = *self.epoch.read().unwrap_or_else(PoisonError::into_inner);
        let graph = self.graphs.get(graph_id).map(|g| *g).unwrap_or(0);
        Generation { epoch, graph }
    }

    /// Run `publish` if `graph_id` is still at generation `seen`. Returns
    /// whether it ran.
    pub fn publish_if_current(
        &self,
        graph_id: &str,
        seen: Generation,
        publish: impl FnOnce(),
    ) -> bool {
        // Lock order: epoch, then the graph's shard.
        let epoch = self.epoch.read().unwrap_or_else(PoisonError::into_inner);
        let graph = self.graphs.entry(graph_id.to_string()).or_insert(0);
        if *epoch != seen.epoch || *graph != seen.graph {
            return false;
        }
        publish();
        true
    }

    /// Advance one graph's generation and run `invalidate` while no
    /// publish for that graph can interleave.
    pub fn advance(&self, graph_id: &str, invalidate: impl FnOnce()) {
        let mut graph = self.graphs.entry(graph_id.to_string()).or_insert(0);
        *graph += 1;
        invalidate();
    }

    /// Advance the global epoch and run `invalidate` while no publish for
    /// any graph can interleave.
    pub fn advance_all(&self, invalidate: impl FnOnce()) {
        let mut epoch = self.epoch.write().unwrap_or_else(PoisonError::into_inner);
        *epoch += 1;
        invalidate();
    }
}
