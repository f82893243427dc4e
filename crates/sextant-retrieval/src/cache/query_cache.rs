//! Query-result cache: moka sync cache with TTL and per-graph invalidation.

use std::sync::Arc;
use std::time::Duration;

use moka::sync::Cache;
use sextant_core::config::CacheConfig;
use sextant_core::{Intent, SearchMode, SearchResponse};
use tracing::{debug, warn};

/// Cache key. The graph id is kept in the clear so entries can be
/// invalidated per graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub graph_id: String,
    pub digest: String,
}

impl QueryKey {
    /// `blake3(graph_id ‖ normalized query ‖ mode ‖ intent)`, plus the raw
    /// bytes of a caller-supplied query vector when there is one.
    pub fn new(
        graph_id: &str,
        query: &str,
        mode: SearchMode,
        intent: Intent,
        query_vector: Option<&[f32]>,
    ) -> Self {
        let normalized = normalize_query(query);
        let mut hasher = blake3::Hasher::new();
        for part in [graph_id, normalized.as_str(), mode.as_str(), intent.as_str()] {
            hasher.update(part.as_bytes());
            hasher.update(&[0]);
        }
        if let Some(vector) = query_vector {
            for v in vector {
                hasher.update(&v.to_le_bytes());
            }
        }
        Self {
            graph_id: graph_id.to_string(),
            digest: hasher.finalize().to_hex().to_string(),
        }
    }
}

/// Trim, lowercase, collapse internal whitespace.
pub fn normalize_query(query: &str) -> String {
    query
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

pub struct QueryCache {
    cache: Cache<QueryKey, Arc<SearchResponse>>,
}

impl QueryCache {
    pub fn new(config: &CacheConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.query_max_capacity)
            .time_to_live(Duration::from_secs(config.query_ttl_secs))
            .support_invalidation_closures()
            .build();
        Self { cache }
    }

    pub fn get(&self, key: &QueryKey) -> Option<Arc<SearchResponse>> {
        self.cache.get(key)
    }

    pub fn insert(&self, key: QueryKey, response: Arc<SearchResponse>) {
        self.cache.insert(key, response);
    }

    /// Drop every entry for one graph.
    pub fn invalidate_graph(&self, graph_id: &str) {
        let target = graph_id.to_string();
        if let Err(e) = self
            .cache
            .invalidate_entries_if(move |key, _| key.graph_id == target)
        {
            warn!(error = %e, graph_id, "targeted invalidation refused, clearing all queries");
            self.cache.invalidate_all();
            return;
        }
        debug!(graph_id, "query cache invalidated for graph");
    }

    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
        debug!("query cache cleared");
    }

    /// Entry count after pending maintenance has run.
    pub fn entry_count(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_ignores_case_and_spacing() {
        assert_eq!(normalize_query("  Query   CACHE\tkey "), "query cache key");
        let a = QueryKey::new("g", "Query  cache", SearchMode::Hybrid, Intent::General, None);
        let b = QueryKey::new("g", "query cache ", SearchMode::Hybrid, Intent::General, None);
        assert_eq!(a, b);
    }

    #[test]
    fn key_separates_graph_mode_intent_and_vector() {
        let base = QueryKey::new("g", "q", SearchMode::Hybrid, Intent::General, None);
        let others = [
            QueryKey::new("h", "q", SearchMode::Hybrid, Intent::General, None),
            QueryKey::new("g", "q", SearchMode::Lexical, Intent::General, None),
            QueryKey::new("g", "q", SearchMode::Hybrid, Intent::Debugging, None),
            QueryKey::new("g", "q", SearchMode::Hybrid, Intent::General, Some(&[0.5, 0.5])),
        ];
        for other in others {
            assert_ne!(base.digest, other.digest);
        }
    }
}
