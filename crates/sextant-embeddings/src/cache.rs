//! L1 in-memory cache of query vectors using moka.

use std::sync::Arc;
use std::time::Duration;

use moka::sync::Cache;

/// Query-vector cache keyed by blake3 of the text and target dimension.
pub struct QueryVectorCache {
    cache: Cache<String, Arc<Vec<f32>>>,
}

impl QueryVectorCache {
    pub fn new(max_entries: u64, ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .time_to_live(ttl)
            .build();
        Self { cache }
    }

    /// Cache key for a query text at a given dimension.
    pub fn key(text: &str, dims: usize) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(text.as_bytes());
        hasher.update(&[0]);
        hasher.update(&(dims as u64).to_le_bytes());
        hasher.finalize().to_hex().to_string()
    }

    pub fn get(&self, key: &str) -> Option<Arc<Vec<f32>>> {
        self.cache.get(key)
    }

    pub fn insert(&self, key: String, vector: Arc<Vec<f32>>) {
        self.cache.insert(key, vector);
    }

    pub fn clear(&self) {
        self.cache.invalidate_all();
    }
}
