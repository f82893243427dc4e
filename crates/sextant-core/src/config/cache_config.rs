use serde::{Deserialize, Serialize};

use super::defaults;

/// End-to-end query cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub query_ttl_secs: u64,
    pub query_max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            query_ttl_secs: defaults::DEFAULT_QUERY_CACHE_TTL_SECS,
            query_max_capacity: defaults::DEFAULT_QUERY_CACHE_CAPACITY,
        }
    }
}
