use serde::{Deserialize, Serialize};

use super::defaults;

/// Query-embedding configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Target dimensionality of query vectors.
    pub dimensions: usize,
    /// Local model server. `None` disables the local tier.
    pub local_endpoint: Option<String>,
    pub local_model: String,
    /// External embedding API. `None` disables the API tier.
    pub api_endpoint: Option<String>,
    pub api_model: String,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    /// Per-request timeout for HTTP providers.
    pub request_timeout_ms: u64,
    /// Query-vector L1 cache.
    pub l1_cache_size: u64,
    pub l1_ttl_secs: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            dimensions: defaults::DEFAULT_EMBEDDING_DIMENSIONS,
            local_endpoint: Some(defaults::DEFAULT_LOCAL_ENDPOINT.to_string()),
            local_model: defaults::DEFAULT_LOCAL_MODEL.to_string(),
            api_endpoint: None,
            api_model: defaults::DEFAULT_API_MODEL.to_string(),
            api_key_env: defaults::DEFAULT_API_KEY_ENV.to_string(),
            request_timeout_ms: defaults::DEFAULT_REQUEST_TIMEOUT_MS,
            l1_cache_size: defaults::DEFAULT_L1_CACHE_SIZE,
            l1_ttl_secs: defaults::DEFAULT_L1_TTL_SECS,
        }
    }
}
