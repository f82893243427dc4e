//! QueryEmbedder: the entry point for turning query text into a vector.
//!
//! Builds the provider chain from config, caches vectors per
//! (text, dimension), and fits every vector to the requested dimension.

use std::sync::Arc;
use std::time::Duration;

use sextant_core::config::EmbeddingConfig;
use sextant_core::errors::SextantResult;
use sextant_core::models::DegradationEvent;
use tracing::{debug, info, warn};

use crate::cache::QueryVectorCache;
use crate::degradation::DegradationChain;
use crate::providers::{ApiProvider, HashedFallback, LocalModelProvider};

/// Pad with zeros or truncate to exactly `dims` values.
pub fn fit_dimensions(mut vector: Vec<f32>, dims: usize) -> Vec<f32> {
    vector.resize(dims, 0.0);
    vector
}

pub struct QueryEmbedder {
    chain: DegradationChain,
    cache: QueryVectorCache,
}

impl QueryEmbedder {
    /// Build the chain: local model (if configured and healthy), external
    /// API (if configured and a key is present), then the hashed fallback.
    pub fn from_config(config: &EmbeddingConfig) -> SextantResult<Self> {
        let timeout = Duration::from_millis(config.request_timeout_ms);
        let mut chain = DegradationChain::new();

        if let Some(endpoint) = &config.local_endpoint {
            let local =
                LocalModelProvider::new(endpoint, &config.local_model, config.dimensions, timeout)?;
            if local.health_check() {
                chain.push(Box::new(local));
            } else {
                info!(endpoint = %endpoint, "local model server not reachable, tier disabled");
            }
        }

        if let Some(endpoint) = &config.api_endpoint {
            match std::env::var(&config.api_key_env) {
                Ok(key) if !key.is_empty() => {
                    chain.push(Box::new(ApiProvider::new(
                        endpoint,
                        &config.api_model,
                        key,
                        config.dimensions,
                        timeout,
                    )?));
                }
                _ => info!(
                    env = %config.api_key_env,
                    "no API key in environment, API tier disabled"
                ),
            }
        }

        chain.push(Box::new(HashedFallback::new(config.dimensions)));

        info!(
            provider = chain.active_provider_name(),
            tiers = chain.len(),
            dims = config.dimensions,
            "QueryEmbedder initialized"
        );
        Ok(Self::with_chain(chain, config))
    }

    /// Use a caller-assembled chain.
    pub fn with_chain(chain: DegradationChain, config: &EmbeddingConfig) -> Self {
        Self {
            chain,
            cache: QueryVectorCache::new(
                config.l1_cache_size,
                Duration::from_secs(config.l1_ttl_secs),
            ),
        }
    }

    /// Query vector at `dims`, or `None` when every provider failed.
    pub fn embed(&self, text: &str, dims: usize) -> Option<Arc<Vec<f32>>> {
        let key = QueryVectorCache::key(text, dims);
        if let Some(hit) = self.cache.get(&key) {
            debug!(dims, "query vector cache hit");
            return Some(hit);
        }

        match self.chain.embed_query(text, dims) {
            Ok(vector) => {
                let vector = Arc::new(vector);
                self.cache.insert(key, Arc::clone(&vector));
                Some(vector)
            }
            Err(e) => {
                warn!(error = %e, "all embedding providers failed, no embedding signal");
                None
            }
        }
    }

    pub fn active_provider_name(&self) -> &str {
        self.chain.active_provider_name()
    }

    pub fn drain_events(&self) -> Vec<DegradationEvent> {
        self.chain.drain_events()
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}
