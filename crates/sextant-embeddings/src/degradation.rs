//! Fallback chain for query embedding.
//!
//! Chain: local model → external API → hashed fallback → no signal.
//! Every fallback is recorded as a degradation event.

use std::sync::Mutex;

use sextant_core::errors::{EmbeddingError, SextantResult};
use sextant_core::models::DegradationEvent;
use sextant_core::traits::IEmbeddingProvider;
use tracing::warn;

use crate::engine::fit_dimensions;

/// Tries providers in order. On failure, records a degradation event and
/// moves to the next provider.
pub struct DegradationChain {
    chain: Vec<Box<dyn IEmbeddingProvider>>,
    events: Mutex<Vec<DegradationEvent>>,
}

impl Default for DegradationChain {
    fn default() -> Self {
        Self::new()
    }
}

impl DegradationChain {
    pub fn new() -> Self {
        Self {
            chain: Vec::new(),
            events: Mutex::new(Vec::new()),
        }
    }

    /// Add a provider to the end of the chain.
    pub fn push(&mut self, provider: Box<dyn IEmbeddingProvider>) {
        self.chain.push(provider);
    }

    /// Embed with the first provider that succeeds. Returns the vector and
    /// the provider's name.
    pub fn embed(&self, text: &str) -> SextantResult<(Vec<f32>, &str)> {
        let mut last_error = None;

        for (i, provider) in self.chain.iter().enumerate() {
            if !provider.is_available() {
                continue;
            }

            match provider.embed(text) {
                Ok(vec) => {
                    if i > 0 {
                        let primary = self.chain.first().map(|p| p.name()).unwrap_or("unknown");
                        self.record(DegradationEvent::now(
                            "embeddings",
                            format!("{primary} unavailable"),
                            provider.name(),
                        ));
                    }
                    return Ok((vec, provider.name()));
                }
                Err(e) => {
                    warn!(
                        provider = provider.name(),
                        error = %e,
                        "provider failed, trying next in chain"
                    );
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            EmbeddingError::ProviderUnavailable {
                provider: "all providers exhausted".to_string(),
            }
            .into()
        }))
    }

    /// Embed and pad with zeros or truncate to exactly `dims` values.
    pub fn embed_query(&self, text: &str, dims: usize) -> SextantResult<Vec<f32>> {
        let (vec, _) = self.embed(text)?;
        Ok(fit_dimensions(vec, dims))
    }

    /// Name of the first available provider.
    pub fn active_provider_name(&self) -> &str {
        self.chain
            .iter()
            .find(|p| p.is_available())
            .map(|p| p.name())
            .unwrap_or("none")
    }

    /// Drain accumulated degradation events.
    pub fn drain_events(&self) -> Vec<DegradationEvent> {
        self.events
            .lock()
            .map(|mut events| std::mem::take(&mut *events))
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    fn record(&self, event: DegradationEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}
