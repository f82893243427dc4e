//! Local model-server provider.
//!
//! Talks to an Ollama-compatible `/api/embed` endpoint. Unavailable until a
//! health check passes.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use sextant_core::errors::{EmbeddingError, SextantResult};
use sextant_core::traits::IEmbeddingProvider;
use tracing::{debug, warn};

use super::{blocking_runtime, http_client};

pub struct LocalModelProvider {
    base_url: String,
    model: String,
    dimensions: usize,
    client: reqwest::Client,
    runtime: tokio::runtime::Runtime,
    available: AtomicBool,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

impl LocalModelProvider {
    pub fn new(
        base_url: &str,
        model: &str,
        dimensions: usize,
        timeout: Duration,
    ) -> SextantResult<Self> {
        let provider_name = format!("local:{model}");
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            dimensions,
            client: http_client(&provider_name, timeout)?,
            runtime: blocking_runtime()?,
            available: AtomicBool::new(false),
        })
    }

    /// Probe the server and update availability.
    pub fn health_check(&self) -> bool {
        let url = format!("{}/api/tags", self.base_url);
        let result = self
            .runtime
            .block_on(async { self.client.get(&url).send().await });

        let healthy = match result {
            Ok(resp) if resp.status().is_success() => {
                debug!(model = %self.model, "local model health check passed");
                true
            }
            Ok(resp) => {
                warn!(status = %resp.status(), "local model health check failed");
                false
            }
            Err(e) => {
                warn!(error = %e, "local model server unreachable");
                false
            }
        };
        self.available.store(healthy, Ordering::Relaxed);
        healthy
    }

    fn request_embeddings(&self, texts: &[String]) -> SextantResult<Vec<Vec<f32>>> {
        if !self.is_available() {
            return Err(EmbeddingError::ProviderUnavailable {
                provider: self.model.clone(),
            }
            .into());
        }

        let url = format!("{}/api/embed", self.base_url);
        let request = EmbedRequest {
            model: &self.model,
            input: texts,
        };
        let fail = |reason: String| EmbeddingError::RequestFailed {
            provider: self.model.clone(),
            reason,
        };

        let result: Result<Vec<Vec<f32>>, EmbeddingError> = self.runtime.block_on(async {
            let response = self
                .client
                .post(&url)
                .json(&request)
                .send()
                .await
                .map_err(|e| fail(format!("HTTP error: {e}")))?;

            if !response.status().is_success() {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                return Err(fail(format!("server returned {status}: {body}")));
            }

            let parsed: EmbedResponse = response
                .json()
                .await
                .map_err(|e| fail(format!("JSON parse error: {e}")))?;
            Ok::<_, EmbeddingError>(parsed.embeddings)
        });

        Ok(result?)
    }
}

impl IEmbeddingProvider for LocalModelProvider {
    fn embed(&self, text: &str) -> SextantResult<Vec<f32>> {
        self.request_embeddings(&[text.to_string()])?
            .into_iter()
            .next()
            .ok_or_else(|| {
                EmbeddingError::InferenceFailed {
                    reason: "empty local model response".to_string(),
                }
                .into()
            })
    }

    fn embed_batch(&self, texts: &[String]) -> SextantResult<Vec<Vec<f32>>> {
        self.request_embeddings(texts)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        &self.model
    }

    fn is_available(&self) -> bool {
        self.available.load(Ordering::Relaxed)
    }
}
