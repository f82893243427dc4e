//! External embedding API provider.
//!
//! OpenAI-compatible `/v1/embeddings` request shape with bearer auth,
//! per-request timeout, and retry with exponential backoff.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use sextant_core::errors::{EmbeddingError, SextantResult};
use sextant_core::traits::IEmbeddingProvider;
use tracing::{debug, warn};

use super::{blocking_runtime, http_client};

const DEFAULT_MAX_RETRIES: u32 = 2;

pub struct ApiProvider {
    endpoint: String,
    model: String,
    api_key: String,
    dimensions: usize,
    max_retries: u32,
    client: reqwest::Client,
    runtime: tokio::runtime::Runtime,
    available: AtomicBool,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: &'a [String],
    dimensions: usize,
}

#[derive(Deserialize)]
struct EmbedResponse {
    data: Vec<EmbedData>,
}

#[derive(Deserialize)]
struct EmbedData {
    embedding: Vec<f32>,
}

impl ApiProvider {
    pub fn new(
        endpoint: &str,
        model: &str,
        api_key: String,
        dimensions: usize,
        timeout: Duration,
    ) -> SextantResult<Self> {
        Ok(Self {
            endpoint: endpoint.to_string(),
            model: model.to_string(),
            api_key,
            dimensions,
            max_retries: DEFAULT_MAX_RETRIES,
            client: http_client(model, timeout)?,
            runtime: blocking_runtime()?,
            available: AtomicBool::new(true),
        })
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Send with retry. After the last retry fails the provider marks itself
    /// unavailable so later queries skip straight to the next tier.
    fn request_embeddings(&self, texts: &[String]) -> SextantResult<Vec<Vec<f32>>> {
        if !self.is_available() {
            return Err(EmbeddingError::ProviderUnavailable {
                provider: self.model.clone(),
            }
            .into());
        }

        let mut last_err = None;
        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = Duration::from_millis(100 * 2u64.pow(attempt - 1));
                std::thread::sleep(delay);
                debug!(attempt, "retrying API embedding request");
            }

            match self.send_request(texts) {
                Ok(embeddings) => return Ok(embeddings),
                Err(e) => {
                    warn!(attempt, error = %e, "API embedding request failed");
                    last_err = Some(e);
                }
            }
        }

        self.available.store(false, Ordering::Relaxed);
        Err(last_err
            .unwrap_or_else(|| EmbeddingError::InferenceFailed {
                reason: "all retries exhausted".to_string(),
            })
            .into())
    }

    fn send_request(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let request = EmbedRequest {
            model: &self.model,
            input: texts,
            dimensions: self.dimensions,
        };
        let fail = |reason: String| EmbeddingError::RequestFailed {
            provider: self.model.clone(),
            reason,
        };

        self.runtime.block_on(async {
            let response = self
                .client
                .post(&self.endpoint)
                .bearer_auth(&self.api_key)
                .json(&request)
                .send()
                .await
                .map_err(|e| fail(format!("HTTP error: {e}")))?;

            if !response.status().is_success() {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                return Err(fail(format!("API returned {status}: {body}")));
            }

            let parsed: EmbedResponse = response
                .json()
                .await
                .map_err(|e| fail(format!("JSON parse error: {e}")))?;
            let vectors: Vec<Vec<f32>> = parsed.data.into_iter().map(|d| d.embedding).collect();
            Ok::<_, EmbeddingError>(vectors)
        })
    }
}

impl IEmbeddingProvider for ApiProvider {
    fn embed(&self, text: &str) -> SextantResult<Vec<f32>> {
        self.request_embeddings(&[text.to_string()])?
            .into_iter()
            .next()
            .ok_or_else(|| {
                EmbeddingError::InferenceFailed {
                    reason: "empty API response".to_string(),
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exhausted_retries_mark_provider_unavailable() {
        let p = ApiProvider::new(
            "http://127.0.0.1:9/v1/embeddings",
            "test-model",
            "key".to_string(),
            8,
            Duration::from_millis(100),
        )
        .unwrap()
        .with_max_retries(0);
        assert!(p.is_available());
        assert!(p.embed("hello").is_err());
        assert!(!p.is_available());
    }
}
