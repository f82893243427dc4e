mod api_provider;
mod hashed_fallback;
mod local_provider;

use std::time::Duration;

pub use api_provider::ApiProvider;
pub use hashed_fallback::HashedFallback;
pub use local_provider::LocalModelProvider;

use sextant_core::errors::{EmbeddingError, SextantResult};

/// Current-thread runtime for driving async HTTP from the sync provider trait.
pub(crate) fn blocking_runtime() -> SextantResult<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| {
            EmbeddingError::InferenceFailed {
                reason: format!("runtime error: {e}"),
            }
            .into()
        })
}

pub(crate) fn http_client(provider: &str, timeout: Duration) -> SextantResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| {
            EmbeddingError::RequestFailed {
                provider: provider.to_string(),
                reason: format!("client build failed: {e}"),
            }
            .into()
        })
}
