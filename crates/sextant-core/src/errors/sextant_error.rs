use super::{ConfigError, EmbeddingError, GraphError};

/// Top-level error type for the sextant workspace.
#[derive(Debug, thiserror::Error)]
pub enum SextantError {
    #[error("unknown graph: {graph_id}")]
    UnknownGraph { graph_id: String },

    #[error("query text is empty")]
    EmptyQuery,

    #[error("graph error: {0}")]
    GraphError(#[from] GraphError),

    #[error("embedding error: {0}")]
    EmbeddingError(#[from] EmbeddingError),

    #[error("config error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("concurrency error: {0}")]
    ConcurrencyError(String),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl SextantError {
    /// Whether the caller supplied bad input, as opposed to an internal failure.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::UnknownGraph { .. } | Self::EmptyQuery)
    }
}

/// Convenience alias.
pub type SextantResult<T> = Result<T, SextantError>;
