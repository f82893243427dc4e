//! # sextant-embeddings
//!
//! Semantic similarity between a query and every node of a graph.
//!
//! ## Architecture
//!
//! ```text
//! EmbeddingMatrix (per graph)
//! └── similarities: one matrix-vector product, divided by row × query norms
//! QueryEmbedder
//! ├── QueryVectorCache (moka L1, blake3(text, dims) keys)
//! └── DegradationChain (provider fallback)
//!     ├── LocalModelProvider (local model server)
//!     ├── ApiProvider (external embedding API)
//!     └── HashedFallback (always available)
//! ```

pub mod cache;
pub mod degradation;
pub mod engine;
pub mod providers;
pub mod similarity;

pub use cache::QueryVectorCache;
pub use degradation::DegradationChain;
pub use engine::{fit_dimensions, QueryEmbedder};
pub use providers::{ApiProvider, HashedFallback, LocalModelProvider};
pub use similarity::EmbeddingMatrix;
