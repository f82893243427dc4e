//! # sextant-retrieval
//!
//! Intent-adaptive hybrid search over a knowledge graph.
//!
//! ## Pipeline
//!
//! ```text
//! query ─▶ intent classifier ─▶ profile weights
//!        ├─ lexical (BM25 + full-text) ┐
//!        └─ embedding similarity       ┴─▶ seeds
//!                                        ├─ graph proximity + authority
//!                                        └─ intent edges
//!        ─▶ fusion ─▶ diversity rerank ─▶ query cache
//! ```
//!
//! ## Modules
//!
//! - `intent`: regex cascade classifier
//! - `fusion`: weighted combination of the four signals
//! - `diversity`: first-of-community boost
//! - `cache`: query cache and per-graph artifact registry
//! - `engine`: `RetrievalEngine`
//! - `tracing_setup`: subscriber initialization

pub mod cache;
pub mod diversity;
pub mod engine;
pub mod fusion;
pub mod intent;
pub mod tracing_setup;

pub use cache::{GraphCacheRegistry, QueryCache, QueryKey};
pub use diversity::diversify;
pub use engine::{EngineStats, GraphArtifacts, RetrievalEngine};
pub use fusion::{fuse, SignalSet};
pub use intent::IntentClassifier;
