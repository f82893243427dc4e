//! # sextant-core
//!
//! Foundation crate for the sextant retrieval engine.
//! Defines the graph data model, the intent taxonomy and its tables,
//! collaborator traits, errors, and config.
//! Every other crate in the workspace depends on this.
//!
//! ```text
//! sextant-core
//! ├── config      SextantConfig + per-subsystem sections, defaults
//! ├── errors      SextantError and subsystem error enums
//! ├── intent      Intent taxonomy, profiles, edge map, keyword sets
//! ├── models      Node, Edge, search request/response types
//! ├── schema      SchemaProfile field resolution for raw records
//! ├── signals     signal-map helpers (normalize, top-k)
//! ├── traits      IGraphAccessor, IEmbeddingProvider
//! └── weights     EdgeTypeWeights table
//! ```

pub mod config;
pub mod errors;
pub mod intent;
pub mod models;
pub mod schema;
pub mod signals;
pub mod traits;
pub mod weights;

// Re-export the most commonly used types at the crate root.
pub use config::SextantConfig;
pub use errors::{SextantError, SextantResult};
pub use intent::{Intent, IntentEdgeMap, IntentProfile, IntentProfiles};
pub use models::{Edge, Node, ScoredNode, SearchMode, SearchResponse, SignalBreakdown};
pub use signals::SignalMap;
pub use weights::EdgeTypeWeights;
