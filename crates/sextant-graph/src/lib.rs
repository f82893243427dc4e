//! # sextant-graph
//!
//! Structure-derived relevance over a read-only graph snapshot.
//!
//! ## Architecture
//!
//! ```text
//! GraphSnapshot (petgraph StableGraph + id index)
//! ├── authority         PageRank with retry, uniform fallback
//! ├── community         greedy modularity (CNM) partition
//! ├── proximity         edge-type-weighted 1–2 hop boost + authority blend
//! └── intent_edges      traversal over the intent's edge types
//! ```

pub mod authority;
pub mod community;
pub mod intent_edges;
pub mod proximity;
pub mod snapshot;

pub use authority::AuthorityScores;
pub use community::CommunityAssignment;
pub use intent_edges::score_intent_edges;
pub use proximity::ProximityBooster;
pub use snapshot::{GraphSnapshot, SnapshotEdge};
