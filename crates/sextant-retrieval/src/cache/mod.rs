pub mod generation;
pub mod query_cache;
pub mod registry;

pub use generation::{Generation, GenerationClock};
pub use query_cache::{normalize_query, QueryCache, QueryKey};
pub use registry::GraphCacheRegistry;
