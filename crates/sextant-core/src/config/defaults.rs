// Single source of truth for all default values.

// --- Retrieval ---
pub const DEFAULT_BROAD_SEMANTIC_MIN_WORDS: usize = 10;
pub const DEFAULT_SEED_TOP_K: usize = 10;
pub const DEFAULT_DIVERSITY_BOOST: f64 = 1.05;
pub const DEFAULT_DIVERSITY_MIN_RESULTS: usize = 3;
pub const DEFAULT_FULL_TEXT_LIMIT: usize = 100;

// --- Lexical ---
pub const DEFAULT_BM25_K1: f64 = 1.2;
pub const DEFAULT_BM25_B: f64 = 0.75;
pub const DEFAULT_AMPLIFICATION_FACTOR: usize = 5;
pub const DEFAULT_MIN_STEM_LEN: usize = 3;

// --- Graph ---
pub const DEFAULT_UNKNOWN_EDGE_WEIGHT: f64 = 0.25;
pub const DEFAULT_FORWARD_HOP_FACTOR: f64 = 1.0;
pub const DEFAULT_BACKWARD_HOP_FACTOR: f64 = 0.7;
pub const DEFAULT_TWO_HOP_FACTOR: f64 = 0.5;
pub const DEFAULT_TWO_HOP_DECAY: f64 = 0.3;
pub const DEFAULT_TWO_HOP_FRONTIER: usize = 20;
pub const DEFAULT_PROXIMITY_BLEND: f64 = 0.7;
pub const DEFAULT_AUTHORITY_BLEND: f64 = 0.3;
pub const DEFAULT_INTENT_FORWARD: f64 = 1.0;
pub const DEFAULT_INTENT_BACKWARD: f64 = 0.7;

// --- Authority (PageRank) ---
pub const DEFAULT_AUTHORITY_MIN_EDGES: usize = 20;
pub const DEFAULT_DAMPING: f64 = 0.85;
pub const DEFAULT_FIRST_MAX_ITERATIONS: usize = 100;
pub const DEFAULT_FIRST_TOLERANCE: f64 = 1e-6;
pub const DEFAULT_SECOND_MAX_ITERATIONS: usize = 1_000;
pub const DEFAULT_SECOND_TOLERANCE: f64 = 1e-4;

// --- Community ---
pub const DEFAULT_COMMUNITY_MIN_EDGES: usize = 10;

// --- Embeddings ---
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 384;
pub const DEFAULT_LOCAL_ENDPOINT: &str = "http://localhost:11434";
pub const DEFAULT_LOCAL_MODEL: &str = "all-minilm";
pub const DEFAULT_API_MODEL: &str = "text-embedding-3-small";
pub const DEFAULT_API_KEY_ENV: &str = "SEXTANT_EMBEDDING_API_KEY";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 2_000;
pub const DEFAULT_L1_CACHE_SIZE: u64 = 10_000;
pub const DEFAULT_L1_TTL_SECS: u64 = 3_600; // 1 hour

// --- Query cache ---
pub const DEFAULT_QUERY_CACHE_TTL_SECS: u64 = 300; // 5 minutes
pub const DEFAULT_QUERY_CACHE_CAPACITY: u64 = 10_000;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_LOG_JSON: bool = true;

// --- Profiles ---
/// Allowed deviation of a profile's weight sum from 1.0.
pub const PROFILE_SUM_TOLERANCE: f64 = 1e-6;
