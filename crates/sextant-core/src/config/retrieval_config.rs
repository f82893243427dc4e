use serde::{Deserialize, Serialize};

use super::defaults;
use crate::intent::Intent;

/// Retrieval pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Intent used when no classification rule fires.
    pub default_intent: Intent,
    /// Queries with more words than this and no rule match are broad_semantic.
    pub broad_semantic_min_words: usize,
    /// Top-k lexical and top-k embedding results used as graph seeds.
    pub seed_top_k: usize,
    /// Multiplier applied to the first result of each unseen community.
    pub diversity_boost: f64,
    /// Diversity reranking only runs with strictly more results than this.
    pub diversity_min_results: usize,
    /// Result limit passed to the accessor's full-text search.
    pub full_text_limit: usize,
    /// Truncate responses to this many results. `None` keeps every candidate.
    pub max_results: Option<usize>,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            default_intent: Intent::General,
            broad_semantic_min_words: defaults::DEFAULT_BROAD_SEMANTIC_MIN_WORDS,
            seed_top_k: defaults::DEFAULT_SEED_TOP_K,
            diversity_boost: defaults::DEFAULT_DIVERSITY_BOOST,
            diversity_min_results: defaults::DEFAULT_DIVERSITY_MIN_RESULTS,
            full_text_limit: defaults::DEFAULT_FULL_TEXT_LIMIT,
            max_results: None,
        }
    }
}
