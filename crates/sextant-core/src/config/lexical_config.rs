use serde::{Deserialize, Serialize};

use super::defaults;

/// Lexical (BM25) index configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LexicalConfig {
    /// Term-frequency saturation.
    pub k1: f64,
    /// Document-length normalization strength.
    pub b: f64,
    /// How many times a query token matching an intent keyword is counted.
    pub amplification_factor: usize,
    /// Shortest stem the suffix stripper may produce.
    pub min_stem_len: usize,
}

impl Default for LexicalConfig {
    fn default() -> Self {
        Self {
            k1: defaults::DEFAULT_BM25_K1,
            b: defaults::DEFAULT_BM25_B,
            amplification_factor: defaults::DEFAULT_AMPLIFICATION_FACTOR,
            min_stem_len: defaults::DEFAULT_MIN_STEM_LEN,
        }
    }
}
