//! Suffix-stripping stemmer.
//!
//! Suffixes are tried longest first; the first one that matches and leaves
//! at least `min_len` characters is removed. At most one suffix is removed.

use sextant_core::config::defaults::DEFAULT_MIN_STEM_LEN;

const SUFFIXES: &[&str] = &[
    "ization", "ational", "fulness", "iveness", "ousness", "ations", "ation", "ement", "ments",
    "ities", "ions", "ness", "ment", "ible", "able", "ally", "ings", "izer", "ized", "izes", "ize",
    "ise", "ity", "ive", "ing", "ies", "ful", "ous", "ion", "ers", "ed", "er", "es", "ly",
    "al", "s",
];

#[derive(Debug, Clone)]
pub struct SuffixStemmer {
    suffixes: Vec<&'static str>,
    min_len: usize,
}

impl Default for SuffixStemmer {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_STEM_LEN)
    }
}

impl SuffixStemmer {
    pub fn new(min_len: usize) -> Self {
        let mut suffixes = SUFFIXES.to_vec();
        // stable: equal-length suffixes keep table order
        suffixes.sort_by(|a, b| b.len().cmp(&a.len()));
        Self { suffixes, min_len }
    }

    /// Stem a lowercase token.
    pub fn stem(&self, word: &str) -> String {
        let char_len = word.chars().count();
        for suffix in &self.suffixes {
            if let Some(stem) = word.strip_suffix(suffix) {
                if char_len - suffix.len() >= self.min_len {
                    return stem.to_string();
                }
            }
        }
        word.to_string()
    }

    pub fn min_len(&self) -> usize {
        self.min_len
    }
}
