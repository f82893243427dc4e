use sextant_core::config::LexicalConfig;

use crate::stemmer::SuffixStemmer;

/// Lowercase and split on anything that is not a letter, digit, or underscore.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Tokenizer + stemmer. Index documents and queries go through the same analyzer.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    stemmer: SuffixStemmer,
}

impl Analyzer {
    pub fn new(config: &LexicalConfig) -> Self {
        Self {
            stemmer: SuffixStemmer::new(config.min_stem_len),
        }
    }

    pub fn analyze(&self, text: &str) -> Vec<String> {
        tokenize(text)
            .into_iter()
            .map(|t| self.stemmer.stem(&t))
            .collect()
    }

    pub fn stemmer(&self) -> &SuffixStemmer {
        &self.stemmer
    }
}
