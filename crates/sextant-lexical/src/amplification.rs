use std::collections::HashSet;

use sextant_core::intent::{keywords_for, Intent};

use crate::tokenizer::Analyzer;

/// Repeats query tokens that are keywords of the classified intent.
///
/// BM25 sums over query tokens, so a keyword repeated `factor` times
/// contributes `factor` times its single-occurrence score.
#[derive(Debug, Clone)]
pub struct KeywordAmplifier {
    /// Stemmed keywords, indexed by `Intent::index`.
    keywords: Vec<HashSet<String>>,
    factor: usize,
}

impl KeywordAmplifier {
    pub fn new(analyzer: &Analyzer, factor: usize) -> Self {
        let keywords = Intent::ALL
            .iter()
            .map(|intent| {
                keywords_for(*intent)
                    .iter()
                    .flat_map(|kw| analyzer.analyze(kw))
                    .collect()
            })
            .collect();
        Self {
            keywords,
            factor: factor.max(1),
        }
    }

    pub fn is_keyword(&self, intent: Intent, stemmed_token: &str) -> bool {
        self.keywords[intent.index()].contains(stemmed_token)
    }

    /// Expand the analyzed query: keyword tokens appear `factor` times, others once.
    pub fn amplify(&self, tokens: &[String], intent: Intent) -> Vec<String> {
        let keywords = &self.keywords[intent.index()];
        let mut out = Vec::with_capacity(tokens.len());
        for token in tokens {
            let copies = if keywords.contains(token) { self.factor } else { 1 };
            out.extend(std::iter::repeat(token.clone()).take(copies));
        }
        out
    }
}
