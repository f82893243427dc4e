//! Per-graph BM25 index over node documents.

use std::collections::HashMap;

use rayon::prelude::*;
use sextant_core::config::LexicalConfig;
use sextant_core::{Node, SignalMap};
use tracing::debug;

use crate::tokenizer::Analyzer;

/// Postings-based BM25 index, built once per graph snapshot.
#[derive(Debug, Clone)]
pub struct LexicalIndex {
    doc_ids: Vec<String>,
    doc_lengths: Vec<usize>,
    /// term → (doc ordinal, term frequency)
    postings: HashMap<String, Vec<(usize, u32)>>,
    avg_doc_len: f64,
    k1: f64,
    b: f64,
}

impl LexicalIndex {
    /// Index the searchable text of every node.
    pub fn build(nodes: &[Node], analyzer: &Analyzer, config: &LexicalConfig) -> Self {
        let analyzed: Vec<Vec<String>> = nodes
            .par_iter()
            .map(|node| {
                node.searchable_text()
                    .into_iter()
                    .flat_map(|part| analyzer.analyze(part))
                    .collect()
            })
            .collect();

        let mut postings: HashMap<String, Vec<(usize, u32)>> = HashMap::new();
        let mut doc_lengths = Vec::with_capacity(nodes.len());
        for (ordinal, tokens) in analyzed.iter().enumerate() {
            doc_lengths.push(tokens.len());
            let mut tf: HashMap<&str, u32> = HashMap::new();
            for token in tokens {
                *tf.entry(token.as_str()).or_insert(0) += 1;
            }
            for (term, count) in tf {
                postings
                    .entry(term.to_string())
                    .or_default()
                    .push((ordinal, count));
            }
        }

        let total_len: usize = doc_lengths.iter().sum();
        let avg_doc_len = if nodes.is_empty() {
            1.0
        } else {
            (total_len as f64 / nodes.len() as f64).max(1.0)
        };

        debug!(
            docs = nodes.len(),
            terms = postings.len(),
            avg_doc_len,
            "lexical index built"
        );

        Self {
            doc_ids: nodes.iter().map(|n| n.id.clone()).collect(),
            doc_lengths,
            postings,
            avg_doc_len,
            k1: config.k1,
            b: config.b,
        }
    }

    /// Raw BM25 score per matching node. Repeated query tokens contribute once per occurrence.
    pub fn score(&self, query_tokens: &[String]) -> SignalMap {
        let mut occurrences: HashMap<&str, usize> = HashMap::new();
        for token in query_tokens {
            *occurrences.entry(token.as_str()).or_insert(0) += 1;
        }

        let n = self.doc_ids.len() as f64;
        let mut scores: HashMap<usize, f64> = HashMap::new();
        for (term, times) in occurrences {
            let Some(posting) = self.postings.get(term) else {
                continue;
            };
            let df = posting.len() as f64;
            let idf = ((n - df + 0.5) / (df + 0.5)).ln_1p();
            for &(doc, tf) in posting {
                let tf = f64::from(tf);
                let length_norm =
                    self.b.mul_add(self.doc_lengths[doc] as f64 / self.avg_doc_len, 1.0 - self.b);
                let denom = self.k1.mul_add(length_norm, tf);
                if denom > 0.0 {
                    *scores.entry(doc).or_insert(0.0) +=
                        times as f64 * idf * (tf * (self.k1 + 1.0) / denom);
                }
            }
        }

        scores
            .into_iter()
            .filter(|(_, s)| *s > 0.0)
            .map(|(doc, s)| (self.doc_ids[doc].clone(), s))
            .collect()
    }

    pub fn doc_count(&self) -> usize {
        self.doc_ids.len()
    }

    pub fn term_count(&self) -> usize {
        self.postings.len()
    }

    pub fn doc_freq(&self, term: &str) -> usize {
        self.postings.get(term).map_or(0, Vec::len)
    }

    pub fn avg_doc_len(&self) -> f64 {
        self.avg_doc_len
    }
}
