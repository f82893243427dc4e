//! Property tests for the stemmer, tokenizer, and BM25 index.

use proptest::prelude::*;
use sextant_core::config::LexicalConfig;
use sextant_core::Node;
use sextant_lexical::{tokenize, Analyzer, LexicalIndex, SuffixStemmer};

fn word() -> impl Strategy<Value = String> {
    "[a-z]{1,14}"
}

fn documents() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z ]{0,40}", 1..12)
}

proptest! {
    #[test]
    fn stem_is_never_shorter_than_minimum_unless_input_was(w in word()) {
        let stemmer = SuffixStemmer::default();
        let stem = stemmer.stem(&w);
        if stem != w {
            prop_assert!(stem.chars().count() >= 3);
            prop_assert!(w.starts_with(&stem));
        }
    }

    #[test]
    fn tokens_are_word_characters_only(text in ".{0,80}") {
        for token in tokenize(&text) {
            prop_assert!(!token.is_empty());
            prop_assert!(token.chars().all(|c| c.is_alphanumeric() || c == '_'));
        }
    }

    #[test]
    fn bm25_scores_are_positive_and_only_for_matching_docs(
        docs in documents(), query in "[a-z ]{1,30}",
    ) {
        let nodes: Vec<Node> = docs
            .iter()
            .enumerate()
            .map(|(i, text)| Node::new(format!("n{i}"), text.clone(), "doc"))
            .collect();
        let analyzer = Analyzer::default();
        let index = LexicalIndex::build(&nodes, &analyzer, &LexicalConfig::default());
        let query_tokens = analyzer.analyze(&query);
        let scores = index.score(&query_tokens);
        for (id, score) in &scores {
            prop_assert!(*score > 0.0);
            let ordinal: usize = id[1..].parse().unwrap();
            let doc_tokens = analyzer.analyze(&format!("{} doc", docs[ordinal]));
            prop_assert!(query_tokens.iter().any(|t| doc_tokens.contains(t)));
        }
    }
}
