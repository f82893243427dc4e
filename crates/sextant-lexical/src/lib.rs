//! # sextant-lexical
//!
//! Lexical relevance for one graph snapshot.
//!
//! ```text
//! Analyzer
//! ├── tokenize     lowercase, split on non-word characters
//! └── SuffixStemmer longest-suffix-first stripping, minimum stem length
//! LexicalIndex     BM25 over node documents (postings + doc lengths)
//! KeywordAmplifier intent keyword tokens repeated in the query stream
//! text_signal      BM25 ∨ store full-text, each normalized by its max
//! ```

pub mod amplification;
pub mod index;
pub mod stemmer;
pub mod text_signal;
pub mod tokenizer;

pub use amplification::KeywordAmplifier;
pub use index::LexicalIndex;
pub use stemmer::SuffixStemmer;
pub use text_signal::combine_text_signal;
pub use tokenizer::{tokenize, Analyzer};
