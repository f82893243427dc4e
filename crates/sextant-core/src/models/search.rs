use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::intent::{Intent, IntentProfile};

/// Which signals a search computes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    /// All four signals under the intent's profile.
    #[default]
    Hybrid,
    /// Text signal only.
    Lexical,
    /// Embedding signal only.
    Embedding,
}

impl SearchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hybrid => "hybrid",
            Self::Lexical => "lexical",
            Self::Embedding => "embedding",
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-signal scores of one node, each in [0, 1].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SignalBreakdown {
    pub embedding: f64,
    pub text: f64,
    pub graph: f64,
    pub intent: f64,
}

impl SignalBreakdown {
    /// Weighted sum under a profile.
    pub fn fuse(&self, weights: &IntentProfile) -> f64 {
        weights.embedding * self.embedding
            + weights.text * self.text
            + weights.graph * self.graph
            + weights.intent * self.intent
    }

    /// `+`-joined names of the non-zero signals, in text, embedding, graph, intent order.
    pub fn method_tag(&self) -> String {
        let tag: Vec<&str> = [
            ("text", self.text),
            ("embedding", self.embedding),
            ("graph", self.graph),
            ("intent", self.intent),
        ]
        .into_iter()
        .filter(|(_, v)| *v > 0.0)
        .map(|(name, _)| name)
        .collect();
        if tag.is_empty() {
            "none".to_string()
        } else {
            tag.join("+")
        }
    }
}

/// One ranked result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredNode {
    pub node_id: String,
    pub name: String,
    pub score: f64,
    pub per_signal: SignalBreakdown,
    pub method: String,
}

/// How the authority scores used by a search were produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AuthorityOutcome {
    /// PageRank converged on the given attempt (1 or 2).
    Converged { attempt: u8, iterations: usize },
    /// Graph too sparse; uniform scores.
    Skipped,
    /// Neither attempt converged; uniform scores.
    Degraded,
    /// The search mode did not need authority.
    NotComputed,
}

/// Final payload of a search, as stored in the query cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub graph_id: String,
    pub query: String,
    pub mode: SearchMode,
    pub intent: Intent,
    pub weights: IntentProfile,
    pub results: Vec<ScoredNode>,
    pub authority: AuthorityOutcome,
    /// Number of communities used for diversity, if a partition existed.
    pub communities: Option<usize>,
    pub cached_at: DateTime<Utc>,
}
