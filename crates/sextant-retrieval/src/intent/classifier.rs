//! Query intent classification: an ordered cascade of regex rules, then a
//! length heuristic, then the configured default.

use std::sync::LazyLock;

use regex::Regex;
use sextant_core::config::RetrievalConfig;
use sextant_core::Intent;
use tracing::debug;

macro_rules! intent_pattern {
    ($name:ident, $regex_str:expr) => {
        static $name: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new($regex_str).ok());
    };
}

// Quoted spans, or identifier-shaped tokens: camelCase, snake_case,
// dotted.path, rust::path, ALL_CAPS.
intent_pattern!(
    RE_EXACT_MATCH,
    r#"(?x)
      "[^"]+"
    | (?:^|\s)'[^'\s][^']*'
    | `[^`]+`
    | \b[a-z][a-z0-9]*[A-Z][A-Za-z0-9]*\b
    | \b[A-Za-z0-9]+_[A-Za-z0-9_]+\b
    | \b[A-Za-z_][A-Za-z0-9_]*\.[A-Za-z_][A-Za-z0-9_]*\b
    | \w+::\w+
    | \b[A-Z]{2,}[A-Z0-9_]*\b
    "#
);

intent_pattern!(
    RE_DEBUGGING,
    r"(?i)\b(?:errors?|bugs?|crash\w*|fail\w*|exceptions?|fix\w*|broken|stack\s+traces?|debug\w*)\b"
);

intent_pattern!(
    RE_COMPARISON,
    r"(?i)\b(?:compar\w*|vs|versus|difference\s+between|better\s+than|alternatives?\s+to)\b"
);

intent_pattern!(
    RE_OPTIMIZATION,
    r"(?i)\b(?:optimi[sz]\w*|performance|faster|speed\s+up|latency|efficien\w*|bottlenecks?)\b"
);

intent_pattern!(
    RE_WORKFLOW,
    r"(?i)\b(?:workflows?|pipelines?|steps?|process\w*|chain\w*|orchestrat\w*|then|sequence\w*)\b"
);

intent_pattern!(
    RE_HOW_TO,
    r"(?i)\b(?:how\s+to|how\s+do\s+i|how\s+can\s+i|way\s+to|tutorials?|guides?)\b"
);

intent_pattern!(
    RE_EXPLORATORY,
    r"(?i)\b(?:explor\w*|related|similar|connected|neighbou?rs?|what\s+else|overview|landscape)\b"
);

/// Rules in priority order; the first match wins.
static RULES: &[(Intent, &LazyLock<Option<Regex>>)] = &[
    (Intent::ExactMatch, &RE_EXACT_MATCH),
    (Intent::Debugging, &RE_DEBUGGING),
    (Intent::Comparison, &RE_COMPARISON),
    (Intent::Optimization, &RE_OPTIMIZATION),
    (Intent::Workflow, &RE_WORKFLOW),
    (Intent::HowTo, &RE_HOW_TO),
    (Intent::Exploratory, &RE_EXPLORATORY),
];

/// Deterministic query → intent mapping.
#[derive(Debug, Clone)]
pub struct IntentClassifier {
    default_intent: Intent,
    broad_semantic_min_words: usize,
}

impl IntentClassifier {
    pub fn new(config: &RetrievalConfig) -> Self {
        Self {
            default_intent: config.default_intent,
            broad_semantic_min_words: config.broad_semantic_min_words,
        }
    }

    /// Classify a query. Priority: pattern rules > word count > default.
    pub fn classify(&self, query: &str) -> Intent {
        for (intent, pattern) in RULES {
            let Some(regex) = LazyLock::force(pattern) else {
                continue;
            };
            if regex.is_match(query) {
                debug!(%intent, "intent matched by pattern");
                return *intent;
            }
        }

        if query.split_whitespace().count() > self.broad_semantic_min_words {
            return Intent::BroadSemantic;
        }
        self.default_intent
    }

    /// An explicit override bypasses classification.
    pub fn resolve(&self, query: &str, intent_override: Option<Intent>) -> Intent {
        intent_override.unwrap_or_else(|| self.classify(query))
    }
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new(&RetrievalConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(q: &str) -> Intent {
        IntentClassifier::default().classify(q)
    }

    #[test]
    fn every_pattern_compiles() {
        for (intent, pattern) in RULES {
            assert!(LazyLock::force(pattern).is_some(), "{intent} pattern failed to compile");
        }
    }

    #[test]
    fn identifiers_and_quotes_are_exact_match() {
        assert_eq!(classify("`parse_config`"), Intent::ExactMatch);
        assert_eq!(classify("where is getUserById"), Intent::ExactMatch);
        assert_eq!(classify("load_graph fails"), Intent::ExactMatch);
        assert_eq!(classify("std::sync usage"), Intent::ExactMatch);
        assert_eq!(classify("what does HTTP_TIMEOUT control"), Intent::ExactMatch);
        assert_eq!(classify("find \"query cache\""), Intent::ExactMatch);
    }

    #[test]
    fn apostrophes_are_not_quotes() {
        assert_eq!(classify("don't know what's wrong with it"), Intent::General);
    }

    #[test]
    fn keyword_rules() {
        assert_eq!(classify("why does the service crash"), Intent::Debugging);
        assert_eq!(classify("redis vs memcached"), Intent::Comparison);
        assert_eq!(classify("reduce latency of search"), Intent::Optimization);
        assert_eq!(classify("ingest then index"), Intent::Workflow);
        assert_eq!(classify("how do i configure tracing"), Intent::HowTo);
        assert_eq!(classify("what else is related to caching"), Intent::Exploratory);
    }

    #[test]
    fn debugging_outranks_how_to() {
        assert_eq!(classify("how to fix a broken index"), Intent::Debugging);
    }

    #[test]
    fn long_queries_are_broad_semantic() {
        let q = "tell me everything you know about the history of distributed consensus research";
        assert_eq!(classify(q), Intent::BroadSemantic);
    }

    #[test]
    fn short_unmatched_query_uses_default() {
        assert_eq!(classify("knowledge graphs"), Intent::General);
        let mut cfg = RetrievalConfig::default();
        cfg.default_intent = Intent::Exploratory;
        assert_eq!(
            IntentClassifier::new(&cfg).classify("knowledge graphs"),
            Intent::Exploratory
        );
    }

    #[test]
    fn override_bypasses_rules() {
        let c = IntentClassifier::default();
        assert_eq!(
            c.resolve("why does it crash", Some(Intent::Comparison)),
            Intent::Comparison
        );
    }
}
