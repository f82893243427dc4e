use super::taxonomy::Intent;

/// Raw keywords per intent; stemmed by the lexical crate before matching.
const KEYWORDS: &[(Intent, &[&str])] = &[
    (
        Intent::Debugging,
        &[
            "error", "bug", "crash", "fail", "failure", "exception", "fix", "broken", "debug",
            "issue", "trace", "panic",
        ],
    ),
    (
        Intent::Workflow,
        &[
            "workflow", "pipeline", "step", "process", "sequence", "chain", "stage",
            "orchestrate", "flow",
        ],
    ),
    (
        Intent::Exploratory,
        &[
            "explore", "related", "similar", "connected", "neighbor", "overview", "landscape",
            "discover",
        ],
    ),
    (
        Intent::Comparison,
        &[
            "compare", "comparison", "versus", "difference", "alternative", "better",
            "tradeoff", "contrast",
        ],
    ),
    (
        Intent::Optimization,
        &[
            "optimize", "optimization", "performance", "faster", "speed", "latency",
            "efficient", "bottleneck", "throughput",
        ],
    ),
    (
        Intent::HowTo,
        &[
            "how", "guide", "tutorial", "implement", "setup", "configure", "build", "create",
            "install",
        ],
    ),
];

/// Keywords for an intent. Empty for exact_match, broad_semantic, and general.
pub fn keywords_for(intent: Intent) -> &'static [&'static str] {
    KEYWORDS
        .iter()
        .find(|(i, _)| *i == intent)
        .map(|(_, words)| *words)
        .unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structural_intents_have_no_keywords() {
        assert!(keywords_for(Intent::ExactMatch).is_empty());
        assert!(keywords_for(Intent::BroadSemantic).is_empty());
        assert!(keywords_for(Intent::General).is_empty());
    }

    #[test]
    fn content_intents_have_keywords() {
        for intent in [
            Intent::Debugging,
            Intent::Workflow,
            Intent::Exploratory,
            Intent::Comparison,
            Intent::Optimization,
            Intent::HowTo,
        ] {
            assert!(!keywords_for(intent).is_empty(), "{intent}");
        }
    }
}
