//! Lexical pipeline integration tests: analyze → amplify → BM25 → text signal.

use serde_json::json;
use sextant_core::config::LexicalConfig;
use sextant_core::intent::Intent;
use sextant_core::Node;
use sextant_lexical::{combine_text_signal, Analyzer, KeywordAmplifier, LexicalIndex};

// ---- helpers ----

fn corpus() -> Vec<Node> {
    vec![
        Node::new("cache", "Result cache", "component")
            .with_property("summary", json!("stores computed responses")),
        Node::new("latency", "Tail latency", "metric")
            .with_property("summary", json!("p99 response time of the cache")),
        Node::new("planner", "Query planner", "component"),
    ]
}

fn setup() -> (Analyzer, LexicalIndex, KeywordAmplifier) {
    let config = LexicalConfig::default();
    let analyzer = Analyzer::new(&config);
    let index = LexicalIndex::build(&corpus(), &analyzer, &config);
    let amplifier = KeywordAmplifier::new(&analyzer, config.amplification_factor);
    (analyzer, index, amplifier)
}

// ---- tests ----

#[test]
fn amplification_shifts_ranking_toward_intent_keywords() {
    let (analyzer, index, amplifier) = setup();
    let tokens = analyzer.analyze("cache latency");

    let plain = combine_text_signal(index.score(&tokens), None);
    let amplified = combine_text_signal(
        index.score(&amplifier.amplify(&tokens, Intent::Optimization)),
        None,
    );

    assert_eq!(amplified["latency"], 1.0);
    assert!(amplified["cache"] < plain["cache"]);
}

#[test]
fn exact_name_ranks_first_without_amplification() {
    let (analyzer, index, amplifier) = setup();
    let tokens = amplifier.amplify(&analyzer.analyze("query planner"), Intent::ExactMatch);
    let text = combine_text_signal(index.score(&tokens), None);
    assert_eq!(text["planner"], 1.0);
    assert!(text.values().all(|v| (0.0..=1.0).contains(v)));
}

#[test]
fn full_text_hits_extend_the_candidate_set() {
    let (analyzer, index, _) = setup();
    let tokens = analyzer.analyze("planner");
    let fts = vec![("cache".to_string(), 0.8)];
    let text = combine_text_signal(index.score(&tokens), Some(&fts));
    assert_eq!(text["planner"], 1.0);
    assert_eq!(text["cache"], 1.0);
}
