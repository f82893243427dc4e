pub mod cache_config;
pub mod defaults;
pub mod embedding_config;
pub mod graph_config;
pub mod lexical_config;
pub mod observability_config;
pub mod retrieval_config;

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub use cache_config::CacheConfig;
pub use embedding_config::EmbeddingConfig;
pub use graph_config::GraphConfig;
pub use lexical_config::LexicalConfig;
pub use observability_config::ObservabilityConfig;
pub use retrieval_config::RetrievalConfig;

use crate::errors::{ConfigError, SextantResult};
use crate::intent::{Intent, IntentEdgeMap, IntentProfile, IntentProfiles};
use crate::weights::EdgeTypeWeights;

/// Top-level configuration.
///
/// Every section is optional in TOML; missing fields take the values in
/// [`defaults`]. The three data tables (`intent_profiles`, `intent_edges`,
/// `edge_weights`) merge over the built-in tables instead of replacing them.
///
/// ```toml
/// [graph]
/// authority_min_edges = 50
///
/// [intent_profiles.debugging]
/// embedding = 0.25
/// text = 0.40
/// graph = 0.15
/// intent = 0.20
///
/// [intent_edges]
/// comparison = ["alternative_to", "similar_to", "competes_with"]
///
/// [edge_weights]
/// competes_with = 0.6
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SextantConfig {
    pub retrieval: RetrievalConfig,
    pub lexical: LexicalConfig,
    pub graph: GraphConfig,
    pub embedding: EmbeddingConfig,
    pub cache: CacheConfig,
    pub observability: ObservabilityConfig,
    /// Intent label → profile overrides.
    pub intent_profiles: BTreeMap<String, IntentProfile>,
    /// Intent label → edge-type list overrides.
    pub intent_edges: BTreeMap<String, Vec<String>>,
    /// Edge type → weight overrides and additions.
    pub edge_weights: BTreeMap<String, f64>,
}

impl SextantConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml(toml_str: &str) -> SextantResult<Self> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a TOML file.
    pub fn from_file(path: &Path) -> SextantResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let config: Self = toml::from_str(&raw).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check ranges and cross-field constraints.
    pub fn validate(&self) -> SextantResult<()> {
        let lexical = &self.lexical;
        ensure(lexical.k1 >= 0.0, "lexical.k1", "must be non-negative")?;
        ensure(
            (0.0..=1.0).contains(&lexical.b),
            "lexical.b",
            "must be in [0, 1]",
        )?;
        ensure(
            lexical.amplification_factor >= 1,
            "lexical.amplification_factor",
            "must be at least 1",
        )?;
        ensure(
            lexical.min_stem_len >= 1,
            "lexical.min_stem_len",
            "must be at least 1",
        )?;

        let graph = &self.graph;
        ensure(
            in_unit_interval(graph.unknown_edge_weight),
            "graph.unknown_edge_weight",
            "must be in (0, 1]",
        )?;
        for (field, value) in [
            ("graph.forward_hop_factor", graph.forward_hop_factor),
            ("graph.backward_hop_factor", graph.backward_hop_factor),
            ("graph.two_hop_factor", graph.two_hop_factor),
            ("graph.two_hop_decay", graph.two_hop_decay),
            ("graph.proximity_blend", graph.proximity_blend),
            ("graph.authority_blend", graph.authority_blend),
            ("graph.intent_forward", graph.intent_forward),
            ("graph.intent_backward", graph.intent_backward),
        ] {
            ensure(value.is_finite() && value >= 0.0, field, "must be non-negative")?;
        }
        ensure(
            graph.damping > 0.0 && graph.damping < 1.0,
            "graph.damping",
            "must be in (0, 1)",
        )?;
        ensure(
            graph.first_tolerance > 0.0 && graph.second_tolerance > 0.0,
            "graph.first_tolerance",
            "tolerances must be positive",
        )?;
        ensure(
            graph.first_max_iterations > 0 && graph.second_max_iterations > 0,
            "graph.first_max_iterations",
            "iteration caps must be positive",
        )?;

        ensure(
            self.retrieval.diversity_boost > 0.0,
            "retrieval.diversity_boost",
            "must be positive",
        )?;
        ensure(
            self.embedding.dimensions > 0,
            "embedding.dimensions",
            "must be positive",
        )?;
        ensure(
            self.cache.query_ttl_secs > 0,
            "cache.query_ttl_secs",
            "must be positive",
        )?;
        ensure(
            self.cache.query_max_capacity > 0,
            "cache.query_max_capacity",
            "must be positive",
        )?;

        for (label, profile) in &self.intent_profiles {
            parse_intent(label, "intent_profiles")?;
            profile.validate()?;
        }
        for label in self.intent_edges.keys() {
            parse_intent(label, "intent_edges")?;
        }
        for (edge_type, weight) in &self.edge_weights {
            ensure(
                in_unit_interval(*weight),
                &format!("edge_weights.{edge_type}"),
                "must be in (0, 1]",
            )?;
        }
        Ok(())
    }

    /// Built-in profiles with `[intent_profiles]` merged on top.
    pub fn intent_profiles(&self) -> SextantResult<IntentProfiles> {
        let mut profiles = IntentProfiles::default();
        for (label, profile) in &self.intent_profiles {
            let intent = parse_intent(label, "intent_profiles")?;
            profiles.set(intent, *profile)?;
        }
        Ok(profiles)
    }

    /// Built-in intent → edge-type map with `[intent_edges]` merged on top.
    pub fn intent_edge_map(&self) -> SextantResult<IntentEdgeMap> {
        let mut map = IntentEdgeMap::default();
        for (label, edge_types) in &self.intent_edges {
            let intent = parse_intent(label, "intent_edges")?;
            map.set(intent, edge_types.clone());
        }
        Ok(map)
    }

    /// Built-in edge catalog with `[edge_weights]` merged on top.
    pub fn edge_type_weights(&self) -> SextantResult<EdgeTypeWeights> {
        let mut weights = EdgeTypeWeights::with_default_weight(self.graph.unknown_edge_weight)?;
        for (edge_type, weight) in &self.edge_weights {
            weights.insert(edge_type, *weight)?;
        }
        Ok(weights)
    }
}

fn in_unit_interval(value: f64) -> bool {
    value > 0.0 && value <= 1.0
}

fn ensure(condition: bool, field: &str, message: &str) -> Result<(), ConfigError> {
    if condition {
        Ok(())
    } else {
        Err(ConfigError::ValidationFailed {
            field: field.to_string(),
            message: message.to_string(),
        })
    }
}

fn parse_intent(label: &str, table: &str) -> Result<Intent, ConfigError> {
    label
        .parse::<Intent>()
        .map_err(|_| ConfigError::ValidationFailed {
            field: format!("{table}.{label}"),
            message: "unknown intent".to_string(),
        })
}
