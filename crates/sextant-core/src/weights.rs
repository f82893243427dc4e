use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use tracing::warn;

use crate::config::defaults::DEFAULT_UNKNOWN_EDGE_WEIGHT;
use crate::errors::ConfigError;

/// Built-in edge-type catalog, strongest first.
const DEFAULT_EDGE_WEIGHTS: &[(&str, f64)] = &[
    ("implements", 1.0),
    ("realizes", 1.0),
    ("enables", 0.9),
    ("depends_on", 0.85),
    ("part_of", 0.8),
    ("uses", 0.8),
    ("produces", 0.75),
    ("precedes", 0.7),
    ("solves", 0.7),
    ("causes", 0.65),
    ("alternative_to", 0.6),
    ("optimizes", 0.6),
    ("related_to", 0.5),
    ("similar_to", 0.5),
    ("mentions", 0.3),
    ("limited_by", 0.2),
];

/// Edge type → traversal weight in (0, 1].
///
/// Unknown types resolve to the default weight and are reported once each.
#[derive(Debug)]
pub struct EdgeTypeWeights {
    weights: HashMap<String, f64>,
    default_weight: f64,
    reported: Mutex<HashSet<String>>,
}

impl Default for EdgeTypeWeights {
    fn default() -> Self {
        Self {
            weights: DEFAULT_EDGE_WEIGHTS
                .iter()
                .map(|(t, w)| (t.to_string(), *w))
                .collect(),
            default_weight: DEFAULT_UNKNOWN_EDGE_WEIGHT,
            reported: Mutex::new(HashSet::new()),
        }
    }
}

impl Clone for EdgeTypeWeights {
    fn clone(&self) -> Self {
        Self {
            weights: self.weights.clone(),
            default_weight: self.default_weight,
            reported: Mutex::new(HashSet::new()),
        }
    }
}

impl EdgeTypeWeights {
    pub fn with_default_weight(default_weight: f64) -> Result<Self, ConfigError> {
        check_weight("graph.unknown_edge_weight", default_weight)?;
        Ok(Self {
            default_weight,
            ..Self::default()
        })
    }

    /// Add or override one edge type.
    pub fn insert(&mut self, edge_type: &str, weight: f64) -> Result<(), ConfigError> {
        check_weight(&format!("edge_weights.{edge_type}"), weight)?;
        self.weights.insert(edge_type.to_string(), weight);
        Ok(())
    }

    /// Weight for an edge type, falling back to the default for unknown types.
    pub fn weight(&self, edge_type: &str) -> f64 {
        if let Some(w) = self.weights.get(edge_type) {
            return *w;
        }
        if let Ok(mut reported) = self.reported.lock() {
            if reported.insert(edge_type.to_string()) {
                warn!(
                    edge_type,
                    default_weight = self.default_weight,
                    "unknown edge type, using default weight"
                );
            }
        }
        self.default_weight
    }

    pub fn is_known(&self, edge_type: &str) -> bool {
        self.weights.contains_key(edge_type)
    }

    pub fn default_weight(&self) -> f64 {
        self.default_weight
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

fn check_weight(field: &str, weight: f64) -> Result<(), ConfigError> {
    if weight > 0.0 && weight <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::ValidationFailed {
            field: field.to_string(),
            message: format!("weight must be in (0, 1], got {weight}"),
        })
    }
}
