use serde::{Deserialize, Serialize};

use super::taxonomy::Intent;
use crate::config::defaults::PROFILE_SUM_TOLERANCE;
use crate::errors::ConfigError;

/// Fusion weights for the four relevance signals. The weights sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntentProfile {
    pub embedding: f64,
    pub text: f64,
    pub graph: f64,
    pub intent: f64,
}

impl IntentProfile {
    /// Build a validated profile.
    pub fn new(embedding: f64, text: f64, graph: f64, intent: f64) -> Result<Self, ConfigError> {
        let profile = Self {
            embedding,
            text,
            graph,
            intent,
        };
        profile.validate()?;
        Ok(profile)
    }

    /// Weights for lexical-only search.
    pub const LEXICAL_ONLY: Self = Self {
        embedding: 0.0,
        text: 1.0,
        graph: 0.0,
        intent: 0.0,
    };

    /// Weights for embedding-only search.
    pub const EMBEDDING_ONLY: Self = Self {
        embedding: 1.0,
        text: 0.0,
        graph: 0.0,
        intent: 0.0,
    };

    pub fn sum(&self) -> f64 {
        self.embedding + self.text + self.graph + self.intent
    }

    /// Weights must be finite, non-negative, and sum to 1 within tolerance.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, w) in [
            ("embedding", self.embedding),
            ("text", self.text),
            ("graph", self.graph),
            ("intent", self.intent),
        ] {
            if !w.is_finite() || w < 0.0 {
                return Err(ConfigError::ValidationFailed {
                    field: format!("intent_profile.{name}"),
                    message: format!("weight must be finite and non-negative, got {w}"),
                });
            }
        }
        let sum = self.sum();
        if (sum - 1.0).abs() > PROFILE_SUM_TOLERANCE {
            return Err(ConfigError::ValidationFailed {
                field: "intent_profile".to_string(),
                message: format!("weights must sum to 1.0, got {sum}"),
            });
        }
        Ok(())
    }

    /// Whether the graph-derived signals carry any weight.
    pub fn uses_graph_signals(&self) -> bool {
        self.graph > 0.0 || self.intent > 0.0
    }
}

/// Built-in profile table: (intent, embedding, text, graph, intent-edge).
const DEFAULT_PROFILES: [(Intent, f64, f64, f64, f64); Intent::COUNT] = [
    (Intent::ExactMatch, 0.20, 0.70, 0.05, 0.05),
    (Intent::Debugging, 0.30, 0.35, 0.15, 0.20),
    (Intent::Workflow, 0.25, 0.20, 0.30, 0.25),
    (Intent::Exploratory, 0.35, 0.15, 0.30, 0.20),
    (Intent::Comparison, 0.35, 0.30, 0.15, 0.20),
    (Intent::Optimization, 0.30, 0.30, 0.20, 0.20),
    (Intent::HowTo, 0.35, 0.30, 0.15, 0.20),
    (Intent::BroadSemantic, 0.55, 0.20, 0.15, 0.10),
    (Intent::General, 0.40, 0.30, 0.15, 0.15),
];

/// One profile per intent.
#[derive(Debug, Clone, PartialEq)]
pub struct IntentProfiles {
    profiles: [IntentProfile; Intent::COUNT],
}

impl Default for IntentProfiles {
    fn default() -> Self {
        let mut profiles = [IntentProfile::EMBEDDING_ONLY; Intent::COUNT];
        for (intent, embedding, text, graph, intent_w) in DEFAULT_PROFILES {
            profiles[intent.index()] = IntentProfile {
                embedding,
                text,
                graph,
                intent: intent_w,
            };
        }
        Self { profiles }
    }
}

impl IntentProfiles {
    pub fn get(&self, intent: Intent) -> IntentProfile {
        self.profiles[intent.index()]
    }

    /// Replace one profile after validating it.
    pub fn set(&mut self, intent: Intent, profile: IntentProfile) -> Result<(), ConfigError> {
        profile.validate()?;
        self.profiles[intent.index()] = profile;
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (Intent, IntentProfile)> + '_ {
        Intent::ALL.into_iter().map(|i| (i, self.get(i)))
    }
}
