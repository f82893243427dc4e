use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Query intent. Eight classified categories plus the `General` default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    ExactMatch,
    Debugging,
    Workflow,
    Exploratory,
    Comparison,
    Optimization,
    HowTo,
    BroadSemantic,
    General,
}

impl Intent {
    /// Total number of intents, including the default.
    pub const COUNT: usize = 9;

    /// All variants for iteration.
    pub const ALL: [Intent; 9] = [
        Self::ExactMatch,
        Self::Debugging,
        Self::Workflow,
        Self::Exploratory,
        Self::Comparison,
        Self::Optimization,
        Self::HowTo,
        Self::BroadSemantic,
        Self::General,
    ];

    /// Stable snake_case label, identical to the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExactMatch => "exact_match",
            Self::Debugging => "debugging",
            Self::Workflow => "workflow",
            Self::Exploratory => "exploratory",
            Self::Comparison => "comparison",
            Self::Optimization => "optimization",
            Self::HowTo => "how_to",
            Self::BroadSemantic => "broad_semantic",
            Self::General => "general",
        }
    }

    /// Position in [`Intent::ALL`], used to index per-intent tables.
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a label names no intent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown intent label: {0}")]
pub struct UnknownIntent(pub String);

impl FromStr for Intent {
    type Err = UnknownIntent;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|intent| intent.as_str() == label)
            .ok_or_else(|| UnknownIntent(s.to_string()))
    }
}
