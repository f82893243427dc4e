use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A graph node. Read-only from the engine's perspective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub name: String,
    pub node_type: String,
    #[serde(default)]
    pub properties: BTreeMap<String, serde_json::Value>,
}

impl Node {
    pub fn new(id: impl Into<String>, name: impl Into<String>, node_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            node_type: node_type.into(),
            properties: BTreeMap::new(),
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.properties.insert(key.into(), value);
        self
    }

    /// Searchable text: name, type, then every string-valued property.
    /// String arrays are flattened; other values are ignored.
    pub fn searchable_text(&self) -> Vec<&str> {
        let mut parts = vec![self.name.as_str(), self.node_type.as_str()];
        for value in self.properties.values() {
            match value {
                serde_json::Value::String(s) => parts.push(s),
                serde_json::Value::Array(items) => {
                    parts.extend(items.iter().filter_map(|v| v.as_str()));
                }
                _ => {}
            }
        }
        parts
    }
}

/// A directed, typed edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub edge_type: String,
    #[serde(default)]
    pub weight: Option<f64>,
}

impl Edge {
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
        edge_type: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            edge_type: edge_type.into(),
            weight: None,
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}
