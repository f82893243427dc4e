//! Schema profiles: map heterogeneous JSON records onto [`Node`] and [`Edge`].
//!
//! Stores name their fields differently (`id` vs `node_id`, `from` vs
//! `source`, `relation` vs `type`). A [`SchemaProfile`] records which field
//! provides each capability; [`SchemaProfile::detect`] resolves them from
//! sample records.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::GraphError;
use crate::models::{Edge, Node};

/// A field role a record schema must provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    NodeId,
    NodeName,
    EdgeSource,
    EdgeTarget,
    EdgeType,
}

impl Capability {
    fn candidates(&self) -> &'static [&'static str] {
        match self {
            Self::NodeId => &["id", "node_id", "nodeId", "uuid", "key"],
            Self::NodeName => &["name", "title", "label", "display_name"],
            Self::EdgeSource => &["source", "source_id", "sourceId", "from", "src", "start"],
            Self::EdgeTarget => &["target", "target_id", "targetId", "to", "dst", "end"],
            Self::EdgeType => &[
                "edge_type", "edgeType", "type", "relation", "relationship", "label", "kind",
            ],
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::NodeId => "nodeId",
            Self::NodeName => "nodeName",
            Self::EdgeSource => "edgeSource",
            Self::EdgeTarget => "edgeTarget",
            Self::EdgeType => "edgeType",
        };
        f.write_str(s)
    }
}

const NODE_TYPE_CANDIDATES: &[&str] = &["node_type", "nodeType", "type", "kind", "category"];
const EDGE_ID_CANDIDATES: &[&str] = &["id", "edge_id", "edgeId"];
const EDGE_WEIGHT_CANDIDATES: &[&str] = &["weight", "strength", "score"];
const FALLBACK_NODE_TYPE: &str = "entity";

/// Resolved field names for one graph's records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaProfile {
    pub node_id: String,
    pub node_name: String,
    pub node_type: Option<String>,
    pub edge_id: Option<String>,
    pub edge_source: String,
    pub edge_target: String,
    pub edge_type: String,
    pub edge_weight: Option<String>,
}

impl Default for SchemaProfile {
    fn default() -> Self {
        Self {
            node_id: "id".to_string(),
            node_name: "name".to_string(),
            node_type: Some("node_type".to_string()),
            edge_id: Some("id".to_string()),
            edge_source: "source".to_string(),
            edge_target: "target".to_string(),
            edge_type: "edge_type".to_string(),
            edge_weight: Some("weight".to_string()),
        }
    }
}

impl SchemaProfile {
    /// Resolve every capability from sample records. The first candidate
    /// name present in any sample wins.
    pub fn detect(node_samples: &[Value], edge_samples: &[Value]) -> Result<Self, GraphError> {
        let node_id = require(Capability::NodeId, node_samples)?;
        let node_name = resolve(Capability::NodeName.candidates(), node_samples)
            .unwrap_or_else(|| node_id.clone());
        let node_type = resolve(NODE_TYPE_CANDIDATES, node_samples);

        let (edge_source, edge_target, edge_type) = if edge_samples.is_empty() {
            let d = Self::default();
            (d.edge_source, d.edge_target, d.edge_type)
        } else {
            (
                require(Capability::EdgeSource, edge_samples)?,
                require(Capability::EdgeTarget, edge_samples)?,
                require(Capability::EdgeType, edge_samples)?,
            )
        };

        Ok(Self {
            node_id,
            node_name,
            node_type,
            edge_id: resolve(EDGE_ID_CANDIDATES, edge_samples),
            edge_source,
            edge_target,
            edge_type,
            edge_weight: resolve(EDGE_WEIGHT_CANDIDATES, edge_samples),
        })
    }

    /// Map one record to a node. Unmapped fields become properties.
    pub fn node_from_record(&self, record: &Value) -> Result<Node, GraphError> {
        let obj = as_object(record)?;
        let id = scalar_string(obj.get(&self.node_id)).ok_or_else(|| GraphError::MalformedRecord {
            reason: format!("node record lacks '{}'", self.node_id),
        })?;
        let name = scalar_string(obj.get(&self.node_name)).unwrap_or_else(|| id.clone());
        let node_type = self
            .node_type
            .as_ref()
            .and_then(|f| scalar_string(obj.get(f)))
            .unwrap_or_else(|| FALLBACK_NODE_TYPE.to_string());

        let mapped: [Option<&String>; 3] = [
            Some(&self.node_id),
            Some(&self.node_name),
            self.node_type.as_ref(),
        ];
        let properties: BTreeMap<String, Value> = obj
            .iter()
            .filter(|(k, _)| !mapped.iter().flatten().any(|m| *m == *k))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        Ok(Node {
            id,
            name,
            node_type,
            properties,
        })
    }

    /// Map one record to an edge. `ordinal` names edges whose record has no id.
    pub fn edge_from_record(&self, record: &Value, ordinal: usize) -> Result<Edge, GraphError> {
        let obj = as_object(record)?;
        let field = |name: &str| {
            scalar_string(obj.get(name)).ok_or_else(|| GraphError::MalformedRecord {
                reason: format!("edge record lacks '{name}'"),
            })
        };
        let source = field(self.edge_source.as_str())?;
        let target = field(self.edge_target.as_str())?;
        let edge_type = field(self.edge_type.as_str())?;
        let id = self
            .edge_id
            .as_ref()
            .and_then(|f| scalar_string(obj.get(f)))
            .unwrap_or_else(|| format!("e{ordinal}"));
        let weight = self
            .edge_weight
            .as_ref()
            .and_then(|f| obj.get(f))
            .and_then(Value::as_f64);

        Ok(Edge {
            id,
            source,
            target,
            edge_type,
            weight,
        })
    }
}

fn resolve(candidates: &[&str], samples: &[Value]) -> Option<String> {
    candidates
        .iter()
        .find(|c| {
            samples
                .iter()
                .any(|s| s.get(**c).is_some_and(|v| !v.is_null()))
        })
        .map(|c| c.to_string())
}

fn require(capability: Capability, samples: &[Value]) -> Result<String, GraphError> {
    resolve(capability.candidates(), samples).ok_or_else(|| GraphError::SchemaUnresolved {
        capability: capability.to_string(),
    })
}

fn as_object(record: &Value) -> Result<&serde_json::Map<String, Value>, GraphError> {
    record.as_object().ok_or_else(|| GraphError::MalformedRecord {
        reason: "record is not a JSON object".to_string(),
    })
}

/// Strings pass through; numbers and booleans are rendered.
fn scalar_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
