use serde::{Deserialize, Serialize};

use super::defaults;
use crate::intent::Intent;

/// Graph signal configuration: proximity, intent edges, authority, communities.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Weight for edge types missing from the edge-weight table.
    pub unknown_edge_weight: f64,
    /// Multiplier for seed → neighbour edges.
    pub forward_hop_factor: f64,
    /// Multiplier for neighbour → seed edges.
    pub backward_hop_factor: f64,
    /// Second-hop contribution is `two_hop_factor * two_hop_decay`.
    pub two_hop_factor: f64,
    pub two_hop_decay: f64,
    /// Number of top 1-hop nodes expanded on the second hop.
    pub two_hop_frontier: usize,
    /// Intents that enable the second hop.
    pub two_hop_intents: Vec<Intent>,
    /// Final graph score = proximity_blend * proximity + authority_blend * authority.
    pub proximity_blend: f64,
    pub authority_blend: f64,
    /// Intent edge scorer: seed is the source.
    pub intent_forward: f64,
    /// Intent edge scorer: seed is the target.
    pub intent_backward: f64,

    /// PageRank is skipped (uniform scores) below this edge count.
    pub authority_min_edges: usize,
    pub damping: f64,
    pub first_max_iterations: usize,
    pub first_tolerance: f64,
    pub second_max_iterations: usize,
    pub second_tolerance: f64,

    /// Community detection is skipped below this edge count.
    pub community_min_edges: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            unknown_edge_weight: defaults::DEFAULT_UNKNOWN_EDGE_WEIGHT,
            forward_hop_factor: defaults::DEFAULT_FORWARD_HOP_FACTOR,
            backward_hop_factor: defaults::DEFAULT_BACKWARD_HOP_FACTOR,
            two_hop_factor: defaults::DEFAULT_TWO_HOP_FACTOR,
            two_hop_decay: defaults::DEFAULT_TWO_HOP_DECAY,
            two_hop_frontier: defaults::DEFAULT_TWO_HOP_FRONTIER,
            two_hop_intents: vec![Intent::Workflow, Intent::Exploratory],
            proximity_blend: defaults::DEFAULT_PROXIMITY_BLEND,
            authority_blend: defaults::DEFAULT_AUTHORITY_BLEND,
            intent_forward: defaults::DEFAULT_INTENT_FORWARD,
            intent_backward: defaults::DEFAULT_INTENT_BACKWARD,
            authority_min_edges: defaults::DEFAULT_AUTHORITY_MIN_EDGES,
            damping: defaults::DEFAULT_DAMPING,
            first_max_iterations: defaults::DEFAULT_FIRST_MAX_ITERATIONS,
            first_tolerance: defaults::DEFAULT_FIRST_TOLERANCE,
            second_max_iterations: defaults::DEFAULT_SECOND_MAX_ITERATIONS,
            second_tolerance: defaults::DEFAULT_SECOND_TOLERANCE,
            community_min_edges: defaults::DEFAULT_COMMUNITY_MIN_EDGES,
        }
    }
}

impl GraphConfig {
    /// Score added to second-hop neighbours.
    pub fn two_hop_increment(&self) -> f64 {
        self.two_hop_factor * self.two_hop_decay
    }
}
