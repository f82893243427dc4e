//! Authority ranking: PageRank over the directed graph.
//!
//! Sparse graphs (fewer than `authority_min_edges` edges) get uniform
//! scores. Otherwise a strict attempt runs first; if it does not converge a
//! relaxed attempt follows; if that fails too, scores fall back to uniform.
//! Dangling-node mass is spread uniformly, so computed scores sum to 1.

use std::collections::HashMap;

use sextant_core::config::GraphConfig;
use sextant_core::models::AuthorityOutcome;
use tracing::{debug, warn};

use crate::snapshot::GraphSnapshot;

/// Per-node authority and how it was obtained.
#[derive(Debug, Clone)]
pub struct AuthorityScores {
    scores: HashMap<String, f64>,
    outcome: AuthorityOutcome,
}

struct Attempt {
    max_iterations: usize,
    tolerance: f64,
}

impl AuthorityScores {
    pub fn compute(snapshot: &GraphSnapshot, config: &GraphConfig) -> Self {
        let n = snapshot.node_count();
        if n == 0 {
            return Self {
                scores: HashMap::new(),
                outcome: AuthorityOutcome::Skipped,
            };
        }
        if snapshot.edge_count() < config.authority_min_edges {
            debug!(
                graph_id = snapshot.graph_id(),
                edges = snapshot.edge_count(),
                min_edges = config.authority_min_edges,
                "graph too sparse for PageRank, using uniform authority"
            );
            return Self::uniform(snapshot, AuthorityOutcome::Skipped);
        }

        let mut out_links: Vec<Vec<usize>> = vec![Vec::new(); n];
        for (source, target, _) in snapshot.edges() {
            out_links[source].push(target);
        }

        let attempts = [
            Attempt {
                max_iterations: config.first_max_iterations,
                tolerance: config.first_tolerance,
            },
            Attempt {
                max_iterations: config.second_max_iterations,
                tolerance: config.second_tolerance,
            },
        ];
        for (i, attempt) in attempts.iter().enumerate() {
            if let Some((ranks, iterations)) = pagerank(&out_links, config.damping, attempt) {
                let attempt_no = (i + 1) as u8;
                debug!(
                    graph_id = snapshot.graph_id(),
                    attempt = attempt_no,
                    iterations,
                    "PageRank converged"
                );
                let scores = snapshot
                    .nodes()
                    .iter()
                    .zip(ranks)
                    .map(|(node, r)| (node.id.clone(), r))
                    .collect();
                return Self {
                    scores,
                    outcome: AuthorityOutcome::Converged {
                        attempt: attempt_no,
                        iterations,
                    },
                };
            }
            debug!(
                graph_id = snapshot.graph_id(),
                attempt = i + 1,
                max_iterations = attempt.max_iterations,
                "PageRank did not converge"
            );
        }

        warn!(
            graph_id = snapshot.graph_id(),
            "PageRank failed to converge twice, using uniform authority"
        );
        Self::uniform(snapshot, AuthorityOutcome::Degraded)
    }

    fn uniform(snapshot: &GraphSnapshot, outcome: AuthorityOutcome) -> Self {
        let share = 1.0 / snapshot.node_count() as f64;
        Self {
            scores: snapshot
                .nodes()
                .iter()
                .map(|n| (n.id.clone(), share))
                .collect(),
            outcome,
        }
    }

    pub fn get(&self, node_id: &str) -> f64 {
        self.scores.get(node_id).copied().unwrap_or(0.0)
    }

    pub fn outcome(&self) -> AuthorityOutcome {
        self.outcome
    }

    pub fn scores(&self) -> &HashMap<String, f64> {
        &self.scores
    }

    pub fn max(&self) -> f64 {
        self.scores.values().copied().fold(0.0, f64::max)
    }
}

/// Power iteration. Returns the ranks and the iteration count on
/// convergence (L1 change below tolerance), `None` otherwise.
fn pagerank(out_links: &[Vec<usize>], damping: f64, attempt: &Attempt) -> Option<(Vec<f64>, usize)> {
    let n = out_links.len();
    let nf = n as f64;
    let mut ranks = vec![1.0 / nf; n];

    for iteration in 1..=attempt.max_iterations {
        let dangling: f64 = out_links
            .iter()
            .zip(&ranks)
            .filter(|(links, _)| links.is_empty())
            .map(|(_, r)| *r)
            .sum();
        let base = (1.0 - damping) / nf + damping * dangling / nf;
        let mut next = vec![base; n];
        for (source, links) in out_links.iter().enumerate() {
            if links.is_empty() {
                continue;
            }
            let share = damping * ranks[source] / links.len() as f64;
            for &target in links {
                next[target] += share;
            }
        }

        let delta: f64 = next.iter().zip(&ranks).map(|(a, b)| (a - b).abs()).sum();
        ranks = next;
        if !delta.is_finite() {
            return None;
        }
        if delta < attempt.tolerance {
            return Some((ranks, iteration));
        }
    }
    None
}
