//! Greedy modularity community detection (Clauset–Newman–Moore).
//!
//! Works on the undirected weighted projection of the snapshot: parallel
//! edges are summed, self-loops ignored, missing edge weights count as 1.
//! Starting from singletons, the connected pair with the largest positive
//! modularity gain is merged until no such pair remains. Candidate pairs
//! live in a max-heap; entries made stale by a merge are skipped on pop.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap, HashMap};

use sextant_core::config::GraphConfig;
use tracing::debug;

use crate::snapshot::GraphSnapshot;

/// Node → community id. Ids are dense and ordered by each community's
/// smallest member id.
#[derive(Debug, Clone)]
pub struct CommunityAssignment {
    membership: HashMap<String, usize>,
    count: usize,
    modularity: f64,
}

impl CommunityAssignment {
    /// `None` when the graph has fewer than `community_min_edges` edges or
    /// no non-loop edge weight at all.
    pub fn detect(snapshot: &GraphSnapshot, config: &GraphConfig) -> Option<Self> {
        if snapshot.edge_count() < config.community_min_edges {
            debug!(
                graph_id = snapshot.graph_id(),
                edges = snapshot.edge_count(),
                min_edges = config.community_min_edges,
                "graph too sparse for community detection"
            );
            return None;
        }

        let n = snapshot.node_count();
        // undirected adjacency, keyed by the smaller position
        let mut adjacency: BTreeMap<(usize, usize), f64> = BTreeMap::new();
        for (s, t, edge) in snapshot.edges() {
            if s == t {
                continue;
            }
            let w = edge
                .weight
                .filter(|w| w.is_finite() && *w > 0.0)
                .unwrap_or(1.0);
            *adjacency.entry((s.min(t), s.max(t))).or_insert(0.0) += w;
        }
        let total: f64 = adjacency.values().sum();
        if total <= 0.0 {
            return None;
        }
        let two_m = 2.0 * total;

        let mut merger = Merger::new(n, &adjacency, two_m);
        merger.run();

        let (membership, count) = renumber(snapshot, &merger.find_all());
        let modularity = merger.modularity();
        debug!(
            graph_id = snapshot.graph_id(),
            communities = count,
            modularity,
            "communities detected"
        );
        Some(Self {
            membership,
            count,
            modularity,
        })
    }

    pub fn community_of(&self, node_id: &str) -> Option<usize> {
        self.membership.get(node_id).copied()
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn modularity(&self) -> f64 {
        self.modularity
    }
}

/// A candidate merge. Ordered by gain, then by smaller ids first.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    gain: f64,
    a: usize,
    b: usize,
    version_a: u32,
    version_b: u32,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.gain
            .total_cmp(&other.gain)
            .then_with(|| other.a.cmp(&self.a))
            .then_with(|| other.b.cmp(&self.b))
    }
}

struct Merger {
    /// e_ij for i != j: fraction of edge ends joining communities i and j.
    links: Vec<HashMap<usize, f64>>,
    /// a_i: fraction of edge ends attached to community i.
    degree: Vec<f64>,
    /// e_ii: fraction of edge ends inside community i.
    internal: Vec<f64>,
    alive: Vec<bool>,
    version: Vec<u32>,
    parent: Vec<usize>,
    heap: BinaryHeap<Candidate>,
}

impl Merger {
    fn new(n: usize, adjacency: &BTreeMap<(usize, usize), f64>, two_m: f64) -> Self {
        let mut links = vec![HashMap::new(); n];
        let mut degree = vec![0.0; n];
        for (&(u, v), &w) in adjacency {
            let e = w / two_m;
            links[u].insert(v, e);
            links[v].insert(u, e);
            degree[u] += e;
            degree[v] += e;
        }
        let mut merger = Self {
            links,
            degree,
            internal: vec![0.0; n],
            alive: vec![true; n],
            version: vec![0; n],
            parent: (0..n).collect(),
            heap: BinaryHeap::new(),
        };
        for &(u, v) in adjacency.keys() {
            merger.push(u, v);
        }
        merger
    }

    fn gain(&self, a: usize, b: usize) -> f64 {
        let e = self.links[a].get(&b).copied().unwrap_or(0.0);
        2.0 * (e - self.degree[a] * self.degree[b])
    }

    fn push(&mut self, a: usize, b: usize) {
        let (a, b) = (a.min(b), a.max(b));
        let gain = self.gain(a, b);
        if gain > 0.0 {
            self.heap.push(Candidate {
                gain,
                a,
                b,
                version_a: self.version[a],
                version_b: self.version[b],
            });
        }
    }

    fn run(&mut self) {
        while let Some(c) = self.heap.pop() {
            let current = self.alive[c.a]
                && self.alive[c.b]
                && self.version[c.a] == c.version_a
                && self.version[c.b] == c.version_b;
            if !current {
                continue;
            }
            self.merge(c.a, c.b);
        }
    }

    /// Fold `b` into `a`.
    fn merge(&mut self, a: usize, b: usize) {
        let e_ab = self.links[a].remove(&b).unwrap_or(0.0);
        self.internal[a] += self.internal[b] + 2.0 * e_ab;
        self.degree[a] += self.degree[b];

        let b_links = std::mem::take(&mut self.links[b]);
        for (k, e) in b_links {
            if k == a {
                continue;
            }
            self.links[k].remove(&b);
            let merged = {
                let slot = self.links[a].entry(k).or_insert(0.0);
                *slot += e;
                *slot
            };
            self.links[k].insert(a, merged);
        }

        self.alive[b] = false;
        self.parent[b] = a;
        self.version[a] += 1;

        let neighbours: Vec<usize> = self.links[a].keys().copied().collect();
        for k in neighbours {
            self.push(a, k);
        }
    }

    fn find(&self, mut i: usize) -> usize {
        while self.parent[i] != i {
            i = self.parent[i];
        }
        i
    }

    fn find_all(&self) -> Vec<usize> {
        (0..self.parent.len()).map(|i| self.find(i)).collect()
    }

    fn modularity(&self) -> f64 {
        (0..self.alive.len())
            .filter(|i| self.alive[*i])
            .map(|i| self.internal[i] - self.degree[i] * self.degree[i])
            .sum()
    }
}

/// Dense ids in order of each community's smallest member id.
fn renumber(snapshot: &GraphSnapshot, roots: &[usize]) -> (HashMap<String, usize>, usize) {
    let nodes = snapshot.nodes();
    let mut smallest: HashMap<usize, &str> = HashMap::new();
    for (pos, root) in roots.iter().enumerate() {
        let id = nodes[pos].id.as_str();
        smallest
            .entry(*root)
            .and_modify(|s| {
                if id < *s {
                    *s = id;
                }
            })
            .or_insert(id);
    }
    let mut order: Vec<(&str, usize)> = smallest.into_iter().map(|(r, s)| (s, r)).collect();
    order.sort_unstable();
    let dense: HashMap<usize, usize> = order
        .iter()
        .enumerate()
        .map(|(i, (_, root))| (*root, i))
        .collect();

    let membership = roots
        .iter()
        .enumerate()
        .map(|(pos, root)| (nodes[pos].id.clone(), dense[root]))
        .collect();
    (membership, order.len())
}
