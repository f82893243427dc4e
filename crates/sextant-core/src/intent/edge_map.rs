use super::taxonomy::Intent;

/// Built-in intent → edge-type table.
const DEFAULT_EDGE_MAP: [(Intent, &[&str]); Intent::COUNT] = [
    (Intent::ExactMatch, &[]),
    (
        Intent::Debugging,
        &["causes", "solves", "limited_by", "depends_on"],
    ),
    (Intent::Workflow, &["precedes", "produces", "uses", "part_of"]),
    (
        Intent::Exploratory,
        &["related_to", "similar_to", "part_of", "enables"],
    ),
    (Intent::Comparison, &["alternative_to", "similar_to"]),
    (Intent::Optimization, &["optimizes", "solves", "limited_by"]),
    (Intent::HowTo, &["implements", "realizes", "enables", "uses"]),
    (Intent::BroadSemantic, &["related_to", "part_of"]),
    (Intent::General, &["implements", "uses", "related_to"]),
];

/// Ordered set of edge types each intent traverses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntentEdgeMap {
    edges: Vec<Vec<String>>,
}

impl Default for IntentEdgeMap {
    fn default() -> Self {
        let mut edges = vec![Vec::new(); Intent::COUNT];
        for (intent, types) in DEFAULT_EDGE_MAP {
            edges[intent.index()] = types.iter().map(|t| t.to_string()).collect();
        }
        Self { edges }
    }
}

impl IntentEdgeMap {
    pub fn edge_types(&self, intent: Intent) -> &[String] {
        &self.edges[intent.index()]
    }

    pub fn contains(&self, intent: Intent, edge_type: &str) -> bool {
        self.edge_types(intent).iter().any(|t| t == edge_type)
    }

    /// Replace the list for one intent. Duplicates are dropped, order kept.
    pub fn set(&mut self, intent: Intent, edge_types: Vec<String>) {
        let mut deduped: Vec<String> = Vec::with_capacity(edge_types.len());
        for t in edge_types {
            if !deduped.contains(&t) {
                deduped.push(t);
            }
        }
        self.edges[intent.index()] = deduped;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_traverses_nothing() {
        assert!(IntentEdgeMap::default()
            .edge_types(Intent::ExactMatch)
            .is_empty());
    }

    #[test]
    fn debugging_order_is_preserved() {
        let map = IntentEdgeMap::default();
        assert_eq!(
            map.edge_types(Intent::Debugging),
            ["causes", "solves", "limited_by", "depends_on"]
        );
    }

    #[test]
    fn set_deduplicates() {
        let mut map = IntentEdgeMap::default();
        map.set(
            Intent::Comparison,
            vec!["a".into(), "b".into(), "a".into()],
        );
        assert_eq!(map.edge_types(Intent::Comparison), ["a", "b"]);
        assert!(map.contains(Intent::Comparison, "b"));
    }
}
