//! Per-graph artifact slots with concurrent builds across graphs.

use std::sync::{Arc, PoisonError, RwLock};

use dashmap::DashMap;
use sextant_core::{SextantError, SextantResult};
use tracing::debug;

type Slot<T> = Arc<RwLock<Option<Arc<T>>>>;

/// graph id → lazily built, shared value.
///
/// Each graph has its own slot lock, so a slow build for one graph never
/// blocks readers of another. A slot is filled only by a successful build.
/// Invalidation detaches the slot: a build still running on it finishes
/// into a slot nobody reads.
pub struct GraphCacheRegistry<T> {
    slots: DashMap<String, Slot<T>>,
}

impl<T> GraphCacheRegistry<T> {
    pub fn new() -> Self {
        Self {
            slots: DashMap::new(),
        }
    }

    /// Cached value for `graph_id`, building it with `build` on a miss.
    pub fn get_or_try_build<F>(&self, graph_id: &str, build: F) -> SextantResult<Arc<T>>
    where
        F: FnOnce() -> SextantResult<T>,
    {
        let slot = self.slot(graph_id);
        {
            let guard = slot.read().map_err(|e| poisoned(graph_id, e))?;
            if let Some(value) = guard.as_ref() {
                return Ok(Arc::clone(value));
            }
        }

        let mut guard = slot.write().map_err(|e| poisoned(graph_id, e))?;
        if let Some(value) = guard.as_ref() {
            return Ok(Arc::clone(value));
        }
        match build() {
            Ok(value) => {
                let value = Arc::new(value);
                *guard = Some(Arc::clone(&value));
                debug!(graph_id, "graph artifacts cached");
                Ok(value)
            }
            Err(e) => {
                drop(guard);
                self.slots
                    .remove_if(graph_id, |_, s| Arc::ptr_eq(s, &slot) && is_empty(s));
                Err(e)
            }
        }
    }

    /// Cached value without building.
    pub fn get(&self, graph_id: &str) -> Option<Arc<T>> {
        let slot = self.slots.get(graph_id).map(|s| Arc::clone(s.value()))?;
        let guard = slot.read().ok()?;
        guard.as_ref().map(Arc::clone)
    }

    /// Detach one graph's slot. Returns whether there was one.
    pub fn invalidate(&self, graph_id: &str) -> bool {
        self.slots.remove(graph_id).is_some()
    }

    pub fn clear(&self) {
        self.slots.clear();
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn slot(&self, graph_id: &str) -> Slot<T> {
        if let Some(slot) = self.slots.get(graph_id) {
            return Arc::clone(slot.value());
        }
        Arc::clone(self.slots.entry(graph_id.to_string()).or_default().value())
    }
}

impl<T> Default for GraphCacheRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn is_empty<T>(slot: &Slot<T>) -> bool {
    slot.read().map(|g| g.is_none()).unwrap_or(false)
}

fn poisoned<G>(graph_id: &str, _: PoisonError<G>) -> SextantError {
    SextantError::ConcurrencyError(format!("cache slot for graph {graph_id} is poisoned"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn builds_once_and_shares() {
        let registry: GraphCacheRegistry<String> = GraphCacheRegistry::new();
        let builds = AtomicUsize::new(0);
        let build = || {
            builds.fetch_add(1, Ordering::SeqCst);
            Ok("artifact".to_string())
        };
        let a = registry.get_or_try_build("g", build).unwrap();
        let b = registry.get_or_try_build("g", build).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(builds.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn invalidate_forces_rebuild() {
        let registry: GraphCacheRegistry<u32> = GraphCacheRegistry::new();
        let a = registry.get_or_try_build("g", || Ok(1)).unwrap();
        assert!(registry.invalidate("g"));
        let b = registry.get_or_try_build("g", || Ok(2)).unwrap();
        assert_eq!((*a, *b), (1, 2));
        assert!(!registry.invalidate("missing"));
    }

    #[test]
    fn failed_build_leaves_no_slot() {
        let registry: GraphCacheRegistry<u32> = GraphCacheRegistry::new();
        let err = registry
            .get_or_try_build("nope", || {
                Err(SextantError::UnknownGraph {
                    graph_id: "nope".into(),
                })
            })
            .unwrap_err();
        assert!(err.is_invalid_input());
        assert!(registry.is_empty());
        assert!(registry.get("nope").is_none());
    }

    #[test]
    fn graphs_are_independent() {
        let registry: GraphCacheRegistry<&'static str> = GraphCacheRegistry::new();
        registry.get_or_try_build("a", || Ok("A")).unwrap();
        registry.get_or_try_build("b", || Ok("B")).unwrap();
        registry.invalidate("a");
        assert!(registry.get("a").is_none());
        assert_eq!(registry.get("b").as_deref(), Some(&"B"));
    }
}
