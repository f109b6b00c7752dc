//! Process-wide cache of built building indices.
//!
//! One [`BuildingIndex`] per source id, built at most once and never
//! evicted: memory grows with the number of distinct sources opened in a
//! run, which is the documented contract. The registry is an explicit value
//! to construct and share, not a hidden global.

use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::error::BrickResult;
use crate::index::builder::BuildingIndex;
use crate::source::TripleSource;

/// Concurrent source-id → index cache.
///
/// First access for an unseen id holds that shard's entry lock across the
/// build, so two racing callers resolve to exactly one build: the loser
/// blocks, then observes the completed entry. Built entries are immutable
/// and shared without further locking.
#[derive(Default)]
pub struct IndexRegistry {
    entries: DashMap<String, Arc<BuildingIndex>>,
}

impl IndexRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Fetch the index for `source_id`, building it on first access.
    ///
    /// `open` runs only when the id is unseen; its failure leaves the
    /// registry unchanged so a later call can retry.
    pub fn get_or_build<S, F>(&self, source_id: &str, open: F) -> BrickResult<Arc<BuildingIndex>>
    where
        S: TripleSource,
        F: FnOnce() -> BrickResult<S>,
    {
        match self.entries.entry(source_id.to_string()) {
            Entry::Occupied(entry) => {
                tracing::debug!(source_id, "index cache hit");
                Ok(Arc::clone(entry.get()))
            }
            Entry::Vacant(entry) => {
                let source = open()?;
                let index = Arc::new(BuildingIndex::build(&source));
                tracing::info!(
                    source_id,
                    entities = index.entity_count(),
                    "registered building index"
                );
                entry.insert(Arc::clone(&index));
                Ok(index)
            }
        }
    }

    /// Already-built index for `source_id`, if any.
    pub fn get(&self, source_id: &str) -> Option<Arc<BuildingIndex>> {
        self.entries.get(source_id).map(|e| Arc::clone(e.value()))
    }

    /// Whether an index has been built for `source_id`.
    pub fn contains(&self, source_id: &str) -> bool {
        self.entries.contains_key(source_id)
    }

    /// Number of cached indices.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for IndexRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexRegistry")
            .field("sources", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::error::SourceError;
    use crate::source::mem::MemoryGraph;

    fn small_graph() -> MemoryGraph {
        let g = MemoryGraph::new();
        g.add("chiller1", "type", "Chiller");
        g
    }

    #[test]
    fn builds_once_per_source_id() {
        let registry = IndexRegistry::new();
        let opened = AtomicUsize::new(0);

        let open = || {
            opened.fetch_add(1, Ordering::SeqCst);
            Ok(small_graph())
        };
        let first = registry.get_or_build("cp1", open).unwrap();

        let open = || {
            opened.fetch_add(1, Ordering::SeqCst);
            Ok(small_graph())
        };
        let second = registry.get_or_build("cp1", open).unwrap();

        assert_eq!(opened.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn distinct_source_ids_build_separately() {
        let registry = IndexRegistry::new();
        registry.get_or_build("cp1", || Ok(small_graph())).unwrap();
        registry.get_or_build("cp2", || Ok(small_graph())).unwrap();
        assert_eq!(registry.len(), 2);
        assert!(registry.contains("cp1"));
        assert!(!registry.contains("cp3"));
    }

    #[test]
    fn failed_open_leaves_registry_unchanged() {
        let registry = IndexRegistry::new();
        let result = registry.get_or_build("missing", || {
            Err::<MemoryGraph, _>(
                SourceError::Unavailable {
                    source_id: "missing".into(),
                    message: "no such file".into(),
                }
                .into(),
            )
        });
        assert!(result.is_err());
        assert!(registry.is_empty());

        // A later call can retry and succeed.
        registry.get_or_build("missing", || Ok(small_graph())).unwrap();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn concurrent_first_access_builds_exactly_once() {
        let registry = IndexRegistry::new();
        let opened = AtomicUsize::new(0);

        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    let index = registry
                        .get_or_build("cp1", || {
                            opened.fetch_add(1, Ordering::SeqCst);
                            Ok(small_graph())
                        })
                        .unwrap();
                    assert_eq!(index.entity_count(), 1);
                });
            }
        });

        assert_eq!(opened.load(Ordering::SeqCst), 1);
        assert_eq!(registry.len(), 1);
    }
}
