//! Building facade: the entry point tying sources, registry, and algebra
//! together.
//!
//! A [`Building`] resolves a source id, builds or fetches the index through
//! an [`IndexRegistry`], and hands out [`SubsystemSet`] values. This is the
//! seam a textual query front end drives.

use std::sync::Arc;

use crate::algebra::SubsystemSet;
use crate::error::BrickResult;
use crate::index::builder::{BuildingIndex, IndexStats};
use crate::registry::IndexRegistry;
use crate::source::TripleSource;
use crate::source::turtle::TurtleStore;

/// Handle on one building's built index.
#[derive(Debug, Clone)]
pub struct Building {
    source_id: String,
    index: Arc<BuildingIndex>,
}

impl Building {
    /// Open a building whose source id is a Turtle file path.
    ///
    /// The document is loaded and indexed only on the registry's first
    /// access for this id; later opens share the cached index.
    pub fn open(registry: &IndexRegistry, source_id: &str) -> BrickResult<Self> {
        Self::open_with(registry, source_id, || TurtleStore::open(source_id))
    }

    /// Open a building from any triple source.
    ///
    /// `open` runs only when the source id is unseen by the registry.
    pub fn open_with<S, F>(registry: &IndexRegistry, source_id: &str, open: F) -> BrickResult<Self>
    where
        S: TripleSource,
        F: FnOnce() -> BrickResult<S>,
    {
        let index = registry.get_or_build(source_id, open)?;
        Ok(Self {
            source_id: source_id.to_string(),
            index,
        })
    }

    /// The source id this building was opened from.
    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    /// The building's index.
    pub fn index(&self) -> &Arc<BuildingIndex> {
        &self.index
    }

    /// Per-bucket index summary.
    pub fn stats(&self) -> IndexStats {
        self.index.stats()
    }

    /// SYSTEM-kind set for the given subsystem types.
    pub fn extract_system(&self, types: &[&str]) -> BrickResult<SubsystemSet> {
        SubsystemSet::from_system(&self.index, types)
    }

    /// FUNCTION-kind set for the given functionality tags.
    pub fn extract_function(&self, tags: &[&str]) -> BrickResult<SubsystemSet> {
        SubsystemSet::from_function(&self.index, tags)
    }
}
