//! Building index: entities bucketed by subsystem type and functionality tag.
//!
//! [`builder::BuildingIndex`] scans a triple source once and owns the
//! resulting indices; [`traverse`] provides the cycle-safe reachability walk
//! used to capture transitively contained points.

pub mod builder;
pub mod traverse;

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::vocab;

/// Edge table: predicate name → related entity ids.
pub type EdgeTable = BTreeMap<String, BTreeSet<String>>;

/// Subsystem type name → entity id → [`Entity`].
pub type SystemIndex = BTreeMap<String, BTreeMap<String, Entity>>;

/// Functionality tag → ordered entity-id sequence. Duplicates are allowed
/// and meaningful: the sequence is a multiset, not a set.
pub type FunctionalityIndex = BTreeMap<String, Vec<String>>;

/// One indexed graph node: a piece of equipment or a sensor.
///
/// Both edge tables are pre-seeded with every configured predicate of their
/// class, and every recorded edge is direction-normalized: a reverse-only
/// assertion in the source is mirrored into the forward predicate via
/// [`vocab::find_inverse`], so lookups are direction-agnostic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Opaque identifier (local name in the source graph).
    pub id: String,
    /// Asserted subsystem type, canonical form.
    pub system: String,
    /// Functionality tags whose needle matches the identifier.
    pub tags: Vec<String>,
    /// Containment edges ({hasPoint, isPointOf}).
    pub intra: EdgeTable,
    /// Cross-subsystem edges ({feeds, hasLocation}).
    pub inter: EdgeTable,
}

static EMPTY_SET: BTreeSet<String> = BTreeSet::new();

impl Entity {
    /// New entity with empty, fully-seeded edge tables.
    pub fn new(id: impl Into<String>, system: impl Into<String>) -> Self {
        let intra = vocab::INTRA_PREDICATES
            .iter()
            .map(|p| (p.to_string(), BTreeSet::new()))
            .collect();
        let inter = vocab::INTER_PREDICATES
            .iter()
            .map(|p| (p.to_string(), BTreeSet::new()))
            .collect();
        Self {
            id: id.into(),
            system: system.into(),
            tags: Vec::new(),
            intra,
            inter,
        }
    }

    /// The entity's contained points (`intra.hasPoint`).
    pub fn points(&self) -> &BTreeSet<String> {
        self.intra.get(vocab::HAS_POINT).unwrap_or(&EMPTY_SET)
    }

    /// Direct (single-hop) `feeds` targets.
    pub fn feeds(&self) -> &BTreeSet<String> {
        self.inter.get(vocab::FEEDS).unwrap_or(&EMPTY_SET)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_entity_has_seeded_edge_tables() {
        let e = Entity::new("chiller1", "CHILLER");
        assert_eq!(e.intra.len(), 2);
        assert_eq!(e.inter.len(), 2);
        assert!(e.points().is_empty());
        assert!(e.feeds().is_empty());
    }
}
