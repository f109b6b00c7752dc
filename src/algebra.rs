//! The subsystem algebra: immutable set values with union, restrict, and
//! feeds-join.
//!
//! A [`SubsystemSet`] is either SYSTEM kind (an entity map, one or more
//! subsystem-type buckets merged) or FUNCTION kind (an ordered id sequence
//! with meaningful duplicates). The three operators are pure: operands are
//! never mutated and every result is a new value, so sets can be combined
//! freely from any number of threads.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{AlgebraError, BrickResult, IndexError};
use crate::index::Entity;
use crate::index::builder::BuildingIndex;
use crate::vocab;

/// Which payload a [`SubsystemSet`] carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SetKind {
    /// Entity map keyed by id.
    System,
    /// Ordered entity-id sequence.
    Function,
}

impl std::fmt::Display for SetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SetKind::System => write!(f, "SYSTEM"),
            SetKind::Function => write!(f, "FUNCTION"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Payload {
    System(BTreeMap<String, Entity>),
    Function(Vec<String>),
}

/// An immutable subsystem query value.
///
/// Carries its payload, the contributing type/tag names (provenance), and a
/// read-only back-reference to the index it derives from.
#[derive(Debug, Clone)]
pub struct SubsystemSet {
    payload: Payload,
    names: Vec<String>,
    index: Arc<BuildingIndex>,
}

impl PartialEq for SubsystemSet {
    /// Payload and provenance; the index back-reference is identity, not
    /// value, and is ignored.
    fn eq(&self, other: &Self) -> bool {
        self.payload == other.payload && self.names == other.names
    }
}

impl SubsystemSet {
    /// SYSTEM set: union of the chosen subsystem-type buckets, in input
    /// order.
    ///
    /// On entity-id collision across types the later type's record wins
    /// (documented last-write-wins).
    pub fn from_system(index: &Arc<BuildingIndex>, types: &[&str]) -> BrickResult<Self> {
        let mut entities: BTreeMap<String, Entity> = BTreeMap::new();
        let mut names = Vec::with_capacity(types.len());
        for ty in types {
            let canonical = vocab::canonical_system(ty).ok_or_else(|| IndexError::UnknownType {
                name: ty.to_string(),
                registry: "subsystem type",
            })?;
            let bucket = index.system(canonical)?;
            entities.extend(bucket.iter().map(|(id, e)| (id.clone(), e.clone())));
            names.push(canonical.to_string());
        }
        Ok(Self {
            payload: Payload::System(entities),
            names,
            index: Arc::clone(index),
        })
    }

    /// FUNCTION set: concatenation of the chosen tag sequences, in input
    /// order, duplicates preserved.
    pub fn from_function(index: &Arc<BuildingIndex>, tags: &[&str]) -> BrickResult<Self> {
        let mut points = Vec::new();
        let mut names = Vec::with_capacity(tags.len());
        for tag in tags {
            let canonical = vocab::canonical_tag(tag).ok_or_else(|| IndexError::UnknownType {
                name: tag.to_string(),
                registry: "functionality tag",
            })?;
            points.extend(index.function(canonical)?.iter().cloned());
            names.push(canonical.to_string());
        }
        Ok(Self {
            payload: Payload::Function(points),
            names,
            index: Arc::clone(index),
        })
    }

    /// The value's kind tag.
    pub fn kind(&self) -> SetKind {
        match self.payload {
            Payload::System(_) => SetKind::System,
            Payload::Function(_) => SetKind::Function,
        }
    }

    /// Contributing type/tag names, in contribution order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// SYSTEM payload, if this is a SYSTEM set.
    pub fn entities(&self) -> Option<&BTreeMap<String, Entity>> {
        match &self.payload {
            Payload::System(entities) => Some(entities),
            Payload::Function(_) => None,
        }
    }

    /// FUNCTION payload, if this is a FUNCTION set.
    pub fn point_ids(&self) -> Option<&[String]> {
        match &self.payload {
            Payload::System(_) => None,
            Payload::Function(points) => Some(points),
        }
    }

    /// Entity count (SYSTEM) or sequence length (FUNCTION).
    pub fn len(&self) -> usize {
        match &self.payload {
            Payload::System(entities) => entities.len(),
            Payload::Function(points) => points.len(),
        }
    }

    /// Whether the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The index this value derives from.
    pub fn index(&self) -> &Arc<BuildingIndex> {
        &self.index
    }

    /// Same-kind union.
    ///
    /// SYSTEM⊕SYSTEM is map union with `other` overwriting on id collision
    /// (the same last-write-wins rule as [`SubsystemSet::from_system`]).
    /// FUNCTION⊕FUNCTION is concatenation, `self` then `other`: associative,
    /// not commutative — order and duplicate count both carry meaning.
    pub fn union(&self, other: &Self) -> BrickResult<Self> {
        let payload = match (&self.payload, &other.payload) {
            (Payload::System(a), Payload::System(b)) => {
                let mut merged = a.clone();
                merged.extend(b.iter().map(|(id, e)| (id.clone(), e.clone())));
                Payload::System(merged)
            }
            (Payload::Function(a), Payload::Function(b)) => {
                let mut merged = a.clone();
                merged.extend(b.iter().cloned());
                Payload::Function(merged)
            }
            _ => {
                return Err(AlgebraError::KindMismatch {
                    op: "union",
                    left: self.kind(),
                    right: other.kind(),
                }
                .into());
            }
        };
        Ok(Self {
            payload,
            names: [self.names.clone(), other.names.clone()].concat(),
            index: Arc::clone(&self.index),
        })
    }

    /// Restrict a SYSTEM operand's point sets by a FUNCTION operand.
    ///
    /// Operand order is free. The result is SYSTEM with exactly the same
    /// entity-id set; every entity's `intra.hasPoint` is replaced by its
    /// intersection with the function ids (deduplicated). No entity is ever
    /// dropped, and applying the same restriction twice is idempotent.
    pub fn restrict(&self, other: &Self) -> BrickResult<Self> {
        let (system, function) = match (&self.payload, &other.payload) {
            (Payload::System(s), Payload::Function(f)) => (s, f),
            (Payload::Function(f), Payload::System(s)) => (s, f),
            _ => {
                return Err(AlgebraError::KindMismatch {
                    op: "restrict",
                    left: self.kind(),
                    right: other.kind(),
                }
                .into());
            }
        };

        let keep: BTreeSet<&str> = function.iter().map(String::as_str).collect();
        let mut entities = system.clone();
        for entity in entities.values_mut() {
            if let Some(points) = entity.intra.get_mut(vocab::HAS_POINT) {
                points.retain(|p| keep.contains(p.as_str()));
            }
        }
        Ok(Self {
            payload: Payload::System(entities),
            names: [self.names.clone(), other.names.clone()].concat(),
            index: Arc::clone(&self.index),
        })
    }

    /// Feeds-join: filter the downstream operand to the direct `feeds`
    /// targets of the upstream operand.
    ///
    /// Both operands must be SYSTEM kind; not commutative. Deliberately one
    /// hop — transitive reachability is [`crate::index::traverse::reachable`],
    /// a separate explicit operation. Entities outside the target set are
    /// dropped entirely (contrast with [`SubsystemSet::restrict`], which
    /// never drops entities).
    pub fn join(&self, other: &Self) -> BrickResult<Self> {
        let (Payload::System(upstream), Payload::System(downstream)) =
            (&self.payload, &other.payload)
        else {
            return Err(AlgebraError::KindMismatch {
                op: "join",
                left: self.kind(),
                right: other.kind(),
            }
            .into());
        };

        let fed: BTreeSet<&str> = upstream
            .values()
            .flat_map(|e| e.feeds().iter().map(String::as_str))
            .collect();
        let entities: BTreeMap<String, Entity> = downstream
            .iter()
            .filter(|(id, _)| fed.contains(id.as_str()))
            .map(|(id, e)| (id.clone(), e.clone()))
            .collect();
        Ok(Self {
            payload: Payload::System(entities),
            names: other.names.clone(),
            index: Arc::clone(&self.index),
        })
    }
}
