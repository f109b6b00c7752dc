//! Single-scan index construction over a triple source.
//!
//! For every configured subsystem type, typed roots are seeded with one
//! level of direction-normalized edges plus the transitive `hasPoint`
//! closure; for every configured functionality tag, identifiers matching the
//! tag are collected into an ordered sequence. The built indices are
//! immutable: the builder exclusively owns them and hands out read-only
//! views.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use serde::Serialize;

use crate::error::IndexError;
use crate::source::{Triple, TripleSource};
use crate::vocab;

use super::{Entity, FunctionalityIndex, SystemIndex, traverse};

/// The two indices built from one scan of a building's triple graph.
#[derive(Debug, Clone)]
pub struct BuildingIndex {
    systems: SystemIndex,
    functions: FunctionalityIndex,
}

impl BuildingIndex {
    /// Scan the source once: bucket every typed root by subsystem type and
    /// every matching identifier by functionality tag.
    pub fn build(source: &dyn TripleSource) -> Self {
        let type_triples = source.matching(None, Some(vocab::TYPE), None);
        let all_triples = source.triples();

        let mut systems: SystemIndex = BTreeMap::new();
        for &ty in &vocab::SUBSYSTEM_TYPES {
            let mut bucket: BTreeMap<String, Entity> = BTreeMap::new();
            for t in type_triples
                .iter()
                .filter(|t| t.object.eq_ignore_ascii_case(ty))
            {
                let entity = seed_entity(source, &t.subject, ty);
                bucket.insert(t.subject.clone(), entity);
            }
            tracing::debug!(system = ty, entities = bucket.len(), "indexed subsystem bucket");
            systems.insert(ty.to_string(), bucket);
        }

        let mut functions: FunctionalityIndex = BTreeMap::new();
        for &tag in &vocab::FUNCTION_TAGS {
            let seq = scan_tag(&all_triples, tag);
            tracing::debug!(tag, matches = seq.len(), "indexed functionality sequence");
            functions.insert(tag.to_string(), seq);
        }

        let index = Self { systems, functions };
        tracing::info!(
            entities = index.entity_count(),
            triples = all_triples.len(),
            "built building index"
        );
        index
    }

    /// Bucket for a subsystem type (case-insensitive name).
    ///
    /// Fails with `UnknownType` for names outside the configured registry;
    /// a recognized type with no occurrences yields an empty bucket.
    pub fn system(&self, name: &str) -> Result<&BTreeMap<String, Entity>, IndexError> {
        vocab::canonical_system(name)
            .and_then(|canonical| self.systems.get(canonical))
            .ok_or_else(|| IndexError::UnknownType {
                name: name.to_string(),
                registry: "subsystem type",
            })
    }

    /// Id sequence for a functionality tag (case-insensitive name).
    pub fn function(&self, name: &str) -> Result<&[String], IndexError> {
        vocab::canonical_tag(name)
            .and_then(|canonical| self.functions.get(canonical))
            .map(Vec::as_slice)
            .ok_or_else(|| IndexError::UnknownType {
                name: name.to_string(),
                registry: "functionality tag",
            })
    }

    /// The full system index.
    pub fn systems(&self) -> &SystemIndex {
        &self.systems
    }

    /// The full functionality index.
    pub fn functions(&self) -> &FunctionalityIndex {
        &self.functions
    }

    /// Total number of indexed entities across all buckets.
    pub fn entity_count(&self) -> usize {
        self.systems.values().map(BTreeMap::len).sum()
    }

    /// Per-bucket summary.
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            entities: self.entity_count(),
            system_buckets: self
                .systems
                .iter()
                .map(|(ty, bucket)| (ty.clone(), bucket.len()))
                .collect(),
            function_matches: self
                .functions
                .iter()
                .map(|(tag, seq)| (tag.clone(), seq.len()))
                .collect(),
        }
    }
}

/// Seed one typed root: direct edges of the configured predicates with
/// inverse mirroring, then the transitive hasPoint closure.
fn seed_entity(source: &dyn TripleSource, id: &str, system: &str) -> Entity {
    let mut entity = Entity::new(id, system);

    let lowered = id.to_lowercase();
    entity.tags = vocab::FUNCTION_TAGS
        .iter()
        .filter(|tag| lowered.contains(&tag.to_lowercase()))
        .map(|tag| tag.to_string())
        .collect();

    for &p in &vocab::INTRA_PREDICATES {
        entity.intra.insert(p.to_string(), direct_edges(source, id, p));
    }
    for &p in &vocab::INTER_PREDICATES {
        entity.inter.insert(p.to_string(), direct_edges(source, id, p));
    }

    // Points of points land under the owning root.
    let closure = traverse::reachable(source, id, vocab::HAS_POINT);
    if let Some(points) = entity.intra.get_mut(vocab::HAS_POINT) {
        points.extend(closure);
    }
    entity
}

/// One level of edges for `predicate`, direction-normalized: a reverse-only
/// assertion is mirrored into the forward direction via the inverse table.
fn direct_edges(source: &dyn TripleSource, id: &str, predicate: &str) -> BTreeSet<String> {
    let mut set: BTreeSet<String> = source.objects_of(id, predicate).into_iter().collect();
    if let Some(inverse) = vocab::find_inverse(predicate) {
        set.extend(source.subjects_of(inverse, id));
    }
    set
}

/// Substring scan for one tag: a subject-position pass, then an
/// object-position pass, each deduplicated within itself. An id matching in
/// both positions appears twice; downstream consumers treat the sequence as
/// a multiset.
fn scan_tag(triples: &[Triple], tag: &str) -> Vec<String> {
    let needle = tag.to_lowercase();
    let mut seq = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();
    for t in triples {
        if t.subject.to_lowercase().contains(&needle) && seen.insert(t.subject.as_str()) {
            seq.push(t.subject.clone());
        }
    }
    seen.clear();
    for t in triples {
        if t.object.to_lowercase().contains(&needle) && seen.insert(t.object.as_str()) {
            seq.push(t.object.clone());
        }
    }
    seq
}

/// Summary of a built index.
#[derive(Debug, Clone, Serialize)]
pub struct IndexStats {
    pub entities: usize,
    pub system_buckets: BTreeMap<String, usize>,
    pub function_matches: BTreeMap<String, usize>,
}

impl std::fmt::Display for IndexStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "building index stats")?;
        writeln!(f, "  entities: {}", self.entities)?;
        for (ty, n) in &self.system_buckets {
            if *n > 0 {
                writeln!(f, "  {ty}: {n}")?;
            }
        }
        for (tag, n) in &self.function_matches {
            if *n > 0 {
                writeln!(f, "  {tag}: {n}")?;
            }
        }
        Ok(())
    }
}
