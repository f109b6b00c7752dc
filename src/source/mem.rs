//! In-memory triple graph with dual-indexing.
//!
//! Uses `petgraph` for the graph structure and `DashMap` for fast lookups
//! by node id and by predicate.

use std::sync::RwLock;

use dashmap::DashMap;
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

use super::{Triple, TripleSource};

/// In-memory triple graph backed by petgraph with dual-indexing.
///
/// Node weights are entity ids, edge weights are predicate names. Edge
/// enumeration preserves insertion order, which the functionality index
/// relies on.
pub struct MemoryGraph {
    /// The directed graph: nodes are entity ids, edges carry predicates.
    graph: RwLock<DiGraph<String, String>>,
    /// Entity id → NodeIndex mapping for O(1) node lookups.
    node_index: DashMap<String, NodeIndex>,
    /// Predicate index: predicate name → list of (subject, object) pairs.
    predicate_index: DashMap<String, Vec<(String, String)>>,
}

impl MemoryGraph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self {
            graph: RwLock::new(DiGraph::new()),
            node_index: DashMap::new(),
            predicate_index: DashMap::new(),
        }
    }

    /// Ensure a node exists for the given id, returning its NodeIndex.
    fn ensure_node(&self, id: &str) -> NodeIndex {
        if let Some(idx) = self.node_index.get(id) {
            return *idx.value();
        }
        let mut graph = self.graph.write().expect("graph lock poisoned");
        // Double-check after acquiring write lock
        if let Some(idx) = self.node_index.get(id) {
            return *idx.value();
        }
        let idx = graph.add_node(id.to_string());
        self.node_index.insert(id.to_string(), idx);
        idx
    }

    /// Insert a triple, creating nodes for subject and object as needed.
    pub fn add(&self, subject: &str, predicate: &str, object: &str) {
        let subj_idx = self.ensure_node(subject);
        let obj_idx = self.ensure_node(object);

        {
            let mut graph = self.graph.write().expect("graph lock poisoned");
            graph.add_edge(subj_idx, obj_idx, predicate.to_string());
        }

        self.predicate_index
            .entry(predicate.to_string())
            .or_default()
            .push((subject.to_string(), object.to_string()));
    }

    /// Check if a node exists.
    pub fn has_node(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.node_index.len()
    }

    /// Number of triples (edges).
    pub fn triple_count(&self) -> usize {
        self.graph.read().expect("graph lock poisoned").edge_count()
    }
}

impl TripleSource for MemoryGraph {
    fn triples(&self) -> Vec<Triple> {
        let graph = self.graph.read().expect("graph lock poisoned");
        graph
            .edge_indices()
            .filter_map(|ei| {
                let (src, dst) = graph.edge_endpoints(ei)?;
                Some(Triple {
                    subject: graph.node_weight(src)?.clone(),
                    predicate: graph.edge_weight(ei)?.clone(),
                    object: graph.node_weight(dst)?.clone(),
                })
            })
            .collect()
    }

    fn matching(
        &self,
        subject: Option<&str>,
        predicate: Option<&str>,
        object: Option<&str>,
    ) -> Vec<Triple> {
        match (subject, predicate, object) {
            // Predicate-bound lookups hit the predicate index.
            (s, Some(p), o) => self
                .predicate_index
                .get(p)
                .map(|pairs| {
                    pairs
                        .value()
                        .iter()
                        .filter(|(subj, obj)| {
                            s.is_none_or(|x| subj.as_str() == x)
                                && o.is_none_or(|x| obj.as_str() == x)
                        })
                        .map(|(subj, obj)| Triple::new(subj.clone(), p, obj.clone()))
                        .collect()
                })
                .unwrap_or_default(),
            // Subject-bound: walk the node's outgoing edges.
            (Some(s), None, o) => {
                let graph = self.graph.read().expect("graph lock poisoned");
                let Some(idx) = self.node_index.get(s).map(|r| *r.value()) else {
                    return vec![];
                };
                graph
                    .edges_directed(idx, Direction::Outgoing)
                    .filter_map(|e| {
                        let obj = graph.node_weight(e.target())?;
                        o.is_none_or(|x| obj.as_str() == x)
                            .then(|| Triple::new(s, e.weight().clone(), obj.clone()))
                    })
                    .collect()
            }
            // Object-bound: walk the node's incoming edges.
            (None, None, Some(obj)) => {
                let graph = self.graph.read().expect("graph lock poisoned");
                let Some(idx) = self.node_index.get(obj).map(|r| *r.value()) else {
                    return vec![];
                };
                graph
                    .edges_directed(idx, Direction::Incoming)
                    .filter_map(|e| {
                        let subj = graph.node_weight(e.source())?;
                        Some(Triple::new(subj.clone(), e.weight().clone(), obj))
                    })
                    .collect()
            }
            (None, None, None) => self.triples(),
        }
    }
}

impl Default for MemoryGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MemoryGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryGraph")
            .field("nodes", &self.node_count())
            .field("triples", &self.triple_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_query() {
        let g = MemoryGraph::new();
        g.add("chiller1", "type", "Chiller");
        g.add("chiller1", "hasPoint", "returnTemp1");

        assert!(g.has_node("chiller1"));
        assert!(g.has_node("returnTemp1"));
        assert_eq!(g.node_count(), 3); // chiller1, Chiller, returnTemp1; predicates are not nodes
        assert_eq!(g.triple_count(), 2);

        let objects = g.objects_of("chiller1", "hasPoint");
        assert_eq!(objects, vec!["returnTemp1".to_string()]);

        let subjects = g.subjects_of("type", "Chiller");
        assert_eq!(subjects, vec!["chiller1".to_string()]);
    }

    #[test]
    fn enumeration_preserves_insertion_order() {
        let g = MemoryGraph::new();
        g.add("a", "feeds", "b");
        g.add("b", "feeds", "c");
        g.add("a", "hasPoint", "p1");

        let triples = g.triples();
        assert_eq!(triples.len(), 3);
        assert_eq!(triples[0], Triple::new("a", "feeds", "b"));
        assert_eq!(triples[1], Triple::new("b", "feeds", "c"));
        assert_eq!(triples[2], Triple::new("a", "hasPoint", "p1"));
    }

    #[test]
    fn pattern_lookup_all_shapes() {
        let g = MemoryGraph::new();
        g.add("a", "feeds", "b");
        g.add("a", "feeds", "c");
        g.add("a", "hasPoint", "p1");
        g.add("d", "feeds", "b");

        assert_eq!(g.matching(Some("a"), Some("feeds"), None).len(), 2);
        assert_eq!(g.matching(Some("a"), None, None).len(), 3);
        assert_eq!(g.matching(None, Some("feeds"), None).len(), 3);
        assert_eq!(g.matching(None, None, Some("b")).len(), 2);
        assert_eq!(g.matching(Some("a"), Some("feeds"), Some("c")).len(), 1);
        assert_eq!(g.matching(None, None, None).len(), 4);
    }

    #[test]
    fn empty_queries() {
        let g = MemoryGraph::new();
        assert!(g.objects_of("a", "feeds").is_empty());
        assert!(g.subjects_of("feeds", "a").is_empty());
        assert!(g.matching(Some("a"), None, None).is_empty());
        assert!(g.triples().is_empty());
    }
}
