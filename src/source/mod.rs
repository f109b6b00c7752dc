//! Triple sources: the supplied graph query capability.
//!
//! The index builder consumes any [`TripleSource`]: full enumeration of
//! (subject, predicate, object) triples plus pattern lookup with a subset of
//! positions bound. Two implementations are provided — an insertion-ordered
//! in-memory graph ([`mem::MemoryGraph`]) and a Turtle document loaded
//! through oxigraph ([`turtle::TurtleStore`]).

pub mod mem;
pub mod turtle;

use serde::{Deserialize, Serialize};

/// A (subject, predicate, object) triple. All positions are local names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Triple {
    /// The subject of the triple.
    pub subject: String,
    /// The predicate (relation) of the triple.
    pub predicate: String,
    /// The object of the triple.
    pub object: String,
}

impl Triple {
    /// Create a new triple.
    pub fn new(
        subject: impl Into<String>,
        predicate: impl Into<String>,
        object: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }
}

/// Abstract triple-graph capability consumed by the index builder.
///
/// Implementations decide where the triples live; the builder only needs a
/// stable enumeration order and partially-bound lookup.
pub trait TripleSource: Send + Sync {
    /// Enumerate every triple, in the source's stable iteration order.
    fn triples(&self) -> Vec<Triple>;

    /// Pattern lookup with any subset of positions bound.
    ///
    /// The default implementation filters [`TripleSource::triples`]; indexed
    /// sources override it.
    fn matching(
        &self,
        subject: Option<&str>,
        predicate: Option<&str>,
        object: Option<&str>,
    ) -> Vec<Triple> {
        self.triples()
            .into_iter()
            .filter(|t| {
                subject.is_none_or(|s| t.subject == s)
                    && predicate.is_none_or(|p| t.predicate == p)
                    && object.is_none_or(|o| t.object == o)
            })
            .collect()
    }

    /// All objects `o` with `(subject, predicate, o)` asserted.
    fn objects_of(&self, subject: &str, predicate: &str) -> Vec<String> {
        self.matching(Some(subject), Some(predicate), None)
            .into_iter()
            .map(|t| t.object)
            .collect()
    }

    /// All subjects `s` with `(s, predicate, object)` asserted.
    fn subjects_of(&self, predicate: &str, object: &str) -> Vec<String> {
        self.matching(None, Some(predicate), Some(object))
            .into_iter()
            .map(|t| t.subject)
            .collect()
    }
}
