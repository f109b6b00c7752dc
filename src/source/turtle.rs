//! Turtle ontology documents loaded through oxigraph.
//!
//! [`TurtleStore`] parses a Brick-style `.ttl` document into an oxigraph
//! store and exposes it as a [`TripleSource`]. IRIs are normalized to their
//! local names (fragment, else last path segment) so the rest of the crate
//! sees the same opaque ids a hand-built [`super::mem::MemoryGraph`] uses;
//! literal objects contribute their lexical value.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use oxigraph::io::RdfFormat;
use oxigraph::model::{GraphName, Term};
use oxigraph::store::Store;

use crate::error::{BrickResult, SourceError};

use super::{Triple, TripleSource};

/// RDF triple store over one loaded Turtle document.
pub struct TurtleStore {
    store: Store,
    source_id: String,
}

impl TurtleStore {
    /// Load a Turtle document from disk.
    ///
    /// Fails with `SourceError::Unavailable` when the file cannot be opened
    /// or parsed; the failure is surfaced immediately and never retried.
    pub fn open(path: impl AsRef<Path>) -> BrickResult<Self> {
        let path = path.as_ref();
        let source_id = path.display().to_string();

        let store = Store::new().map_err(|e| SourceError::Unavailable {
            source_id: source_id.clone(),
            message: format!("failed to create store: {e}"),
        })?;
        let file = File::open(path).map_err(|e| SourceError::Unavailable {
            source_id: source_id.clone(),
            message: e.to_string(),
        })?;
        store
            .load_from_reader(RdfFormat::Turtle, BufReader::new(file))
            .map_err(|e| SourceError::Unavailable {
                source_id: source_id.clone(),
                message: format!("turtle parse failed: {e}"),
            })?;

        let loaded = Self { store, source_id };
        tracing::debug!(
            source_id = %loaded.source_id,
            triples = loaded.len(),
            "loaded turtle document"
        );
        Ok(loaded)
    }

    /// The path this store was loaded from.
    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    /// Number of quads in the underlying store.
    pub fn len(&self) -> usize {
        self.store.len().unwrap_or(0)
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Local name of an IRI: the fragment, else the last path segment.
fn local_name(iri: &str) -> String {
    let tail = iri.rsplit_once('#').map_or(iri, |(_, t)| t);
    let tail = tail.rsplit_once('/').map_or(tail, |(_, t)| t);
    tail.to_string()
}

/// Normalize an N-Triples-rendered term: IRIs are wrapped in angle brackets
/// and reduce to their local name; anything else (blank node labels) passes
/// through unchanged.
fn rendered_local(rendered: &str) -> String {
    match rendered
        .strip_prefix('<')
        .and_then(|r| r.strip_suffix('>'))
    {
        Some(iri) => local_name(iri),
        None => rendered.to_string(),
    }
}

impl TripleSource for TurtleStore {
    fn triples(&self) -> Vec<Triple> {
        self.store
            .iter()
            .filter_map(Result::ok)
            .filter(|q| matches!(q.graph_name, GraphName::DefaultGraph))
            .map(|q| Triple {
                subject: rendered_local(&q.subject.to_string()),
                predicate: local_name(q.predicate.as_str()),
                object: match &q.object {
                    Term::NamedNode(n) => local_name(n.as_str()),
                    Term::Literal(l) => l.value().to_string(),
                    other => rendered_local(&other.to_string()),
                },
            })
            .collect()
    }
}

impl std::fmt::Debug for TurtleStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TurtleStore")
            .field("source_id", &self.source_id)
            .field("triples", &self.len())
            .finish()
    }
}
