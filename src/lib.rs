//! # brickgraph
//!
//! Subsystem indexing and query algebra for Brick-style building ontologies.
//!
//! Building-automation metadata is a typed triple graph: equipment and
//! sensors are nodes, `hasPoint`/`isPointOf` (containment), `feeds` (flow),
//! and `hasLocation` (placement) are edges. brickgraph scans such a graph
//! once into two indices — by subsystem type and by functionality tag — and
//! lets callers compose structural queries over them without re-touching the
//! graph.
//!
//! ## Architecture
//!
//! - **Vocabulary** (`vocab`): fixed registries of subsystem types,
//!   functionality tags, edge predicates, and the inverse-pair table
//! - **Sources** (`source`): the supplied triple capability — a
//!   petgraph-backed in-memory graph and oxigraph-loaded Turtle documents
//! - **Index** (`index`): one-scan builder with direction-normalized edges
//!   and cycle-safe containment closure
//! - **Registry** (`registry`): process-lifetime source-id → index cache,
//!   one build per source
//! - **Algebra** (`algebra`): immutable `SubsystemSet` values with `union`,
//!   `restrict`, and feeds-`join`
//! - **Facade** (`building`): `open` / `extract_system` / `extract_function`
//!
//! ## Library usage
//!
//! ```
//! use brickgraph::building::Building;
//! use brickgraph::registry::IndexRegistry;
//! use brickgraph::source::mem::MemoryGraph;
//!
//! # fn main() -> brickgraph::error::BrickResult<()> {
//! let graph = MemoryGraph::new();
//! graph.add("chiller1", "type", "Chiller");
//! graph.add("chiller1_supply_temperature", "isPointOf", "chiller1");
//! graph.add("ahu1", "type", "AHU");
//! graph.add("chiller1", "feeds", "ahu1");
//!
//! let registry = IndexRegistry::new();
//! let building = Building::open_with(&registry, "demo", || Ok(graph))?;
//!
//! let chillers = building.extract_system(&["CHILLER"])?;
//! let temperatures = building.extract_function(&["Temperature"])?;
//! let chiller_temps = chillers.restrict(&temperatures)?;
//! assert_eq!(chiller_temps.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod algebra;
pub mod building;
pub mod error;
pub mod export;
pub mod index;
pub mod registry;
pub mod source;
pub mod vocab;
