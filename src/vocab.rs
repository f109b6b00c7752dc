//! Fixed vocabulary registries for the Brick-style building ontology.
//!
//! The recognized subsystem types, functionality tags, and edge predicates
//! are compile-time constants — the controlled vocabulary everything else in
//! the crate indexes against. [`find_inverse`] resolves symmetric predicate
//! pairs during edge normalization.

/// Containment predicate: equipment → point.
pub const HAS_POINT: &str = "hasPoint";
/// Containment predicate: point → equipment (inverse of [`HAS_POINT`]).
pub const IS_POINT_OF: &str = "isPointOf";
/// Flow predicate: upstream equipment → downstream equipment.
pub const FEEDS: &str = "feeds";
/// Placement predicate: entity → location.
pub const HAS_LOCATION: &str = "hasLocation";
/// Type-assertion predicate (local name of `rdf:type`).
pub const TYPE: &str = "type";

/// Recognized subsystem type names, canonical form.
pub const SUBSYSTEM_TYPES: [&str; 9] = [
    "AHU",
    "CHILLER",
    "VAV",
    "ZONE",
    "WEATHER",
    "SOLAR_PANEL",
    "ROOM",
    "LIGHT",
    "BLIND",
];

/// Recognized functionality tags, canonical form.
pub const FUNCTION_TAGS: [&str; 8] = [
    "Temperature",
    "Humidity",
    "Pressure",
    "Flow_Rate",
    "Signal",
    "Setpoint",
    "Luminance",
    "Power",
];

/// Predicates relating an entity to its own points, within one subsystem.
pub const INTRA_PREDICATES: [&str; 2] = [HAS_POINT, IS_POINT_OF];

/// Predicates crossing subsystem boundaries.
pub const INTER_PREDICATES: [&str; 2] = [FEEDS, HAS_LOCATION];

/// Symmetric predicate pairs. Extend here when the vocabulary grows
/// (hasPart/isPartOf is the expected next pair).
const INVERSE_PAIRS: [(&str, &str); 1] = [(HAS_POINT, IS_POINT_OF)];

/// Find the declared inverse of a predicate.
///
/// `feeds` and `hasLocation` have no inverse and return `None`.
pub fn find_inverse(predicate: &str) -> Option<&'static str> {
    INVERSE_PAIRS.iter().find_map(|&(a, b)| {
        if predicate == a {
            Some(b)
        } else if predicate == b {
            Some(a)
        } else {
            None
        }
    })
}

/// Canonical form of a subsystem type name (case-insensitive lookup).
pub fn canonical_system(name: &str) -> Option<&'static str> {
    SUBSYSTEM_TYPES
        .iter()
        .copied()
        .find(|t| t.eq_ignore_ascii_case(name))
}

/// Canonical form of a functionality tag (case-insensitive lookup).
pub fn canonical_tag(name: &str) -> Option<&'static str> {
    FUNCTION_TAGS
        .iter()
        .copied()
        .find(|t| t.eq_ignore_ascii_case(name))
}
