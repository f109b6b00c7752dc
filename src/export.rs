//! Export types for handing algebra results to the presentation layer.
//!
//! These provide a serializable, self-describing view of a [`SubsystemSet`]
//! suitable for JSON export. Persistence of the index itself is out of
//! scope; this is a read-only rendering of an algebra value.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::algebra::SubsystemSet;
use crate::index::Entity;

/// Serialized view of a [`SubsystemSet`].
///
/// Exactly one of `entities`/`points` is populated, matching the kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubsystemSetExport {
    /// "SYSTEM" or "FUNCTION".
    pub kind: String,
    /// Contributing type/tag names, in contribution order.
    pub names: Vec<String>,
    /// SYSTEM payload: entity id → entity record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entities: Option<BTreeMap<String, Entity>>,
    /// FUNCTION payload: ordered entity-id sequence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<Vec<String>>,
}

impl From<&SubsystemSet> for SubsystemSetExport {
    fn from(set: &SubsystemSet) -> Self {
        Self {
            kind: set.kind().to_string(),
            names: set.names().to_vec(),
            entities: set.entities().cloned(),
            points: set.point_ids().map(<[String]>::to_vec),
        }
    }
}

/// JSON rendering of a set for the external query layer.
pub fn to_json(set: &SubsystemSet) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&SubsystemSetExport::from(set))
}
