use serde::{Deserialize, Serialize};

use crate::event::Event;
use crate::identifier::Identifier;
use crate::object::Object;

/// Note recorded on the relationship between an object and its description event.
pub const LINK_NOTE: &str = "Link between object and original description event";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationshipType {
    Link,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationshipSubType {
    Simple,
}

/// Link from an object to the event that described it.
///
/// Holds copies of the linked identifiers rather than the entities, so the
/// record stays a tree of owned values.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    pub identifier: Identifier,
    pub relationship_type: RelationshipType,
    pub relationship_sub_type: RelationshipSubType,
    pub linking_object_identifier: Identifier,
    pub linking_event_identifier: Identifier,
    pub relationship_note: String,
}

impl Relationship {
    /// Simple link between `object` and `event`.
    pub fn link(identifier: Identifier, object: &Object, event: &Event) -> Self {
        Self {
            identifier,
            relationship_type: RelationshipType::Link,
            relationship_sub_type: RelationshipSubType::Simple,
            linking_object_identifier: object.identifier.clone(),
            linking_event_identifier: event.identifier.clone(),
            relationship_note: LINK_NOTE.to_string(),
        }
    }
}
