use serde::{Deserialize, Serialize};

use crate::error::{TypeError, TypeResult};
use crate::event::Event;
use crate::identifier::Identifier;
use crate::object::Object;
use crate::relationship::Relationship;

/// The object, event, and relationship produced by one characterization.
///
/// The relationship always links exactly this record's object and event.
/// [`Record::link`] builds the relationship itself, and deserialization
/// rejects documents whose links point elsewhere.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RecordParts")]
pub struct Record {
    object: Object,
    event: Event,
    relationship: Relationship,
}

#[derive(Deserialize)]
struct RecordParts {
    object: Object,
    event: Event,
    relationship: Relationship,
}

impl TryFrom<RecordParts> for Record {
    type Error = TypeError;

    fn try_from(parts: RecordParts) -> TypeResult<Self> {
        Self::from_parts(parts.object, parts.event, parts.relationship)
    }
}

impl Record {
    /// Tie `object` and `event` together under a new relationship.
    pub fn link(object: Object, event: Event, relationship_identifier: Identifier) -> Self {
        let relationship = Relationship::link(relationship_identifier, &object, &event);
        Self {
            object,
            event,
            relationship,
        }
    }

    /// Reassemble a record from its entities, checking the relationship links.
    pub fn from_parts(object: Object, event: Event, relationship: Relationship) -> TypeResult<Self> {
        if relationship.linking_object_identifier != object.identifier {
            return Err(TypeError::DanglingLink {
                field: "object",
                expected: object.identifier,
                actual: relationship.linking_object_identifier,
            });
        }
        if relationship.linking_event_identifier != event.identifier {
            return Err(TypeError::DanglingLink {
                field: "event",
                expected: event.identifier,
                actual: relationship.linking_event_identifier,
            });
        }
        Ok(Self {
            object,
            event,
            relationship,
        })
    }

    pub fn object(&self) -> &Object {
        &self.object
    }

    pub fn event(&self) -> &Event {
        &self.event
    }

    pub fn relationship(&self) -> &Relationship {
        &self.relationship
    }

    /// Hand the entities over to the caller.
    pub fn into_parts(self) -> (Object, Event, Relationship) {
        (self.object, self.event, self.relationship)
    }
}
