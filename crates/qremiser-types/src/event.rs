use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::identifier::Identifier;

/// Detail recorded on every description event.
pub const DESCRIPTION_DETAIL: &str = "Initial qremis record created";

/// Kind of preservation event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    /// The object was characterized and its record produced.
    Description,
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Description => write!(f, "description"),
        }
    }
}

/// Result of a preservation event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventOutcome {
    Success,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventOutcomeInformation {
    pub event_outcome: EventOutcome,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDetailInformation {
    pub event_detail: String,
}

/// The act of having characterized an object.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub identifier: Identifier,
    pub event_type: EventType,
    pub event_date_time: DateTime<Utc>,
    pub event_outcome_information: EventOutcomeInformation,
    pub event_detail_information: EventDetailInformation,
}

impl Event {
    /// A successful description event stamped with the current time.
    pub fn description(identifier: Identifier) -> Self {
        Self::description_at(identifier, Utc::now())
    }

    /// A successful description event stamped with `at`.
    pub fn description_at(identifier: Identifier, at: DateTime<Utc>) -> Self {
        Self {
            identifier,
            event_type: EventType::Description,
            event_date_time: at,
            event_outcome_information: EventOutcomeInformation {
                event_outcome: EventOutcome::Success,
            },
            event_detail_information: EventDetailInformation {
                event_detail: DESCRIPTION_DETAIL.to_string(),
            },
        }
    }

    pub fn outcome(&self) -> EventOutcome {
        self.event_outcome_information.event_outcome
    }

    pub fn detail(&self) -> &str {
        &self.event_detail_information.event_detail
    }
}
