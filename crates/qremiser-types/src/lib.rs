//! Preservation metadata entities for qremiser.
//!
//! A characterization produces one [`Record`]: an [`Object`] describing the
//! file, an [`Event`] describing the act of characterization, and a
//! [`Relationship`] tying the two together. Entities reference each other
//! only through [`Identifier`] values, never by embedding.
//!
//! # Key Types
//!
//! - [`Identifier`] — Typed opaque token naming an entity
//! - [`IdentifierGenerator`] — Source of fresh identifiers ([`UuidGenerator`] by default)
//! - [`Fixity`] — One digest algorithm and its hex output
//! - [`FormatGuess`] — Candidate media type plus the method that produced it
//! - [`ObjectCharacteristics`] — Size, fixities, and format guesses of a file
//! - [`Record`] — The linked object/event/relationship triple

pub mod error;
pub mod event;
pub mod fixity;
pub mod format;
pub mod identifier;
pub mod object;
pub mod record;
pub mod relationship;

pub use error::{TypeError, TypeResult};
pub use event::{Event, EventOutcome, EventType, DESCRIPTION_DETAIL};
pub use fixity::Fixity;
pub use format::{FormatGuess, FormatSource};
pub use identifier::{Identifier, IdentifierGenerator, UuidGenerator, UUID_IDENTIFIER_TYPE};
pub use object::{Object, ObjectCategory, ObjectCharacteristics};
pub use record::Record;
pub use relationship::{Relationship, RelationshipSubType, RelationshipType, LINK_NOTE};
