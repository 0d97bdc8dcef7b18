//! Record assembly for qremiser.
//!
//! [`RecordAssembler`] is the main entry point: it digests a file, detects
//! its format, mints identifiers, and returns a [`Record`] whose
//! relationship links exactly the object and event it carries.

pub mod assembler;
pub mod error;

pub use assembler::RecordAssembler;
pub use error::{RecordError, RecordResult};

// Re-export key types
pub use qremiser_digest::{Algorithm, HashPipeline, DEFAULT_ALGORITHMS};
pub use qremiser_format::{FormatDetector, FormatSignals};
pub use qremiser_types::{
    Event, Fixity, FormatGuess, Identifier, IdentifierGenerator, Object, ObjectCharacteristics,
    Record, Relationship, UuidGenerator,
};
