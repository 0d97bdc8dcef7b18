//! Format detection for qremiser.
//!
//! Two independent signals are produced for a file: a content guess from a
//! magic-number table applied to its leading bytes, and a name guess from
//! the extension of the name the file was uploaded under. Neither signal
//! overrides the other; both are reported with their own provenance.

pub mod detector;
pub mod error;
pub mod signature;

pub use detector::{FormatDetector, FormatSignals, DEFAULT_HEAD_LEN};
pub use error::{FormatError, FormatResult};
pub use signature::{sniff, Signature, SIGNATURES};
