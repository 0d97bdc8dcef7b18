//! Fixity digests for qremiser.
//!
//! [`HashPipeline`] reads a byte stream once, in fixed-size chunks, and feeds
//! every chunk to an accumulator per requested [`Algorithm`]. Algorithms that
//! are compiled out of this build are left out of the result rather than
//! reported as errors.
//!
//! All digests wrap established libraries; nothing here is custom
//! cryptography.

pub mod algorithm;
pub mod error;
pub mod pipeline;

pub use algorithm::{Algorithm, DEFAULT_ALGORITHMS};
pub use error::{DigestError, DigestResult};
pub use pipeline::{DigestReport, HashPipeline, CHUNK_SIZE};
