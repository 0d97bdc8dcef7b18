/// Errors produced while choosing digest algorithms.
///
/// Reading a stream only fails with [`std::io::Error`].
#[derive(Debug, thiserror::Error)]
pub enum DigestError {
    /// An algorithm name that this crate does not know.
    #[error("unknown digest algorithm: {0}")]
    UnknownAlgorithm(String),
}

pub type DigestResult<T> = Result<T, DigestError>;
