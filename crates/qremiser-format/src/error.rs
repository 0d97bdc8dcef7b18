use std::io;

/// Errors produced by format detection.
///
/// A missing signal is never an error; only failing to read the file is.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type FormatResult<T> = Result<T, FormatError>;
