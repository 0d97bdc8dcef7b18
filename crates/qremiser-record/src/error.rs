use std::io;
use std::path::{Path, PathBuf};

use qremiser_types::TypeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecordError {
    /// The file was missing, unreadable, or failed mid-read. No record is
    /// produced.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An identifier could not be minted.
    #[error("invalid identifier: {0}")]
    Identifier(#[from] TypeError),
}

impl RecordError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

pub type RecordResult<T> = Result<T, RecordError>;
