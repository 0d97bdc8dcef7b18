use thiserror::Error;

use crate::identifier::Identifier;

/// Errors produced by entity construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("identifier type must not be empty")]
    EmptyIdentifierType,

    #[error("identifier value must not be empty")]
    EmptyIdentifierValue,

    #[error("relationship links {field} {actual}, but the record carries {expected}")]
    DanglingLink {
        field: &'static str,
        expected: Identifier,
        actual: Identifier,
    },
}

pub type TypeResult<T> = Result<T, TypeError>;
