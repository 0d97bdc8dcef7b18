use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{TypeError, TypeResult};

/// Identifier type recorded for every identifier minted by [`UuidGenerator`].
pub const UUID_IDENTIFIER_TYPE: &str = "uuid";

/// Typed opaque token naming an object, event, or relationship.
///
/// Entities in a [`Record`](crate::Record) point at each other through
/// identifiers. Two identifiers are equal only when both the type and the
/// value match.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawIdentifier")]
pub struct Identifier {
    #[serde(rename = "type")]
    kind: String,
    value: String,
}

#[derive(Deserialize)]
struct RawIdentifier {
    #[serde(rename = "type")]
    kind: String,
    value: String,
}

impl TryFrom<RawIdentifier> for Identifier {
    type Error = TypeError;

    fn try_from(raw: RawIdentifier) -> TypeResult<Self> {
        Self::new(raw.kind, raw.value)
    }
}

impl Identifier {
    /// Build an identifier from a caller-supplied type and value.
    ///
    /// Used to re-identify an object that already has an identifier in some
    /// other system. Both parts must be non-empty.
    pub fn new(kind: impl Into<String>, value: impl Into<String>) -> TypeResult<Self> {
        let kind = kind.into();
        let value = value.into();
        if kind.is_empty() {
            return Err(TypeError::EmptyIdentifierType);
        }
        if value.is_empty() {
            return Err(TypeError::EmptyIdentifierValue);
        }
        Ok(Self { kind, value })
    }

    /// The identifier type (e.g. `"uuid"`).
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// The identifier value.
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Debug for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identifier({}:{})", self.kind, self.value)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.value)
    }
}

/// Source of fresh identifiers.
///
/// Implementations must be safe to share between threads and must not hand
/// out the same value twice to concurrent callers.
pub trait IdentifierGenerator: Send + Sync {
    /// Mint a fresh identifier of type `kind`. An empty `kind` is rejected.
    fn generate(&self, kind: &str) -> TypeResult<Identifier>;

    /// Use `supplied` when present, otherwise mint a fresh identifier of
    /// type `kind`.
    fn generate_or(&self, kind: &str, supplied: Option<Identifier>) -> TypeResult<Identifier> {
        match supplied {
            Some(id) => Ok(id),
            None => self.generate(kind),
        }
    }
}

/// Mints random (v4) UUIDs rendered as 32 lowercase hex characters.
#[derive(Clone, Copy, Debug, Default)]
pub struct UuidGenerator;

impl IdentifierGenerator for UuidGenerator {
    fn generate(&self, kind: &str) -> TypeResult<Identifier> {
        Identifier::new(kind, Uuid::new_v4().simple().to_string())
    }
}
