use serde::{Deserialize, Serialize};

use crate::fixity::Fixity;
use crate::format::FormatGuess;
use crate::identifier::Identifier;

/// Category of a described object. Only whole files are described.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectCategory {
    #[default]
    File,
}

/// Measured characteristics of a file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectCharacteristics {
    /// Exact byte length of the file when it was characterized.
    pub size: u64,
    /// One entry per digest algorithm that produced a value.
    #[serde(rename = "fixity", default)]
    pub fixities: Vec<Fixity>,
    /// Content guess first, name guess second; either may be absent.
    #[serde(rename = "format", default)]
    pub formats: Vec<FormatGuess>,
}

impl ObjectCharacteristics {
    /// Look up the digest recorded for `algorithm`.
    pub fn fixity(&self, algorithm: &str) -> Option<&str> {
        self.fixities
            .iter()
            .find(|f| f.algorithm == algorithm)
            .map(|f| f.digest.as_str())
    }
}

/// The described file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Object {
    pub identifier: Identifier,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_name: Option<String>,
    #[serde(rename = "objectCategory")]
    pub category: ObjectCategory,
    #[serde(rename = "objectCharacteristics")]
    pub characteristics: ObjectCharacteristics,
}

impl Object {
    pub fn file(
        identifier: Identifier,
        characteristics: ObjectCharacteristics,
        original_name: Option<String>,
    ) -> Self {
        Self {
            identifier,
            original_name,
            category: ObjectCategory::File,
            characteristics,
        }
    }
}
