use std::fmt;

use serde::{Deserialize, Serialize};

/// How a format guess was obtained.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FormatSource {
    /// Leading bytes of the file matched a signature.
    ContentSignature,
    /// Extension of the original file name matched a media type.
    FileExtension,
}

impl FormatSource {
    /// Provenance note recorded alongside a guess from this source.
    pub fn note(self) -> &'static str {
        match self {
            Self::ContentSignature => "From magic number (content signature table)",
            Self::FileExtension => "From file extension (media type table)",
        }
    }
}

impl fmt::Display for FormatSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ContentSignature => write!(f, "content"),
            Self::FileExtension => write!(f, "extension"),
        }
    }
}

/// A candidate media type together with the method that produced it.
///
/// Serialized as `{"formatDesignation": {"formatName": ..}, "formatNote": ..}`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "FormatWire", into = "FormatWire")]
pub struct FormatGuess {
    pub name: String,
    pub note: String,
}

impl FormatGuess {
    pub fn new(name: impl Into<String>, source: FormatSource) -> Self {
        Self {
            name: name.into(),
            note: source.note().to_string(),
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FormatWire {
    format_designation: FormatDesignation,
    format_note: String,
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FormatDesignation {
    format_name: String,
}

impl From<FormatWire> for FormatGuess {
    fn from(wire: FormatWire) -> Self {
        Self {
            name: wire.format_designation.format_name,
            note: wire.format_note,
        }
    }
}

impl From<FormatGuess> for FormatWire {
    fn from(guess: FormatGuess) -> Self {
        Self {
            format_designation: FormatDesignation {
                format_name: guess.name,
            },
            format_note: guess.note,
        }
    }
}
