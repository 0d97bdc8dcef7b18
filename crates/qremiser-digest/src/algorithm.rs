use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DigestError, DigestResult};

/// Digest algorithms the pipeline knows about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Md5,
    Sha1,
    Sha256,
    Sha512,
    Crc32,
    Adler32,
    Blake3,
}

/// Algorithms computed when the caller does not choose.
pub const DEFAULT_ALGORITHMS: [Algorithm; 4] = [
    Algorithm::Md5,
    Algorithm::Sha256,
    Algorithm::Crc32,
    Algorithm::Adler32,
];

impl Algorithm {
    pub const ALL: [Self; 7] = [
        Self::Md5,
        Self::Sha1,
        Self::Sha256,
        Self::Sha512,
        Self::Crc32,
        Self::Adler32,
        Self::Blake3,
    ];

    /// Name recorded as the fixity's `messageDigestAlgorithm`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Md5 => "md5",
            Self::Sha1 => "sha1",
            Self::Sha256 => "sha256",
            Self::Sha512 => "sha512",
            Self::Crc32 => "crc32",
            Self::Adler32 => "adler32",
            Self::Blake3 => "blake3",
        }
    }

    /// Whether this build can compute the algorithm.
    pub fn is_available(self) -> bool {
        match self {
            Self::Blake3 => cfg!(feature = "blake3"),
            _ => true,
        }
    }

    /// Algorithms this build can compute.
    pub fn available() -> impl Iterator<Item = Self> {
        Self::ALL.into_iter().filter(|a| a.is_available())
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = DigestError;

    /// Accepts the wire name, case-insensitively, with or without a dash
    /// (`"SHA-256"`, `"sha256"`, `"Adler-32"`).
    fn from_str(s: &str) -> DigestResult<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Self::ALL
            .into_iter()
            .find(|a| a.name() == normalized)
            .ok_or_else(|| DigestError::UnknownAlgorithm(s.to_string()))
    }
}
