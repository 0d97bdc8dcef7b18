use serde::{Deserialize, Serialize};

/// One digest algorithm applied to the full byte stream of a file.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fixity {
    /// Algorithm name (e.g. `"md5"`, `"sha256"`).
    #[serde(rename = "messageDigestAlgorithm")]
    pub algorithm: String,
    /// Lowercase hex encoding of the algorithm's output.
    #[serde(rename = "messageDigest")]
    pub digest: String,
}

impl Fixity {
    pub fn new(algorithm: impl Into<String>, digest: impl Into<String>) -> Self {
        Self {
            algorithm: algorithm.into(),
            digest: digest.into(),
        }
    }
}
