use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use qremiser_digest::{HashPipeline, DEFAULT_ALGORITHMS};
use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

/// Process-wide settings for the HTTP endpoint, usually read from TOML.
///
/// Every field is optional in the file; missing ones take their defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Where uploads are staged. `None` uses the OS temp directory.
    pub temp_dir: Option<PathBuf>,
    /// `tracing` filter directive, e.g. `"warn"` or `"qremiser_server=debug"`.
    pub verbosity: String,
    /// Largest accepted request body, in bytes.
    pub max_upload_size: usize,
    /// Digest algorithm names. Unknown names are ignored.
    pub algorithms: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::LOCALHOST, 8912)),
            temp_dir: None,
            verbosity: "warn".into(),
            max_upload_size: 1024 * 1024 * 1024,
            algorithms: DEFAULT_ALGORITHMS.iter().map(|a| a.name().to_string()).collect(),
        }
    }
}

impl ServerConfig {
    pub fn from_toml_str(s: &str) -> ServerResult<Self> {
        toml::from_str(s).map_err(|e| ServerError::Config(e.to_string()))
    }

    pub fn from_file(path: &Path) -> ServerResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ServerError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Hash pipeline over the configured algorithms.
    pub fn pipeline(&self) -> HashPipeline {
        HashPipeline::from_names(&self.algorithms)
    }
}
