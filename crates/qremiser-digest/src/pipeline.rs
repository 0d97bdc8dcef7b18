use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use md5::Md5;
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha512};
use tracing::debug;

use crate::algorithm::{Algorithm, DEFAULT_ALGORITHMS};

/// Bytes read from the stream per iteration.
pub const CHUNK_SIZE: usize = 8192;

/// Incremental state for one algorithm.
enum Accumulator {
    Md5(Md5),
    Sha1(Sha1),
    Sha256(Sha256),
    Sha512(Sha512),
    Crc32(crc32fast::Hasher),
    Adler32(adler::Adler32),
    #[cfg(feature = "blake3")]
    Blake3(Box<blake3::Hasher>),
}

impl Accumulator {
    /// `None` when the algorithm is not compiled into this build.
    fn new(algorithm: Algorithm) -> Option<Self> {
        let acc = match algorithm {
            Algorithm::Md5 => Self::Md5(Md5::new()),
            Algorithm::Sha1 => Self::Sha1(Sha1::new()),
            Algorithm::Sha256 => Self::Sha256(Sha256::new()),
            Algorithm::Sha512 => Self::Sha512(Sha512::new()),
            Algorithm::Crc32 => Self::Crc32(crc32fast::Hasher::new()),
            Algorithm::Adler32 => Self::Adler32(adler::Adler32::new()),
            #[cfg(feature = "blake3")]
            Algorithm::Blake3 => Self::Blake3(Box::new(blake3::Hasher::new())),
            #[cfg(not(feature = "blake3"))]
            Algorithm::Blake3 => return None,
        };
        Some(acc)
    }

    fn update(&mut self, data: &[u8]) {
        match self {
            Self::Md5(h) => h.update(data),
            Self::Sha1(h) => h.update(data),
            Self::Sha256(h) => h.update(data),
            Self::Sha512(h) => h.update(data),
            Self::Crc32(h) => h.update(data),
            Self::Adler32(h) => h.write_slice(data),
            #[cfg(feature = "blake3")]
            Self::Blake3(h) => {
                h.update(data);
            }
        }
    }

    fn finalize_hex(self) -> String {
        match self {
            Self::Md5(h) => hex::encode(h.finalize()),
            Self::Sha1(h) => hex::encode(h.finalize()),
            Self::Sha256(h) => hex::encode(h.finalize()),
            Self::Sha512(h) => hex::encode(h.finalize()),
            Self::Crc32(h) => format!("{:08x}", h.finalize()),
            Self::Adler32(h) => format!("{:08x}", h.checksum()),
            #[cfg(feature = "blake3")]
            Self::Blake3(h) => h.finalize().to_hex().to_string(),
        }
    }
}

/// Digests produced by one pass over a stream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DigestReport {
    /// Total bytes consumed from the stream.
    pub bytes_read: u64,
    /// Hex digests in the order the algorithms were requested.
    pub digests: Vec<(Algorithm, String)>,
}

impl DigestReport {
    pub fn get(&self, algorithm: Algorithm) -> Option<&str> {
        self.digests
            .iter()
            .find(|(a, _)| *a == algorithm)
            .map(|(_, hex)| hex.as_str())
    }

    pub fn len(&self) -> usize {
        self.digests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digests.is_empty()
    }
}

/// Computes several digests over a stream in a single sequential read.
///
/// Every chunk is handed to every accumulator before the next chunk is
/// read, so the stream is never rewound or buffered whole.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HashPipeline {
    algorithms: Vec<Algorithm>,
}

impl Default for HashPipeline {
    fn default() -> Self {
        Self::new(DEFAULT_ALGORITHMS)
    }
}

impl HashPipeline {
    /// Pipeline over `algorithms`. Duplicates are dropped, first one wins.
    pub fn new(algorithms: impl IntoIterator<Item = Algorithm>) -> Self {
        let mut unique = Vec::new();
        for alg in algorithms {
            if !unique.contains(&alg) {
                unique.push(alg);
            }
        }
        Self { algorithms: unique }
    }

    /// Pipeline over algorithms given by name. Unknown names are skipped.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let algorithms = names.into_iter().filter_map(|name| {
            let name = name.as_ref();
            match name.parse::<Algorithm>() {
                Ok(alg) => Some(alg),
                Err(e) => {
                    debug!(%name, error = %e, "skipping digest algorithm");
                    None
                }
            }
        });
        Self::new(algorithms)
    }

    /// The requested algorithms, including any this build cannot compute.
    pub fn algorithms(&self) -> &[Algorithm] {
        &self.algorithms
    }

    /// Digest everything `reader` yields.
    pub fn digest<R: Read>(&self, mut reader: R) -> io::Result<DigestReport> {
        let mut accumulators: Vec<(Algorithm, Accumulator)> = self
            .algorithms
            .iter()
            .filter_map(|&alg| match Accumulator::new(alg) {
                Some(acc) => Some((alg, acc)),
                None => {
                    debug!(algorithm = %alg, "digest algorithm unavailable in this build");
                    None
                }
            })
            .collect();

        let mut buffer = vec![0u8; CHUNK_SIZE];
        let mut bytes_read = 0u64;
        loop {
            let n = match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            let chunk = &buffer[..n];
            for (_, acc) in &mut accumulators {
                acc.update(chunk);
            }
            bytes_read += n as u64;
        }

        let digests = accumulators
            .into_iter()
            .map(|(alg, acc)| (alg, acc.finalize_hex()))
            .collect();
        Ok(DigestReport {
            bytes_read,
            digests,
        })
    }

    /// Digest the file at `path`.
    pub fn digest_file(&self, path: &Path) -> io::Result<DigestReport> {
        let file = File::open(path)?;
        let report = self.digest(file)?;
        debug!(
            path = %path.display(),
            bytes = report.bytes_read,
            digests = report.len(),
            "file digested"
        );
        Ok(report)
    }
}
