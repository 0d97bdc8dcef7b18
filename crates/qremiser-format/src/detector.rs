use std::fs::File;
use std::io::Read;
use std::path::Path;

use qremiser_types::{FormatGuess, FormatSource};
use tracing::debug;

use crate::error::FormatResult;
use crate::signature;

/// Leading bytes inspected for a content signature.
pub const DEFAULT_HEAD_LEN: usize = 8192;

/// The two format signals for one file. Either may be absent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormatSignals {
    /// Media type sniffed from the file's leading bytes.
    pub content: Option<String>,
    /// Media type implied by the original name's extension.
    pub name: Option<String>,
}

impl FormatSignals {
    /// Guesses in fixed order: content first, then name.
    pub fn into_guesses(self) -> Vec<FormatGuess> {
        let content = self
            .content
            .map(|name| FormatGuess::new(name, FormatSource::ContentSignature));
        let name = self
            .name
            .map(|name| FormatGuess::new(name, FormatSource::FileExtension));
        content.into_iter().chain(name).collect()
    }
}

/// Derives format signals from file content and original file name.
#[derive(Clone, Debug)]
pub struct FormatDetector {
    head_len: usize,
}

impl Default for FormatDetector {
    fn default() -> Self {
        Self {
            head_len: DEFAULT_HEAD_LEN,
        }
    }
}

impl FormatDetector {
    /// Detector inspecting at most `head_len` leading bytes.
    pub fn with_head_len(head_len: usize) -> Self {
        Self { head_len }
    }

    /// Both signals for the file at `path`.
    ///
    /// `original_name` is only used for its extension; it is never resolved
    /// as a path.
    pub fn detect(&self, path: &Path, original_name: Option<&str>) -> FormatResult<FormatSignals> {
        let content = self.sniff_file(path)?.map(str::to_string);
        let name = original_name
            .and_then(Self::guess_from_name)
            .map(str::to_string);
        debug!(
            path = %path.display(),
            content = content.as_deref().unwrap_or("-"),
            name = name.as_deref().unwrap_or("-"),
            "format signals"
        );
        Ok(FormatSignals { content, name })
    }

    /// Content signal only.
    pub fn sniff_file(&self, path: &Path) -> FormatResult<Option<&'static str>> {
        let mut head = Vec::with_capacity(self.head_len);
        File::open(path)?
            .take(self.head_len as u64)
            .read_to_end(&mut head)?;
        Ok(signature::sniff(&head))
    }

    /// Name signal only.
    pub fn guess_from_name(name: &str) -> Option<&'static str> {
        if name.is_empty() {
            return None;
        }
        mime_guess::from_path(name).first_raw()
    }
}
