//! Per-file size bookkeeping reconstructed from the log.

use std::collections::HashMap;
use std::fmt;

/// Last known state of one tracked path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    /// `None` when the path is known to exist but its size is not, e.g. it
    /// was only seen as the destination of a rename from an untracked source.
    pub size: Option<i64>,
    /// Timestamp of the line that last touched this entry.
    pub last_updated: String,
}

impl FileInfo {
    pub fn known(size: i64, last_updated: impl Into<String>) -> Self {
        Self {
            size: Some(size),
            last_updated: last_updated.into(),
        }
    }

    pub fn unknown(last_updated: impl Into<String>) -> Self {
        Self {
            size: None,
            last_updated: last_updated.into(),
        }
    }
}

impl fmt::Display for FileInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.size {
            Some(size) => write!(f, "size={}, last_updated={}", size, self.last_updated),
            None => write!(f, "size=UNKNOWN, last_updated={}", self.last_updated),
        }
    }
}

/// Mapping from file path to its [`FileInfo`].
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    files: HashMap<String, FileInfo>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &str) -> Option<&FileInfo> {
        self.files.get(path)
    }

    /// Known size of `path`; `None` if untracked or of unknown size.
    pub fn known_size(&self, path: &str) -> Option<i64> {
        self.files.get(path).and_then(|info| info.size)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    /// Inserts or overwrites the entry for `path`.
    pub fn insert(&mut self, path: impl Into<String>, info: FileInfo) {
        self.files.insert(path.into(), info);
    }

    pub fn remove(&mut self, path: &str) -> Option<FileInfo> {
        self.files.remove(path)
    }

    /// Moves the entry at `src` to `dst`, replacing anything at `dst`.
    ///
    /// Returns `false` and leaves the ledger untouched if `src` is untracked.
    pub fn rename(&mut self, src: &str, dst: &str) -> bool {
        match self.files.remove(src) {
            Some(info) => {
                self.files.insert(dst.to_string(), info);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FileInfo)> {
        self.files.iter().map(|(path, info)| (path.as_str(), info))
    }
}
