//! Temporary log files built from a [`LogBuilder`](crate::LogBuilder).

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::log::LogBuilder;

/// A log file that lives as long as this value.
///
/// # Example
///
/// ```rust,no_run
/// use sizeaudit_test_utils::{LogBuilder, TestLog};
///
/// let log = TestLog::new(&LogBuilder::new().add(5));
/// assert!(log.path().exists());
/// ```
pub struct TestLog {
    temp_dir: TempDir,
    path: PathBuf,
}

impl TestLog {
    /// Write `builder`'s lines to `size_tracker.log`.
    pub fn new(builder: &LogBuilder) -> Self {
        Self::from_bytes(builder.build().as_bytes())
    }

    /// Write arbitrary bytes, e.g. to exercise invalid UTF-8 handling.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("size_tracker.log");
        fs::write(&path, bytes)
            .unwrap_or_else(|e| panic!("TestLog: failed to write {}: {e}", path.display()));
        Self { temp_dir, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A path inside the same temporary directory that does not exist.
    pub fn missing_path(&self) -> PathBuf {
        self.temp_dir.path().join("does-not-exist.log")
    }
}
