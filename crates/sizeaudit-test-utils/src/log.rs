//! [`LogBuilder`] for size-tracker log fixtures.
//!
//! Lines mimic what the tracker's logger writes: a leading timestamp, a
//! level, the emitting source location, then the message. Each appended line
//! gets a timestamp one second after the previous one.

/// Timestamp for the `n`th generated line (0-based).
///
/// Every value matches the shape the auditor extracts, e.g.
/// `Mon Jan 15 10:00:03.000000 AM 2024`.
pub fn timestamp(n: usize) -> String {
    let minutes = (n / 60) % 60;
    let seconds = n % 60;
    format!("Mon Jan 15 10:{minutes:02}:{seconds:02}.000000 AM 2024")
}

/// Builder for a size-tracker log.
///
/// # Example
///
/// ```rust
/// use sizeaudit_test_utils::LogBuilder;
///
/// let log = LogBuilder::new()
///     .add(100)
///     .sync(0, 100, 100)
///     .build();
/// assert_eq!(log.lines().count(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LogBuilder {
    lines: Vec<String>,
    stamped: usize,
}

impl LogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `message` behind the next timestamp.
    pub fn stamped(mut self, message: &str) -> Self {
        let line = format!("{} {}", timestamp(self.stamped), message);
        self.stamped += 1;
        self.lines.push(line);
        self
    }

    /// Append `line` verbatim, without a timestamp.
    pub fn raw(mut self, line: &str) -> Self {
        self.lines.push(line.to_string());
        self
    }

    /// Journal pending-delta update.
    pub fn add(self, delta: i64) -> Self {
        self.stamped(&format!(
            "TRACE [journal.go (87)]: SizeTracker::Add : {delta}"
        ))
    }

    /// Current-shape copy: `Add(<new>-<old>)`.
    pub fn copy(self, path: &str, new_size: i64, old_size: i64) -> Self {
        self.stamped(&format!(
            "TRACE [size_tracker.go (255)]: SizeTracker::CopyFromFile : {path} Add({new_size}-{old_size})"
        ))
    }

    /// Legacy-shape copy: `Add(<delta>)`.
    pub fn copy_legacy(self, path: &str, delta: i64) -> Self {
        self.stamped(&format!(
            "TRACE [size_tracker.go (255)]: SizeTracker::CopyFromFile : {path} Add({delta})"
        ))
    }

    pub fn delete(self, path: &str, delta: i64) -> Self {
        self.stamped(&format!(
            "TRACE [size_tracker.go (165)]: SizeTracker::DeleteFile : {path} Add({delta})"
        ))
    }

    pub fn rename(self, src: &str, dst: &str) -> Self {
        self.stamped(&format!(
            "TRACE [size_tracker.go (172)]: SizeTracker::RenameFile : {src}->{dst}"
        ))
    }

    pub fn sync(self, old_total: i64, delta: i64, new_total: i64) -> Self {
        self.stamped(&format!(
            "DEBUG [journal.go (231)]: SizeTracker::sync : {old_total} + {delta} = {new_total}"
        ))
    }

    pub fn epoch(self, local: u64, file: u64, discarded: i64) -> Self {
        self.stamped(&format!(
            "DEBUG [journal.go (198)]: SizeTracker::sync : epoch changed (local={local} -> file={file}) — discarding delta {discarded}."
        ))
    }

    /// An unrelated timestamped line from another component.
    pub fn noise(self) -> Self {
        self.stamped("TRACE [block_cache.go (412)]: BlockCache::OpenFile : name=/a/b.txt")
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The log as text, one line per entry, newline-terminated.
    pub fn build(&self) -> String {
        let mut out = self.lines.join("\n");
        if !out.is_empty() {
            out.push('\n');
        }
        out
    }
}
