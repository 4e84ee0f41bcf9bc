//! Streaming, decode-tolerant line reader.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::{Error, Result};

/// Iterator over the lines of a reader, decoding each line as lossy UTF-8.
///
/// Invalid byte sequences become U+FFFD instead of failing the run. The
/// trailing `\n` (and a `\r` before it) is stripped. One line buffer is
/// reused, so memory stays proportional to the longest line.
pub struct LossyLines<R> {
    reader: R,
    buf: Vec<u8>,
}

impl<R: BufRead> LossyLines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
        }
    }
}

impl<R: BufRead> Iterator for LossyLines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                if self.buf.last() == Some(&b'\n') {
                    self.buf.pop();
                    if self.buf.last() == Some(&b'\r') {
                        self.buf.pop();
                    }
                }
                Some(Ok(String::from_utf8_lossy(&self.buf).into_owned()))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

/// Opens the log at `path` for streaming.
pub fn open_log(path: &Path) -> Result<LossyLines<BufReader<File>>> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    tracing::debug!(path = %path.display(), "opened log file");
    Ok(LossyLines::new(BufReader::new(file)))
}
