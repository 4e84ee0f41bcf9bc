//! Error types for sizeaudit-core

use std::path::PathBuf;

/// Result type for sizeaudit-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort an audit run.
///
/// Log lines that fail to parse and detected discrepancies are not errors;
/// they are dropped or collected respectively.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File '{path}' not found")]
    NotFound { path: PathBuf },

    #[error("Error processing log file: {source}")]
    Read {
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Wrap an I/O error raised while opening `path`.
    ///
    /// A missing file gets its own variant so the caller can word it plainly.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound { path }
        } else {
            Self::Io { path, source }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_not_found_is_distinguished() {
        let err = Error::io("missing.log", io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(err, Error::NotFound { .. }));
        assert_eq!(err.to_string(), "File 'missing.log' not found");
    }

    #[test]
    fn test_other_io_errors_keep_source() {
        let err = Error::io(
            "locked.log",
            io::Error::from(io::ErrorKind::PermissionDenied),
        );
        assert!(matches!(err, Error::Io { .. }));
        assert!(err.to_string().starts_with("I/O error at locked.log"));
    }
}
