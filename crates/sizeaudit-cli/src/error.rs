//! Error types for sizeaudit-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that end the process with exit code 1
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from sizeaudit-core
    #[error(transparent)]
    Core(#[from] sizeaudit_core::Error),

    /// Standard I/O error, e.g. writing the report
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Missing or malformed arguments; the text is printed as-is to stdout
    #[error("{usage}")]
    Usage { usage: String },
}

impl CliError {
    /// Create a usage error with the given text
    pub fn usage(usage: impl Into<String>) -> Self {
        Self::Usage {
            usage: usage.into(),
        }
    }
}
