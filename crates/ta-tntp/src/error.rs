//! Error types for ta-tntp.

use thiserror::Error;

use ta_network::NetworkError;

/// Errors raised while reading TNTP files or writing flow tables.
#[derive(Debug, Error)]
pub enum TntpError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("metadata entry {0} missing or empty")]
    MissingMetadata(&'static str),

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error(transparent)]
    Network(#[from] NetworkError),
}

/// Alias for `Result<T, TntpError>`.
pub type TntpResult<T> = Result<T, TntpError>;

impl TntpError {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse { line, message: message.into() }
    }
}
