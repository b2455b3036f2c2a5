//! Error types for the ttt-eval crate

use thiserror::Error;

/// Main error type for the ttt-eval crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid grid size {size} (must be between {min} and {max})")]
    InvalidGridSize { size: usize, min: usize, max: usize },

    #[error("board of size {size} needs {expected} cells, got {got}")]
    CellCountMismatch {
        size: usize,
        expected: usize,
        got: usize,
    },

    #[error("position ({row}, {col}) is out of bounds on a {size}x{size} board")]
    PositionOutOfBounds { row: usize, col: usize, size: usize },

    #[error("invalid move: position ({row}, {col}) is already occupied")]
    CellOccupied { row: usize, col: usize },

    #[error("malformed record at {location}: {reason}")]
    MalformedRecord { location: String, reason: String },

    #[error("invalid player '{token}' (expected 'x' or 'o')")]
    InvalidPlayerToken { token: String },

    #[error("invalid record format '{input}'. Expected one of: {expected}")]
    InvalidFormat { input: String, expected: String },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to parse configuration: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}

impl Error {
    /// Wrap an IO error with the operation that failed
    pub fn io(operation: impl Into<String>, source: std::io::Error) -> Self {
        Error::Io {
            operation: operation.into(),
            source,
        }
    }

    pub(crate) fn malformed(location: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::MalformedRecord {
            location: location.into(),
            reason: reason.into(),
        }
    }
}
