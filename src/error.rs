//! Error types for bloomkit.

use thiserror::Error;

/// The result type used throughout bloomkit.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type for bloomkit operations.
///
/// Only construction can fail. `add`, `check`, `remove` and
/// `false_positive_rate` are total over any byte sequence.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// An invalid argument was provided to a constructor.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A configuration document could not be parsed.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Creates a new invalid argument error.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }

    /// Creates a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Config(err.to_string())
    }
}
