//! Error types for the repeat target.

use thiserror::Error;

use crate::pattern::ParseError;

/// Construction-time failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The target takes no table arguments
    #[error("No arguments required, got {count}")]
    UnexpectedArgument { count: usize },

    /// The configured initial pattern does not compile
    #[error("Invalid initial pattern: {0}")]
    InvalidPattern(#[source] ParseError),

    /// Sector size must be a non-zero power of two
    #[error("Invalid sector size {0}: must be a non-zero power of two")]
    InvalidSectorSize(u64),
}

/// Control-channel failures. None of them change the active pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControlError {
    #[error("Empty control message")]
    Empty,

    #[error("Invalid control command '{0}'")]
    UnknownCommand(String),

    #[error("{command} expects {expected} argument(s), got {got}")]
    WrongArgumentCount {
        command: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("Rejected pattern: {0}")]
    InvalidPattern(#[from] ParseError),
}

/// Data-path failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IoError {
    /// Speculative reads are refused outright, never retried
    #[error("Read-ahead is not supported by the repeat target")]
    ReadAheadUnsupported,
}

impl IoError {
    /// Errno reported to the dispatcher.
    pub fn errno(&self) -> i32 {
        match self {
            IoError::ReadAheadUnsupported => libc::EIO,
        }
    }
}
