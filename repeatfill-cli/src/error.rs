//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and exit codes.

use repeatfill::config::ConfigFileError;
use repeatfill::pattern::ParseError;
use repeatfill::target::{ConfigError, ControlError};
use std::fmt;
use std::process;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration error
    Config(String),
    /// Pattern spec did not compile
    Pattern(ParseError),
    /// Target could not be constructed
    Target(ConfigError),
    /// Control message was refused
    Control(ControlError),
    /// Bad combination of command-line arguments
    InvalidArgument(String),
    /// Failed to write output file
    FileWrite { path: String, error: std::io::Error },
}

impl CliError {
    /// Exit the process with an error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        match self {
            CliError::Pattern(_) | CliError::Control(ControlError::InvalidPattern(_)) => {
                eprintln!();
                eprintln!("Pattern specs are a prefix followed by digits in that base:");
                eprintln!("  0x  hex     e.g. 0xff, 0xAABBCC");
                eprintln!("  0o  octal   e.g. 0o17");
                eprintln!("  0b  binary  e.g. 0b10");
            }
            CliError::Control(ControlError::UnknownCommand(_) | ControlError::Empty) => {
                eprintln!();
                eprintln!("Supported messages:");
                eprintln!("  seq.config <spec>   replace the active pattern");
                eprintln!("  seq.show            show the active pattern");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Pattern(e) => write!(f, "Invalid pattern: {}", e),
            CliError::Target(e) => write!(f, "Failed to create target: {}", e),
            CliError::Control(e) => write!(f, "Control message failed: {}", e),
            CliError::InvalidArgument(msg) => write!(f, "{}", msg),
            CliError::FileWrite { path, error } => {
                write!(f, "Failed to write file '{}': {}", path, error)
            }
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Pattern(e) => Some(e),
            CliError::Target(e) => Some(e),
            CliError::Control(e) => Some(e),
            CliError::FileWrite { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<ParseError> for CliError {
    fn from(e: ParseError) -> Self {
        CliError::Pattern(e)
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Target(e)
    }
}

impl From<ControlError> for CliError {
    fn from(e: ControlError) -> Self {
        CliError::Control(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            CliError::Pattern(ParseError::EmptyInput).to_string(),
            "Invalid pattern: Pattern spec has no digits"
        );
        assert_eq!(
            CliError::Target(ConfigError::UnexpectedArgument { count: 1 }).to_string(),
            "Failed to create target: No arguments required, got 1"
        );
    }

    #[test]
    fn test_source_chain() {
        use std::error::Error;

        let err = CliError::from(ControlError::UnknownCommand("seq.x".into()));
        assert!(err.source().is_some());
        assert!(CliError::Config("bad".into()).source().is_none());
    }
}
