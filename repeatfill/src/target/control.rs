//! Out-of-band control messages.
//!
//! Two commands are understood:
//!
//! - `seq.config <spec>` replaces the active pattern
//! - `seq.show` reports the active spec and its repeat unit
//!
//! Anything else is refused without touching the pattern.

use std::fmt;
use std::str::FromStr;

use super::error::ControlError;
use crate::pattern::CompiledPattern;

/// Command name for replacing the pattern.
pub const CONFIG_COMMAND: &str = "seq.config";

/// Command name for reporting the pattern.
pub const SHOW_COMMAND: &str = "seq.show";

/// A parsed control message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlMessage {
    Configure { spec: String },
    Show,
}

impl ControlMessage {
    /// Parse a message given as separate arguments, command first.
    ///
    /// ```
    /// use repeatfill::target::ControlMessage;
    ///
    /// let message = ControlMessage::parse(&["seq.config", "0x00"]).unwrap();
    /// assert_eq!(message, ControlMessage::Configure { spec: "0x00".into() });
    /// ```
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Result<Self, ControlError> {
        let (command, rest) = args.split_first().ok_or(ControlError::Empty)?;
        let command = command.as_ref();

        if command.eq_ignore_ascii_case(CONFIG_COMMAND) {
            match rest {
                [spec] => Ok(ControlMessage::Configure {
                    spec: spec.as_ref().to_string(),
                }),
                _ => Err(ControlError::WrongArgumentCount {
                    command: CONFIG_COMMAND,
                    expected: 1,
                    got: rest.len(),
                }),
            }
        } else if command.eq_ignore_ascii_case(SHOW_COMMAND) {
            if rest.is_empty() {
                Ok(ControlMessage::Show)
            } else {
                Err(ControlError::WrongArgumentCount {
                    command: SHOW_COMMAND,
                    expected: 0,
                    got: rest.len(),
                })
            }
        } else {
            Err(ControlError::UnknownCommand(command.to_string()))
        }
    }
}

impl FromStr for ControlMessage {
    type Err = ControlError;

    /// Parse a whitespace-separated message line.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let args: Vec<&str> = s.split_whitespace().collect();
        Self::parse(&args)
    }
}

/// Result of a successful control message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlReply {
    /// Pattern replaced; both sides described
    Configured { previous: String, current: String },
    /// Description of the active pattern
    Pattern(String),
}

impl ControlReply {
    pub(super) fn configured(previous: &CompiledPattern, current: &CompiledPattern) -> Self {
        ControlReply::Configured {
            previous: previous.describe(),
            current: current.describe(),
        }
    }

    pub(super) fn pattern(active: &CompiledPattern) -> Self {
        ControlReply::Pattern(active.describe())
    }
}

impl fmt::Display for ControlReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlReply::Configured { previous, current } => {
                write!(f, "pattern {} (was {})", current, previous)
            }
            ControlReply::Pattern(description) => f.write_str(description),
        }
    }
}
