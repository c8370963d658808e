//! Configuration for the repeat target and the CLI.
//!
//! Two layers live here:
//!
//! - [`TargetConfig`]: the in-memory settings a [`RepeatTarget`] is built from
//! - [`ConfigFile`]: the user's `~/.repeatfill/config.ini`, with typed
//!   key access through [`ConfigKey`]
//!
//! # Example
//!
//! ```
//! use repeatfill::config::{ConfigFile, TargetConfig};
//!
//! let config = ConfigFile::default();
//! let target = config.target_config();
//! assert_eq!(target, TargetConfig::default());
//! assert_eq!(target.pattern_spec(), "0xff");
//! ```
//!
//! [`RepeatTarget`]: crate::target::RepeatTarget

mod defaults;
mod file;
mod keys;
mod parser;
mod settings;
mod size;
mod target;
mod writer;

pub use defaults::{
    default_log_file, DEFAULT_LOG_FILE_NAME, DEFAULT_PATTERN_SPEC, DEFAULT_SECTOR_SIZE,
};
pub use file::{config_directory, config_file_path, ConfigFileError};
pub use keys::{ConfigKey, ConfigKeyError};
pub use settings::{ConfigFile, DeviceSettings, LoggingSettings, PatternSettings};
pub use size::{format_size, parse_size, SizeParseError};
pub use target::TargetConfig;
