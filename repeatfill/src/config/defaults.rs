//! Default values for every configuration setting.

use std::path::PathBuf;

use super::file::config_directory;
use super::settings::*;

pub use crate::pattern::DEFAULT_PATTERN_SPEC;
pub use crate::position::DEFAULT_SECTOR_SIZE;

/// Name of the log file inside the config directory.
pub const DEFAULT_LOG_FILE_NAME: &str = "repeatfill.log";

/// Default log file (~/.repeatfill/repeatfill.log).
pub fn default_log_file() -> PathBuf {
    config_directory().join(DEFAULT_LOG_FILE_NAME)
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            pattern: PatternSettings {
                spec: DEFAULT_PATTERN_SPEC.to_string(),
            },
            device: DeviceSettings {
                sector_size: DEFAULT_SECTOR_SIZE,
            },
            logging: LoggingSettings {
                file: default_log_file(),
            },
        }
    }
}
