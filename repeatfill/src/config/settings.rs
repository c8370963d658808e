//! Settings structs, one per `[section]` of config.ini.

use std::path::PathBuf;

use super::target::TargetConfig;

/// Complete configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    pub pattern: PatternSettings,
    pub device: DeviceSettings,
    pub logging: LoggingSettings,
}

/// Pattern configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternSettings {
    /// Pattern spec the target starts with, e.g. "0xff" or "0b10"
    pub spec: String,
}

/// Device geometry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceSettings {
    /// Bytes per sector for sector-addressed reads
    pub sector_size: u64,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    /// Log file path
    pub file: PathBuf,
}

impl ConfigFile {
    /// Settings a target is built from.
    pub fn target_config(&self) -> TargetConfig {
        TargetConfig::new()
            .with_pattern_spec(&self.pattern.spec)
            .with_sector_size(self.device.sector_size)
    }
}
