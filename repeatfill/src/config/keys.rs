//! Configuration key access and validation.
//!
//! Type-safe get/set of configuration values by key name, with validation
//! through the Specification Pattern.

use std::str::FromStr;
use thiserror::Error;

use super::parser::{expand_tilde, parse_sector_size};
use super::settings::ConfigFile;
use super::size::format_size;
use super::writer::path_to_string;
use crate::pattern::PatternSpec;

/// Errors that can occur when getting or setting configuration values.
#[derive(Debug, Error)]
pub enum ConfigKeyError {
    /// Unknown configuration key.
    #[error("Unknown configuration key '{0}'")]
    UnknownKey(String),

    /// Validation failed for the value.
    #[error("Invalid value for {key}: {reason}")]
    ValidationFailed { key: String, reason: String },
}

/// Supported configuration keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    PatternSpec,
    DeviceSectorSize,
    LoggingFile,
}

impl FromStr for ConfigKey {
    type Err = ConfigKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pattern.spec" => Ok(ConfigKey::PatternSpec),
            "device.sector_size" => Ok(ConfigKey::DeviceSectorSize),
            "logging.file" => Ok(ConfigKey::LoggingFile),
            _ => Err(ConfigKeyError::UnknownKey(s.to_string())),
        }
    }
}

impl ConfigKey {
    /// Get the canonical key name (e.g., "pattern.spec").
    pub fn name(&self) -> &'static str {
        match self {
            ConfigKey::PatternSpec => "pattern.spec",
            ConfigKey::DeviceSectorSize => "device.sector_size",
            ConfigKey::LoggingFile => "logging.file",
        }
    }

    /// Get the section name (e.g., "pattern").
    pub fn section(&self) -> &'static str {
        self.name().split('.').next().unwrap_or("")
    }

    /// Get the key name within the section (e.g., "spec").
    pub fn key_name(&self) -> &'static str {
        self.name().split('.').nth(1).unwrap_or(self.name())
    }

    /// Get the value from a config file as a string.
    pub fn get(&self, config: &ConfigFile) -> String {
        match self {
            ConfigKey::PatternSpec => config.pattern.spec.clone(),
            ConfigKey::DeviceSectorSize => format_size(config.device.sector_size),
            ConfigKey::LoggingFile => path_to_string(&config.logging.file),
        }
    }

    /// Set the value in a config file.
    ///
    /// Validates the value according to the key's specification before setting.
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> Result<(), ConfigKeyError> {
        self.validate(value)?;
        self.set_unchecked(config, value);
        Ok(())
    }

    fn set_unchecked(&self, config: &mut ConfigFile, value: &str) {
        match self {
            ConfigKey::PatternSpec => {
                config.pattern.spec = value.trim().to_string();
            }
            ConfigKey::DeviceSectorSize => {
                if let Some(size) = parse_sector_size(value) {
                    config.device.sector_size = size;
                }
            }
            ConfigKey::LoggingFile => {
                config.logging.file = expand_tilde(value.trim());
            }
        }
    }

    /// Validate a value according to this key's specification.
    pub fn validate(&self, value: &str) -> Result<(), ConfigKeyError> {
        self.specification()
            .is_satisfied_by(value)
            .map_err(|reason| ConfigKeyError::ValidationFailed {
                key: self.name().to_string(),
                reason,
            })
    }

    fn specification(&self) -> Box<dyn ValueSpecification> {
        match self {
            ConfigKey::PatternSpec => Box::new(PatternSpecSpec),
            ConfigKey::DeviceSectorSize => Box::new(SectorSizeSpec),
            ConfigKey::LoggingFile => Box::new(PathSpec),
        }
    }

    /// Get all supported configuration keys.
    pub fn all() -> &'static [ConfigKey] {
        &[
            ConfigKey::PatternSpec,
            ConfigKey::DeviceSectorSize,
            ConfigKey::LoggingFile,
        ]
    }
}

// ============================================================================
// Value Specifications (Specification Pattern)
// ============================================================================

/// Trait for value validation specifications.
trait ValueSpecification {
    /// Returns Ok(()) if valid, Err(reason) if invalid.
    fn is_satisfied_by(&self, value: &str) -> Result<(), String>;
}

/// Value must compile as a pattern spec.
struct PatternSpecSpec;

impl ValueSpecification for PatternSpecSpec {
    fn is_satisfied_by(&self, value: &str) -> Result<(), String> {
        PatternSpec::parse(value.trim())
            .map(|_| ())
            .map_err(|e| e.to_string())
    }
}

/// Value must be a non-zero power of two, with an optional size suffix.
struct SectorSizeSpec;

impl ValueSpecification for SectorSizeSpec {
    fn is_satisfied_by(&self, value: &str) -> Result<(), String> {
        parse_sector_size(value)
            .map(|_| ())
            .ok_or_else(|| "must be a power of two like '512' or '4K'".to_string())
    }
}

/// Specification for path values (non-empty).
struct PathSpec;

impl ValueSpecification for PathSpec {
    fn is_satisfied_by(&self, value: &str) -> Result<(), String> {
        if value.trim().is_empty() {
            Err("must be a valid path".to_string())
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_config_key_parsing() {
        assert_eq!(
            "pattern.spec".parse::<ConfigKey>().unwrap(),
            ConfigKey::PatternSpec
        );
        assert_eq!(
            "DEVICE.SECTOR_SIZE".parse::<ConfigKey>().unwrap(),
            ConfigKey::DeviceSectorSize
        );
        assert!(matches!(
            "pattern.length".parse::<ConfigKey>(),
            Err(ConfigKeyError::UnknownKey(_))
        ));
    }

    #[test]
    fn test_key_name_parts() {
        assert_eq!(ConfigKey::DeviceSectorSize.section(), "device");
        assert_eq!(ConfigKey::DeviceSectorSize.key_name(), "sector_size");
        assert_eq!(ConfigKey::LoggingFile.section(), "logging");
        assert_eq!(ConfigKey::LoggingFile.key_name(), "file");
    }

    #[test]
    fn test_get_value() {
        let config = ConfigFile::default();

        assert_eq!(ConfigKey::PatternSpec.get(&config), "0xff");
        assert_eq!(ConfigKey::DeviceSectorSize.get(&config), "512");
    }

    #[test]
    fn test_set_value() {
        let mut config = ConfigFile::default();

        ConfigKey::PatternSpec.set(&mut config, "0B0110").unwrap();
        assert_eq!(config.pattern.spec, "0B0110");

        ConfigKey::DeviceSectorSize.set(&mut config, "4K").unwrap();
        assert_eq!(config.device.sector_size, 4096);
        assert_eq!(ConfigKey::DeviceSectorSize.get(&config), "4KB");

        ConfigKey::LoggingFile
            .set(&mut config, "/var/log/repeat.log")
            .unwrap();
        assert_eq!(config.logging.file, PathBuf::from("/var/log/repeat.log"));
    }

    #[test]
    fn test_validate_pattern_spec() {
        assert!(ConfigKey::PatternSpec.validate("0xAABBCC").is_ok());
        assert!(ConfigKey::PatternSpec.validate("0o7").is_ok());
        assert!(ConfigKey::PatternSpec.validate("0x").is_err());
        assert!(ConfigKey::PatternSpec.validate("ff").is_err());
        assert!(ConfigKey::PatternSpec.validate("0b12").is_err());
    }

    #[test]
    fn test_validate_sector_size() {
        assert!(ConfigKey::DeviceSectorSize.validate("512").is_ok());
        assert!(ConfigKey::DeviceSectorSize.validate("64KB").is_ok());
        assert!(ConfigKey::DeviceSectorSize.validate("0").is_err());
        assert!(ConfigKey::DeviceSectorSize.validate("520").is_err());
    }

    #[test]
    fn test_set_invalid_value_fails() {
        let mut config = ConfigFile::default();

        let result = ConfigKey::PatternSpec.set(&mut config, "0xG1");
        assert!(matches!(
            result,
            Err(ConfigKeyError::ValidationFailed { .. })
        ));
        assert_eq!(config.pattern.spec, "0xff");

        assert!(ConfigKey::LoggingFile.set(&mut config, "  ").is_err());
    }

    #[test]
    fn test_all_keys_round_trip_names() {
        for key in ConfigKey::all() {
            assert_eq!(key.name().parse::<ConfigKey>().unwrap(), *key);
        }
    }
}
