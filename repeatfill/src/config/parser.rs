//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This is the single place where INI key names are mapped to struct fields.

use ini::Ini;
use std::path::PathBuf;

use super::file::ConfigFileError;
use super::settings::ConfigFile;
use super::size::parse_size;
use crate::pattern::PatternSpec;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [pattern] section
    if let Some(section) = ini.section(Some("pattern")) {
        if let Some(v) = section.get("spec") {
            let v = v.trim();
            PatternSpec::parse(v).map_err(|e| ConfigFileError::InvalidValue {
                section: "pattern".to_string(),
                key: "spec".to_string(),
                value: v.to_string(),
                reason: e.to_string(),
            })?;
            config.pattern.spec = v.to_string();
        }
    }

    // [device] section
    if let Some(section) = ini.section(Some("device")) {
        if let Some(v) = section.get("sector_size") {
            config.device.sector_size = parse_sector_size(v).ok_or_else(|| {
                ConfigFileError::InvalidValue {
                    section: "device".to_string(),
                    key: "sector_size".to_string(),
                    value: v.to_string(),
                    reason: "expected a power of two like '512' or '4K'".to_string(),
                }
            })?;
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("file") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.file = expand_tilde(v);
            }
        }
    }

    Ok(config)
}

/// Parse a sector size, accepting only non-zero powers of two.
pub(super) fn parse_sector_size(value: &str) -> Option<u64> {
    parse_size(value)
        .ok()
        .filter(|size| size.is_power_of_two())
}

/// Expand a leading `~/` to the home directory.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}
