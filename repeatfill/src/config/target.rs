//! Target construction settings.

use super::defaults::{DEFAULT_PATTERN_SPEC, DEFAULT_SECTOR_SIZE};

/// Settings a [`RepeatTarget`](crate::target::RepeatTarget) is built from.
///
/// The pattern spec is kept as text; the target compiles it at construction
/// and refuses to start if it is invalid.
///
/// # Example
///
/// ```
/// use repeatfill::config::TargetConfig;
///
/// let config = TargetConfig::default();
/// assert_eq!(config.pattern_spec(), "0xff");
/// assert_eq!(config.sector_size(), 512);
///
/// let config = TargetConfig::new()
///     .with_pattern_spec("0b10")
///     .with_sector_size(4096);
/// assert_eq!(config.pattern_spec(), "0b10");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetConfig {
    /// Initial pattern spec
    pattern_spec: String,
    /// Bytes per sector
    sector_size: u64,
}

impl TargetConfig {
    /// Create a target configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial pattern spec. Default: `0xff`.
    pub fn with_pattern_spec(mut self, spec: impl Into<String>) -> Self {
        self.pattern_spec = spec.into();
        self
    }

    /// Set the sector size used by sector-addressed reads. Default: 512.
    pub fn with_sector_size(mut self, sector_size: u64) -> Self {
        self.sector_size = sector_size;
        self
    }

    pub fn pattern_spec(&self) -> &str {
        &self.pattern_spec
    }

    pub fn sector_size(&self) -> u64 {
        self.sector_size
    }
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            pattern_spec: DEFAULT_PATTERN_SPEC.to_string(),
            sector_size: DEFAULT_SECTOR_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_chain() {
        let config = TargetConfig::new()
            .with_pattern_spec(String::from("0o17"))
            .with_sector_size(4096);
        assert_eq!(config.pattern_spec(), "0o17");
        assert_eq!(config.sector_size(), 4096);
    }

    #[test]
    fn test_new_is_default() {
        assert_eq!(TargetConfig::new(), TargetConfig::default());
    }
}
