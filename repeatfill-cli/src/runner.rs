//! CLI runner for common setup and operations.
//!
//! Encapsulates config loading, logging initialization and target creation
//! so command handlers stay short.

use crate::error::CliError;
use repeatfill::config::ConfigFile;
use repeatfill::log::TracingLogger;
use repeatfill::logging::{init_logging, split_log_path, LoggingGuard};
use repeatfill::target::RepeatTarget;
use std::sync::Arc;
use tracing::info;

/// Runner that manages CLI lifecycle and common operations.
pub struct CliRunner {
    /// Keeps the file writer alive while the runner exists
    _logging_guard: LoggingGuard,
    /// Loaded configuration file
    config: ConfigFile,
}

impl CliRunner {
    /// Create a runner, loading config and initializing logging.
    ///
    /// # Arguments
    ///
    /// * `debug_mode` - When true, logs at debug level unless RUST_LOG says otherwise
    pub fn with_debug(debug_mode: bool) -> Result<Self, CliError> {
        let config = ConfigFile::load()?;

        let (log_dir, log_file) = split_log_path(&config.logging.file);
        let logging_guard = init_logging(&log_dir, &log_file, debug_mode)
            .map_err(|e| CliError::LoggingInit(e.to_string()))?;

        Ok(Self {
            _logging_guard: logging_guard,
            config,
        })
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// Log startup information for a command.
    pub fn log_startup(&self, command: &str) {
        info!("repeatfill v{}", repeatfill::VERSION);
        info!("repeatfill CLI: {} command", command);
    }

    /// Create a target from the loaded config, optionally overriding its spec.
    pub fn create_target(&self, spec: Option<&str>) -> Result<RepeatTarget, CliError> {
        let mut target_config = self.config.target_config();
        if let Some(spec) = spec {
            target_config = target_config.with_pattern_spec(spec);
        }

        let args: [&str; 0] = [];
        let target = RepeatTarget::new(&args, &target_config, Arc::new(TracingLogger))?;
        Ok(target)
    }
}
