//! The repeat target.
//!
//! [`RepeatTarget`] is what a block layer talks to. It takes no construction
//! arguments, answers reads by tiling the active pattern, drops writes and
//! discards, refuses read-ahead, and accepts two control messages
//! (`seq.config <spec>` and `seq.show`).
//!
//! ```
//! use repeatfill::log::NoOpLogger;
//! use repeatfill::target::RepeatTarget;
//! use std::sync::Arc;
//!
//! let target = RepeatTarget::with_defaults(Arc::new(NoOpLogger));
//! target.message(&["seq.config", "0xAABBCC"]).unwrap();
//!
//! let mut buf = [0u8; 4];
//! target.read(1, [&mut buf[..]]);
//! assert_eq!(buf, [0xBB, 0xCC, 0xAA, 0xBB]);
//! ```

mod control;
mod error;
mod request;
mod servicer;
mod stats;

pub use control::{ControlMessage, ControlReply, CONFIG_COMMAND, SHOW_COMMAND};
pub use error::{ConfigError, ControlError, IoError};
pub use request::{Completion, IoKind, IoRequest};
pub use servicer::{PendingRead, ReadServicer};
pub use stats::{StatsSnapshot, TargetStats};

use std::sync::Arc;

use crate::config::TargetConfig;
use crate::log::Logger;
use crate::pattern::CompiledPattern;
use crate::position::{sector_to_position, DEFAULT_SECTOR_SIZE};
use crate::store::PatternStore;
use crate::{log_info, log_warn};

/// Name the target registers under.
pub const TARGET_NAME: &str = "repeat";

/// Target version as `[major, minor, patch]`.
pub const TARGET_VERSION: [u32; 3] = [1, 0, 0];

/// A synthetic storage target backed by a repeating byte pattern.
pub struct RepeatTarget {
    store: Arc<PatternStore>,
    servicer: ReadServicer,
    sector_size: u64,
    logger: Arc<dyn Logger>,
}

impl RepeatTarget {
    /// Construct a target from its argument list and configuration.
    ///
    /// The argument list must be empty. The initial pattern comes from
    /// `config` and is compiled here, so a bad configured spec fails
    /// construction instead of surfacing on the data path. The sector size
    /// must be a non-zero power of two.
    pub fn new<S: AsRef<str>>(
        args: &[S],
        config: &TargetConfig,
        logger: Arc<dyn Logger>,
    ) -> Result<Self, ConfigError> {
        if !args.is_empty() {
            log_warn!(logger, "repeat target takes no arguments, got {}", args.len());
            return Err(ConfigError::UnexpectedArgument { count: args.len() });
        }

        let sector_size = config.sector_size();
        if !sector_size.is_power_of_two() {
            log_warn!(logger, "invalid sector size {}", sector_size);
            return Err(ConfigError::InvalidSectorSize(sector_size));
        }

        let store =
            PatternStore::with_spec(config.pattern_spec()).map_err(ConfigError::InvalidPattern)?;
        Ok(Self::from_store(store, sector_size, logger))
    }

    /// Target with the default pattern (`0xff`) and 512-byte sectors.
    pub fn with_defaults(logger: Arc<dyn Logger>) -> Self {
        Self::from_store(PatternStore::new(), DEFAULT_SECTOR_SIZE, logger)
    }

    fn from_store(store: PatternStore, sector_size: u64, logger: Arc<dyn Logger>) -> Self {
        let store = Arc::new(store);
        let servicer = ReadServicer::new(Arc::clone(&store), Arc::clone(&logger));
        log_info!(
            logger,
            "{} target v{}.{}.{} ready: {}",
            TARGET_NAME,
            TARGET_VERSION[0],
            TARGET_VERSION[1],
            TARGET_VERSION[2],
            store.get().describe()
        );
        Self {
            store,
            servicer,
            sector_size,
            logger,
        }
    }

    /// Handle one control message given as separate arguments.
    pub fn message<S: AsRef<str>>(&self, args: &[S]) -> Result<ControlReply, ControlError> {
        let message = ControlMessage::parse(args).map_err(|e| {
            log_warn!(self.logger, "rejected control message: {}", e);
            e
        })?;
        self.dispatch(message)
    }

    /// Handle one whitespace-separated control message line.
    pub fn message_line(&self, line: &str) -> Result<ControlReply, ControlError> {
        let message = line.parse::<ControlMessage>().map_err(|e| {
            log_warn!(self.logger, "rejected control message: {}", e);
            e
        })?;
        self.dispatch(message)
    }

    fn dispatch(&self, message: ControlMessage) -> Result<ControlReply, ControlError> {
        match message {
            ControlMessage::Configure { spec } => match self.store.replace(&spec) {
                Ok((previous, current)) => {
                    log_info!(
                        self.logger,
                        "pattern reconfigured: {} (was {})",
                        current.describe(),
                        previous.spec()
                    );
                    Ok(ControlReply::configured(&previous, &current))
                }
                Err(e) => {
                    log_warn!(self.logger, "rejected pattern '{}': {}", spec, e);
                    Err(ControlError::InvalidPattern(e))
                }
            },
            ControlMessage::Show => Ok(ControlReply::pattern(&self.store.get())),
        }
    }

    pub fn map(&self, request: IoRequest<'_>) -> Result<Completion, IoError> {
        self.servicer.map(request)
    }

    /// Read starting at byte `position`.
    pub fn read<'b, I>(&self, position: u64, segments: I) -> Completion
    where
        I: IntoIterator<Item = &'b mut [u8]>,
    {
        self.servicer.read(position, segments)
    }

    /// Read starting at `sector`, using the configured sector size.
    pub fn read_sectors<'b, I>(&self, sector: u64, segments: I) -> Completion
    where
        I: IntoIterator<Item = &'b mut [u8]>,
    {
        self.servicer
            .read(sector_to_position(sector, self.sector_size), segments)
    }

    pub fn begin_read(&self, position: u64) -> PendingRead<'_> {
        self.servicer.begin_read(position)
    }

    /// Snapshot of the active pattern.
    pub fn pattern(&self) -> Arc<CompiledPattern> {
        self.store.get()
    }

    pub fn store(&self) -> &Arc<PatternStore> {
        &self.store
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.servicer.stats()
    }

    pub fn sector_size(&self) -> u64 {
        self.sector_size
    }
}
