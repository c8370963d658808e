//! Logging seam for library components.
//!
//! Targets, servicers and config loaders log through an `Arc<dyn Logger>`
//! instead of calling `tracing` directly, so embedding code picks the backend:
//!
//! - [`TracingLogger`] forwards to the `tracing` crate (the CLI uses this)
//! - [`NoOpLogger`] drops everything (benchmarks, quiet embedding)
//! - [`MemoryLogger`] keeps lines in memory so tests can assert on them
//!
//! ```
//! use repeatfill::log::{Logger, MemoryLogger};
//! use repeatfill::log_info;
//! use std::sync::Arc;
//!
//! let logger = Arc::new(MemoryLogger::new());
//! log_info!(logger, "pattern set to {}", "0xff");
//! assert!(logger.contains("pattern set to 0xff"));
//! ```

mod memory;
mod noop;
mod tracing_adapter;
mod r#trait;

pub use memory::MemoryLogger;
pub use noop::NoOpLogger;
pub use r#trait::{LogLevel, Logger};
pub use tracing_adapter::TracingLogger;
