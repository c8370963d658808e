//! repeatfill - a synthetic storage target that answers reads with a
//! repeating byte pattern.
//!
//! A short pattern spec such as `0xff`, `0o17` or `0b10` is compiled into a
//! byte-aligned repeat unit. Reads at any position and with any segmentation
//! are filled by tiling that unit from the right cyclic offset. Writes and
//! discards are dropped, and read-ahead is refused.
//!
//! # High-Level API
//!
//! [`target::RepeatTarget`] ties the pieces together:
//!
//! ```
//! use repeatfill::log::NoOpLogger;
//! use repeatfill::target::RepeatTarget;
//! use std::sync::Arc;
//!
//! let target = RepeatTarget::with_defaults(Arc::new(NoOpLogger));
//! target.message_line("seq.config 0b10").unwrap();
//!
//! let (mut head, mut tail) = ([0u8; 3], [0u8; 5]);
//! target.read(4096, [&mut head[..], &mut tail[..]]);
//! assert_eq!(head, [0x55; 3]);
//! assert_eq!(tail, [0x55; 5]);
//! ```
//!
//! The building blocks are usable on their own: [`pattern::compile`],
//! [`fill::fill`], [`position::SegmentCursor`] and [`store::PatternStore`].

pub mod config;
pub mod fill;
pub mod log;
pub mod logging;
pub mod pattern;
pub mod position;
pub mod store;
pub mod target;

/// Version of the repeatfill library and CLI.
///
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
