//! CLI command implementations.
//!
//! Each subcommand has its own module with argument definitions and handlers.
//!
//! - [`compile`] - Compile a pattern spec
//! - [`config`] - Configuration management (get, set, list, path)
//! - [`dump`] - Read through a target and dump the bytes
//! - [`message`] - Send a control message

pub mod compile;
pub mod config;
pub mod dump;
pub mod message;
