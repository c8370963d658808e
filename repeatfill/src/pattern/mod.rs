//! Pattern specs and their compiled repeat units.
//!
//! A pattern spec is a prefixed numeral string such as `0xff`, `0o17` or
//! `0b10`. Compiling it yields a [`RepeatUnit`]: the shortest byte-aligned
//! buffer obtained by repeating the digit sequence a whole number of times.
//!
//! # Bit order
//!
//! Every digit is expanded least-significant bit first, and each 8-bit window
//! of the resulting stream is packed so that window bit `i` becomes byte bit
//! `i`. For hex specs this places the first digit of each pair in the low
//! nibble:
//!
//! ```
//! use repeatfill::pattern::compile;
//!
//! assert_eq!(compile("0xff").unwrap().as_bytes(), &[0xFF]);
//! assert_eq!(compile("0xab").unwrap().as_bytes(), &[0xBA]);
//! assert_eq!(compile("0b10").unwrap().as_bytes(), &[0x55]);
//! assert_eq!(compile("0o1").unwrap().as_bytes(), &[0x49, 0x92, 0x24]);
//! ```

mod compiler;
mod prefix;
mod unit;

pub use compiler::{compile, ParseError};
pub use prefix::PrefixKind;
pub use unit::{CompiledPattern, PatternSpec, RepeatUnit, DEFAULT_PATTERN_SPEC};
