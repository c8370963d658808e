//! Parsed specs, repeat units and the pair published as the active pattern.

use std::fmt;
use std::str::FromStr;

use super::compiler::{build_unit, parse_spec, ParseError};
use super::prefix::PrefixKind;

/// Pattern used when nothing else is configured.
pub const DEFAULT_PATTERN_SPEC: &str = "0xff";

/// A validated pattern spec: base plus a non-empty digit string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternSpec {
    kind: PrefixKind,
    /// Spec as written, prefix included
    text: String,
    /// Digit values in spec order
    values: Vec<u8>,
}

impl PatternSpec {
    pub(super) fn new(kind: PrefixKind, text: String, values: Vec<u8>) -> Self {
        Self { kind, text, values }
    }

    /// Parse and validate a spec without compiling it.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        parse_spec(text)
    }

    /// Numeral base of the spec.
    pub fn kind(&self) -> PrefixKind {
        self.kind
    }

    /// Spec text as originally written.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Digit string with the prefix stripped.
    pub fn digits(&self) -> &str {
        &self.text[PrefixKind::PREFIX_LEN..]
    }

    /// Decoded digit values.
    pub fn values(&self) -> &[u8] {
        &self.values
    }

    /// Number of bits described by one pass over the digits.
    pub fn bit_len(&self) -> usize {
        self.values.len() * self.kind.bits_per_digit()
    }

    /// Build the repeat unit for this spec.
    pub fn compile(&self) -> RepeatUnit {
        build_unit(self)
    }
}

impl Default for PatternSpec {
    fn default() -> Self {
        Self::new(
            PrefixKind::Hex,
            DEFAULT_PATTERN_SPEC.to_string(),
            vec![0xF, 0xF],
        )
    }
}

impl FromStr for PatternSpec {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_spec(s)
    }
}

impl fmt::Display for PatternSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Canonical byte-aligned buffer tiled across reads.
///
/// Never empty, never mutated once built. A new pattern means a new unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepeatUnit(Box<[u8]>);

impl RepeatUnit {
    pub(super) fn from_bytes(bytes: Vec<u8>) -> Self {
        debug_assert!(!bytes.is_empty(), "repeat unit must hold at least one byte");
        Self(bytes.into_boxed_slice())
    }

    /// The repeating bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Period of the pattern in bytes (always at least 1).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; kept for API symmetry with slices.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Lowercase hex rendering, two characters per byte.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|byte| format!("{:02x}", byte)).collect()
    }
}

impl AsRef<[u8]> for RepeatUnit {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for RepeatUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// A spec together with the unit compiled from it.
///
/// This is the value the pattern store publishes; readers hold it behind an
/// `Arc` for the lifetime of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledPattern {
    spec: PatternSpec,
    unit: RepeatUnit,
}

impl CompiledPattern {
    /// Parse and compile `text` in one step.
    pub fn compile(text: &str) -> Result<Self, ParseError> {
        parse_spec(text).map(Self::from_spec)
    }

    /// Compile an already validated spec.
    pub fn from_spec(spec: PatternSpec) -> Self {
        let unit = spec.compile();
        Self { spec, unit }
    }

    pub fn spec(&self) -> &PatternSpec {
        &self.spec
    }

    pub fn unit(&self) -> &RepeatUnit {
        &self.unit
    }

    /// One-line summary, e.g. `0xab => ba (1 byte)`.
    pub fn describe(&self) -> String {
        let len = self.unit.len();
        format!(
            "{} => {} ({} byte{})",
            self.spec,
            self.unit,
            len,
            if len == 1 { "" } else { "s" }
        )
    }
}

impl Default for CompiledPattern {
    fn default() -> Self {
        Self::from_spec(PatternSpec::default())
    }
}
