//! Numeral prefixes accepted in pattern specs.

use std::fmt;

/// Base of a pattern spec, selected by its two-character prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrefixKind {
    /// `0x` / `0X`, digits `0-9a-fA-F`
    Hex,
    /// `0o` / `0O`, digits `0-7`
    Octal,
    /// `0b` / `0B`, digits `0-1`
    Binary,
}

impl PrefixKind {
    /// Length of every prefix in bytes.
    pub const PREFIX_LEN: usize = 2;

    /// Match a prefix case-insensitively.
    ///
    /// ```
    /// use repeatfill::pattern::PrefixKind;
    ///
    /// assert_eq!(PrefixKind::from_prefix("0X"), Some(PrefixKind::Hex));
    /// assert_eq!(PrefixKind::from_prefix("0d"), None);
    /// ```
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix.to_ascii_lowercase().as_str() {
            "0x" => Some(PrefixKind::Hex),
            "0o" => Some(PrefixKind::Octal),
            "0b" => Some(PrefixKind::Binary),
            _ => None,
        }
    }

    /// Canonical lowercase prefix.
    pub fn prefix(&self) -> &'static str {
        match self {
            PrefixKind::Hex => "0x",
            PrefixKind::Octal => "0o",
            PrefixKind::Binary => "0b",
        }
    }

    /// Number of bits carried by one digit.
    pub fn bits_per_digit(&self) -> usize {
        match self {
            PrefixKind::Hex => 4,
            PrefixKind::Octal => 3,
            PrefixKind::Binary => 1,
        }
    }

    /// Numeral radix.
    pub fn radix(&self) -> u32 {
        match self {
            PrefixKind::Hex => 16,
            PrefixKind::Octal => 8,
            PrefixKind::Binary => 2,
        }
    }

    /// Decode one digit, or `None` if it is outside this base's alphabet.
    pub fn decode(&self, digit: char) -> Option<u8> {
        digit.to_digit(self.radix()).map(|value| value as u8)
    }
}

impl fmt::Display for PrefixKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PrefixKind::Hex => "hex",
            PrefixKind::Octal => "octal",
            PrefixKind::Binary => "binary",
        };
        f.write_str(name)
    }
}
