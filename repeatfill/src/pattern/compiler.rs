//! Pattern spec parsing and digit → bit → byte compilation.

use thiserror::Error;

use super::prefix::PrefixKind;
use super::unit::{PatternSpec, RepeatUnit};

/// Errors produced while parsing a pattern spec.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Nothing to compile: the input or its digit string is empty
    #[error("Pattern spec has no digits")]
    EmptyInput,

    /// Input does not start with 0x, 0o or 0b
    #[error("Unknown prefix in pattern spec '{0}' - expected 0x, 0o or 0b")]
    UnknownPrefix(String),

    /// A character outside the base's alphabet
    #[error("Invalid {base} digit '{character}' in pattern spec")]
    InvalidDigit { base: PrefixKind, character: char },
}

/// Compile a pattern spec into its repeat unit.
///
/// # Errors
///
/// Returns [`ParseError`] if the spec is empty, has an unknown prefix or
/// contains a digit outside its base. Nothing is built on failure.
///
/// # Examples
///
/// ```
/// use repeatfill::pattern::{compile, ParseError, PrefixKind};
///
/// assert_eq!(compile("0xFF").unwrap().as_bytes(), &[0xFF]);
/// assert_eq!(
///     compile("0xG1"),
///     Err(ParseError::InvalidDigit { base: PrefixKind::Hex, character: 'G' })
/// );
/// ```
pub fn compile(spec: &str) -> Result<RepeatUnit, ParseError> {
    parse_spec(spec).map(|spec| spec.compile())
}

pub(super) fn parse_spec(text: &str) -> Result<PatternSpec, ParseError> {
    if text.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let kind = text
        .get(..PrefixKind::PREFIX_LEN)
        .and_then(PrefixKind::from_prefix)
        .ok_or_else(|| ParseError::UnknownPrefix(text.to_string()))?;

    let digits = &text[PrefixKind::PREFIX_LEN..];
    if digits.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let values = digits
        .chars()
        .map(|character| {
            kind.decode(character).ok_or(ParseError::InvalidDigit {
                base: kind,
                character,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(PatternSpec::new(kind, text.to_string(), values))
}

/// Run the digit → bit → byte pipeline for a validated spec.
///
/// The digits are repeated `lcm(bits, 8) / bits` times so the stream ends on
/// a byte boundary.
pub(super) fn build_unit(spec: &PatternSpec) -> RepeatUnit {
    let width = spec.kind().bits_per_digit();
    let bits = spec.bit_len();
    let repeats = lcm(bits, 8) / bits;

    let stream: Vec<bool> = spec
        .values()
        .iter()
        .cycle()
        .take(spec.values().len() * repeats)
        .flat_map(|&value| (0..width).map(move |bit| (value >> bit) & 1 == 1))
        .collect();

    let bytes = stream.chunks_exact(8).map(pack_window).collect();
    RepeatUnit::from_bytes(bytes)
}

/// Window bit `i` becomes byte bit `i`.
fn pack_window(window: &[bool]) -> u8 {
    window
        .iter()
        .enumerate()
        .fold(0u8, |byte, (bit, &set)| if set { byte | (1 << bit) } else { byte })
}

fn gcd(a: usize, b: usize) -> usize {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

fn lcm(a: usize, b: usize) -> usize {
    a / gcd(a, b) * b
}
