//! Human-readable size parsing (e.g., "512", "4K", "1MB").

use thiserror::Error;

/// Error parsing a size string.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid size '{input}' - expected format like '512', '4KB', or '1MB'")]
pub struct SizeParseError {
    input: String,
}

impl SizeParseError {
    fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }
}

const KB: u64 = 1024;
const MB: u64 = 1024 * KB;
const GB: u64 = 1024 * MB;

/// Parse a human-readable size string into bytes.
///
/// Bare numbers are bytes; `K`/`KB`, `M`/`MB` and `G`/`GB` suffixes are
/// binary multiples. Case-insensitive and whitespace tolerant.
///
/// ```
/// use repeatfill::config::parse_size;
///
/// assert_eq!(parse_size("512").unwrap(), 512);
/// assert_eq!(parse_size("4K").unwrap(), 4096);
/// assert_eq!(parse_size("1 MB").unwrap(), 1024 * 1024);
/// ```
pub fn parse_size(s: &str) -> Result<u64, SizeParseError> {
    let s = s.trim();
    let upper = s.to_ascii_uppercase();
    let digits = upper.strip_suffix('B').unwrap_or(&upper);

    let (num_str, multiplier) = if let Some(n) = digits.strip_suffix('G') {
        (n, GB)
    } else if let Some(n) = digits.strip_suffix('M') {
        (n, MB)
    } else if let Some(n) = digits.strip_suffix('K') {
        (n, KB)
    } else if digits.len() == upper.len() {
        (digits, 1)
    } else {
        // A bare trailing 'B' is not a unit
        return Err(SizeParseError::new(s));
    };

    let num: u64 = num_str.trim().parse().map_err(|_| SizeParseError::new(s))?;
    num.checked_mul(multiplier)
        .ok_or_else(|| SizeParseError::new(s))
}

/// Format a byte count using the largest exact unit.
///
/// ```
/// use repeatfill::config::format_size;
///
/// assert_eq!(format_size(512), "512");
/// assert_eq!(format_size(4096), "4KB");
/// ```
pub fn format_size(bytes: u64) -> String {
    if bytes >= GB && bytes % GB == 0 {
        format!("{}GB", bytes / GB)
    } else if bytes >= MB && bytes % MB == 0 {
        format!("{}MB", bytes / MB)
    } else if bytes >= KB && bytes % KB == 0 {
        format!("{}KB", bytes / KB)
    } else {
        bytes.to_string()
    }
}
