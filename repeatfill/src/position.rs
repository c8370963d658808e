//! Mapping device positions to cyclic offsets.
//!
//! A read starts at `position % period` and every segment moves the offset
//! forward by its length, so filling segments one after another gives the
//! same bytes as filling one buffer of their combined length.

use crate::fill::fill;
use crate::pattern::RepeatUnit;

/// Default bytes per sector for sector-addressed requests.
pub const DEFAULT_SECTOR_SIZE: u64 = 512;

/// Cyclic offset of byte `position` within a pattern of `period` bytes.
///
/// `period` must be non-zero; repeat units always are.
pub fn initial_offset(position: u64, period: usize) -> usize {
    (position % period as u64) as usize
}

/// Byte position of `sector`, saturating at `u64::MAX`.
pub fn sector_to_position(sector: u64, sector_size: u64) -> u64 {
    sector.saturating_mul(sector_size)
}

/// Walks the segments of one request, carrying the cyclic offset across them.
///
/// # Example
///
/// ```
/// use repeatfill::pattern::compile;
/// use repeatfill::position::SegmentCursor;
///
/// let unit = compile("0xaabbcc").unwrap();
/// let mut cursor = SegmentCursor::new(&unit, 4);
/// let (mut a, mut b) = ([0u8; 2], [0u8; 3]);
/// cursor.fill_next(&mut a);
/// cursor.fill_next(&mut b);
/// assert_eq!(a, [0xBB, 0xCC]);
/// assert_eq!(b, [0xAA, 0xBB, 0xCC]);
/// ```
#[derive(Debug, Clone)]
pub struct SegmentCursor<'a> {
    unit: &'a RepeatUnit,
    offset: usize,
    filled: u64,
}

impl<'a> SegmentCursor<'a> {
    /// Start a cursor for a request beginning at byte `position`.
    pub fn new(unit: &'a RepeatUnit, position: u64) -> Self {
        Self {
            unit,
            offset: initial_offset(position, unit.len()),
            filled: 0,
        }
    }

    /// Offset the next segment starts at.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Total bytes passed so far.
    pub fn filled(&self) -> u64 {
        self.filled
    }

    /// Move past a segment of `len` bytes without filling it.
    pub fn advance(&mut self, len: usize) {
        let period = self.unit.len();
        self.offset = (self.offset + len % period) % period;
        self.filled = self.filled.saturating_add(len as u64);
    }

    /// Fill the next segment and advance past it.
    pub fn fill_next(&mut self, segment: &mut [u8]) {
        fill(segment, self.unit, self.offset);
        self.advance(segment.len());
    }
}
