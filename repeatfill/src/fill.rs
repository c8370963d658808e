//! Tiling a repeat unit across a destination buffer.

use crate::pattern::RepeatUnit;

/// Fill `dest` with `unit` tiled from cyclic `offset`.
///
/// For every index `k`, `dest[k] == unit[(offset + k) % unit.len()]`. An
/// offset past the end of the unit wraps around.
///
/// # Examples
///
/// ```
/// use repeatfill::fill::fill;
/// use repeatfill::pattern::compile;
///
/// let unit = compile("0xaabbcc").unwrap();
/// let mut dest = [0u8; 5];
/// fill(&mut dest, &unit, 1);
/// assert_eq!(dest, [0xBB, 0xCC, 0xAA, 0xBB, 0xCC]);
/// ```
pub fn fill(dest: &mut [u8], unit: &RepeatUnit, offset: usize) {
    let bytes = unit.as_bytes();
    if let [byte] = bytes {
        dest.fill(*byte);
        return;
    }

    let start = offset % bytes.len();
    for (slot, byte) in dest.iter_mut().zip(bytes.iter().cycle().skip(start)) {
        *slot = *byte;
    }
}
