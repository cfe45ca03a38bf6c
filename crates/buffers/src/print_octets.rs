//! Hex rendering of byte runs for diagnostics.

use std::fmt::Write as _;

/// Formats a byte slice as space-separated lowercase hex, showing at most `max` bytes.
///
/// # Example
///
/// ```
/// use pot_buffers::print_octets;
///
/// assert_eq!(print_octets(&[0xff, 0xff, 0x00, 0x00], 16), "ff ff 00 00");
/// assert_eq!(print_octets(&[1, 2, 3], 2), "01 02 ... (1 more)");
/// assert_eq!(print_octets(&[], 16), "");
/// ```
pub fn print_octets(octets: &[u8], max: usize) -> String {
    let mut out = String::with_capacity(octets.len().min(max) * 3);
    for (i, byte) in octets.iter().take(max).enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{byte:02x}");
    }
    if octets.len() > max {
        let _ = write!(out, " ... ({} more)", octets.len() - max);
    }
    out
}
