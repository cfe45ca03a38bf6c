//! Class label byte-order repair and GB2312 glyph decoding.
//!
//! The label field is two bytes whose order varies from record to record.
//! Records for single-byte (ASCII) classes put the code in either byte; the
//! repair rule moves a nonzero first byte to the low position so that the
//! big-endian read yields the code.
//!
//! Double-byte labels are decoded through the GBK table, which is a superset
//! of GB2312, after ruling out the cells GB2312 leaves empty.

use encoding_rs::GBK;

use crate::error::{EncodeError, LabelError};

/// First byte of a GB2312 double-byte code (rows 1 to 87).
const LEAD: std::ops::RangeInclusive<u8> = 0xA1..=0xF7;
/// Second byte of a GB2312 double-byte code (cells 1 to 94).
const TRAIL: std::ops::RangeInclusive<u8> = 0xA1..=0xFE;
/// GBK user-defined cells decode into this range; none of them are GB2312.
const PRIVATE_USE: std::ops::RangeInclusive<char> = '\u{E000}'..='\u{F8FF}';

/// Cells inside the GB2312 rows that GB2312 leaves empty, inclusive.
///
/// GBK fills several of them (small roman numerals, extra pinyin letters,
/// vertical punctuation), so they must be rejected before the GBK decode.
const UNASSIGNED: [(u16, u16); 16] = [
    (0xA2A1, 0xA2B0),
    (0xA2E3, 0xA2E4),
    (0xA2EF, 0xA2F0),
    (0xA2FD, 0xA2FE),
    (0xA4F4, 0xA4FE),
    (0xA5F7, 0xA5FE),
    (0xA6B9, 0xA6C0),
    (0xA6D9, 0xA6FE),
    (0xA7C2, 0xA7D0),
    (0xA7F2, 0xA7FE),
    (0xA8BB, 0xA8C4),
    (0xA8EA, 0xA8FE),
    (0xA9A1, 0xA9A3),
    (0xA9F0, 0xA9FE),
    (0xAAA1, 0xAFFE),
    (0xD7FA, 0xD7FE),
];

/// Cells where GB2312 and GBK name different characters.
const GB2312_ONLY: [(u16, char); 2] = [(0xA1A4, '\u{30FB}'), (0xA1AA, '\u{2015}')];

/// Repairs the byte order of a raw label field and reads it big-endian.
///
/// ```
/// use casia_pot::label::repair_byte_order;
///
/// assert_eq!(repair_byte_order([0x00, 0x41]), 0x0041);
/// assert_eq!(repair_byte_order([0x41, 0x00]), 0x0041);
/// assert_eq!(repair_byte_order([0xA1, 0xB0]), 0xB0A1);
/// ```
pub fn repair_byte_order(raw: [u8; 2]) -> u16 {
    let ordered = if raw[0] != 0 { [raw[1], raw[0]] } else { raw };
    u16::from_be_bytes(ordered)
}

/// Produces raw label bytes that [`repair_byte_order`] maps back to `code`.
///
/// Codes with a nonzero high byte and a zero low byte have no such encoding.
pub fn encode_label(code: u16) -> Result<[u8; 2], EncodeError> {
    let [hi, lo] = code.to_be_bytes();
    match (hi, lo) {
        (0, _) => Ok([0, lo]),
        (_, 0) => Err(EncodeError::UnrepresentableLabel(code)),
        _ => Ok([lo, hi]),
    }
}

/// Decodes a label code to its glyph.
///
/// A zero high byte marks a single-byte code, which must be ASCII. Its glyph
/// is the low byte itself, not the NUL that decoding both bytes as a string
/// would yield first. Otherwise the big-endian pair is decoded as EUC-CN and
/// the first character is the glyph. Cells GB2312 leaves empty are rejected
/// even where GBK assigns them.
///
/// ```
/// use casia_pot::label::decode_label;
///
/// assert_eq!(decode_label(0x0041), Ok('A'));
/// assert_eq!(decode_label(0xB0A1), Ok('啊'));
/// assert!(decode_label(0x0080).is_err());
/// ```
pub fn decode_label(code: u16) -> Result<char, LabelError> {
    let invalid = LabelError::InvalidCodePoint(code);
    let [hi, lo] = code.to_be_bytes();
    if hi == 0 {
        return if lo.is_ascii() {
            Ok(char::from(lo))
        } else {
            Err(invalid)
        };
    }

    let bytes = [hi, lo];
    if !is_euc_cn(&bytes) || is_unassigned(code) {
        return Err(invalid);
    }
    if let Some(&(_, glyph)) = GB2312_ONLY.iter().find(|(c, _)| *c == code) {
        return Ok(glyph);
    }
    let text = GBK
        .decode_without_bom_handling_and_without_replacement(&bytes)
        .ok_or(invalid)?;
    if text.chars().any(|c| PRIVATE_USE.contains(&c)) {
        return Err(invalid);
    }
    text.chars().next().ok_or(invalid)
}

fn is_unassigned(code: u16) -> bool {
    UNASSIGNED.iter().any(|&(lo, hi)| (lo..=hi).contains(&code))
}

/// Checks byte structure against EUC-CN: ASCII, or a lead/trail pair in the GB2312 rows.
fn is_euc_cn(bytes: &[u8]) -> bool {
    let mut iter = bytes.iter();
    while let Some(&b) = iter.next() {
        if b.is_ascii() {
            continue;
        }
        if !LEAD.contains(&b) {
            return false;
        }
        match iter.next() {
            Some(t) if TRAIL.contains(t) => {}
            _ => return false,
        }
    }
    true
}
