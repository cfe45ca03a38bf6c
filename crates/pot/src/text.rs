//! Delimited text format for one class of samples.
//!
//! ```text
//! 0x41$#!0,0!3,4#!1,1$#!2,2
//! ^^^^ ^ ^   ^
//! |    | |   point: `!x,y`
//! |    | stroke: `#` then its points
//! |    sample: `$` then its strokes
//! label, lowercase hex
//! ```
//!
//! Every delimiter opens its element, so empty samples (`$$`) and empty
//! strokes (`##`) survive a round trip.

use std::fmt::Write as _;

use crate::dataset::StrokeSet;
use crate::error::TextError;
use crate::sample::{label_hex, Point, Stroke};

pub const SAMPLE_DELIMITER: char = '$';
pub const STROKE_DELIMITER: char = '#';
pub const POINT_DELIMITER: char = '!';
pub const COORD_SEPARATOR: char = ',';

/// Renders one class.
///
/// ```
/// use casia_pot::text::encode_class;
/// use casia_pot::{Point, Stroke};
///
/// let sample = vec![Stroke::from(vec![Point::new(0, 0), Point::new(3, 4)])];
/// assert_eq!(encode_class(0x41, &[sample, vec![]]), "0x41$#!0,0!3,4$");
/// ```
pub fn encode_class(label_code: u16, samples: &[StrokeSet]) -> String {
    let mut out = label_hex(label_code);
    for sample in samples {
        out.push(SAMPLE_DELIMITER);
        for stroke in sample {
            out.push(STROKE_DELIMITER);
            for p in stroke {
                let _ = write!(out, "{POINT_DELIMITER}{}{COORD_SEPARATOR}{}", p.x, p.y);
            }
        }
    }
    out
}

/// Parses a class rendered by [`encode_class`].
///
/// Trailing line breaks are ignored; anything else out of place is an error
/// carrying its byte offset.
pub fn decode_class(text: &str) -> Result<(u16, Vec<StrokeSet>), TextError> {
    let text = text.trim_end_matches(['\r', '\n']);
    let mut parts = split_offsets(text, 0, SAMPLE_DELIMITER);
    let Some((_, label)) = parts.next() else {
        return Err(TextError::InvalidLabel(String::new()));
    };
    let code = parse_label_hex(label).ok_or_else(|| TextError::InvalidLabel(label.to_string()))?;
    let samples = parts
        .map(|(offset, sample)| decode_sample(sample, offset))
        .collect::<Result<_, _>>()?;
    Ok((code, samples))
}

/// Parses a `0x`-prefixed hex label.
///
/// ```
/// use casia_pot::text::parse_label_hex;
///
/// assert_eq!(parse_label_hex("0x41"), Some(0x41));
/// assert_eq!(parse_label_hex("0xB0A1"), Some(0xB0A1));
/// assert_eq!(parse_label_hex("41"), None);
/// ```
pub fn parse_label_hex(text: &str) -> Option<u16> {
    let digits = text.strip_prefix("0x")?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u16::from_str_radix(digits, 16).ok()
}

/// Splits on `delimiter`, pairing each part with its byte offset in the whole document.
fn split_offsets(text: &str, base: usize, delimiter: char) -> impl Iterator<Item = (usize, &str)> {
    let mut offset = base;
    text.split(delimiter).map(move |part| {
        let at = offset;
        offset += part.len() + delimiter.len_utf8();
        (at, part)
    })
}

/// Splits an element body into its children, requiring nothing before the first delimiter.
fn children(
    text: &str,
    base: usize,
    delimiter: char,
) -> Result<impl Iterator<Item = (usize, &str)>, TextError> {
    let mut parts = split_offsets(text, base, delimiter);
    if let Some((offset, head)) = parts.next() {
        if !head.is_empty() {
            return Err(TextError::StrayText { offset, delimiter });
        }
    }
    Ok(parts)
}

fn decode_sample(text: &str, base: usize) -> Result<StrokeSet, TextError> {
    children(text, base, STROKE_DELIMITER)?
        .map(|(offset, stroke)| decode_stroke(stroke, offset))
        .collect()
}

fn decode_stroke(text: &str, base: usize) -> Result<Stroke, TextError> {
    children(text, base, POINT_DELIMITER)?
        .map(|(offset, point)| decode_point(point, offset))
        .collect::<Result<Vec<_>, _>>()
        .map(Stroke::from)
}

fn decode_point(text: &str, offset: usize) -> Result<Point, TextError> {
    let malformed = || TextError::MalformedPoint {
        offset,
        text: text.to_string(),
    };
    let (x, y) = text.split_once(COORD_SEPARATOR).ok_or_else(malformed)?;
    let coord = |s: &str| {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        s.parse::<u16>().ok()
    };
    match (coord(x), coord(y)) {
        (Some(x), Some(y)) => Ok(Point::new(x, y)),
        _ => Err(malformed()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stroke(points: &[(u16, u16)]) -> Stroke {
        points.iter().copied().collect()
    }

    #[test]
    fn test_encode_matches_layout() {
        let samples = vec![
            vec![stroke(&[(0, 0), (3, 4)]), stroke(&[(1, 1)])],
            vec![stroke(&[(2, 2)])],
        ];
        assert_eq!(encode_class(0x41, &samples), "0x41$#!0,0!3,4#!1,1$#!2,2");
    }

    #[test]
    fn test_decode_layout() {
        let (code, samples) = decode_class("0xb0a1$#!0,0!3,4#!1,1$#!2,2").unwrap();
        assert_eq!(code, 0xB0A1);
        assert_eq!(
            samples,
            vec![
                vec![stroke(&[(0, 0), (3, 4)]), stroke(&[(1, 1)])],
                vec![stroke(&[(2, 2)])],
            ]
        );
    }

    #[test]
    fn test_empty_elements_round_trip() {
        let samples = vec![vec![], vec![Stroke::new(), stroke(&[(5, 6)]), Stroke::new()], vec![]];
        let text = encode_class(0x21, &samples);
        assert_eq!(text, "0x21$$##!5,6#$");
        assert_eq!(decode_class(&text).unwrap(), (0x21, samples));
    }

    #[test]
    fn test_class_without_samples() {
        assert_eq!(decode_class("0x41").unwrap(), (0x41, vec![]));
        assert_eq!(decode_class("0x41\n").unwrap(), (0x41, vec![]));
    }

    #[test]
    fn test_invalid_label() {
        assert_eq!(
            decode_class("A$#!1,1"),
            Err(TextError::InvalidLabel("A".into()))
        );
        assert_eq!(decode_class(""), Err(TextError::InvalidLabel("".into())));
        assert!(decode_class("0x10000").is_err());
        assert!(decode_class("0x+1").is_err());
    }

    #[test]
    fn test_stray_text_offsets() {
        assert_eq!(
            decode_class("0x41$oops#!1,1"),
            Err(TextError::StrayText {
                offset: 5,
                delimiter: '#'
            })
        );
        assert_eq!(
            decode_class("0x41$#x!1,1"),
            Err(TextError::StrayText {
                offset: 6,
                delimiter: '!'
            })
        );
    }

    #[test]
    fn test_malformed_points() {
        assert_eq!(
            decode_class("0x41$#!1,1!12"),
            Err(TextError::MalformedPoint {
                offset: 11,
                text: "12".into()
            })
        );
        assert!(decode_class("0x41$#!1,-1").is_err());
        assert!(decode_class("0x41$#!70000,1").is_err());
        assert!(decode_class("0x41$#!,1").is_err());
        assert!(decode_class("0x41$#!1,1,1").is_err());
    }
}
