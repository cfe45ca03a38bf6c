//! Single-record decoding.
//!
//! Record layout, little-endian unless noted:
//!
//! | Field                 | Size | Notes                                      |
//! |-----------------------|------|--------------------------------------------|
//! | record_size           | 2    | advisory total length                      |
//! | label                 | 2    | byte-order repaired, then read big-endian  |
//! | reserved              | 2    | ignored                                    |
//! | declared_stroke_count | 2    | advisory                                   |
//! | pairs                 | 4 *  | `x`, `y`, or a terminator sentinel          |
//!
//! `FF FF 00 00` closes a stroke, `FF FF FF FF` closes the record.

use std::io;

use pot_buffers::{print_octets, BufferError, ByteSource};
use tracing::{debug, warn};

use crate::error::LabelError;
use crate::label::{decode_label, repair_byte_order};
use crate::normalize::normalize;
use crate::sample::{Point, Sample, Stroke};

/// Raw bytes closing a stroke.
pub const STROKE_END: [u8; 4] = [0xFF, 0xFF, 0x00, 0x00];
/// Raw bytes closing a record.
pub const RECORD_END: [u8; 4] = [0xFF, 0xFF, 0xFF, 0xFF];

/// Bytes between the start of a record and its first point pair.
pub const HEADER_LEN: usize = 8;

/// Result of decoding one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    /// A fully decoded, normalized sample.
    Sample(Sample),
    /// The label did not decode; the cursor was moved past the record.
    Skipped(SkippedRecord),
    /// The source ended inside the record. No further records follow.
    Exhausted,
}

/// A record dropped because its label is not a valid glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkippedRecord {
    /// Byte offset of the record in the source.
    pub offset: usize,
    pub label_code: u16,
    pub record_size: u16,
    pub error: LabelError,
}

/// The fixed fields preceding the stroke data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RecordHeader {
    pub offset: usize,
    pub record_size: u16,
    pub label_raw: [u8; 2],
    pub label_code: u16,
}

impl RecordHeader {
    /// Reads `record_size`, the label and the reserved field.
    pub fn read<S: ByteSource>(source: &mut S) -> Result<Self, BufferError> {
        let offset = source.position();
        let record_size = source.u16_le()?;
        let label_raw = source.array::<2>()?;
        source.skip(2)?;
        Ok(Self {
            offset,
            record_size,
            label_raw,
            label_code: repair_byte_order(label_raw),
        })
    }

    /// Bytes to skip after the reserved field to reach the next record when
    /// the label is rejected.
    ///
    /// A `record_size` below 2 skips nothing, and decoding resumes right
    /// after the reserved field instead of abandoning the rest of the source.
    pub fn resync_len(&self) -> usize {
        usize::from(self.record_size).saturating_sub(2)
    }

    /// Moves the cursor past a record whose label was rejected.
    pub fn skip_rest<S: ByteSource>(
        &self,
        source: &mut S,
        error: LabelError,
    ) -> Result<SkippedRecord, BufferError> {
        warn!(
            offset = self.offset,
            label = format_args!("{:#06x}", self.label_code),
            raw = %print_octets(&self.label_raw, 2),
            record_size = self.record_size,
            "skipping record: {error}"
        );
        source.skip(self.resync_len())?;
        Ok(SkippedRecord {
            offset: self.offset,
            label_code: self.label_code,
            record_size: self.record_size,
            error,
        })
    }
}

/// One 4-byte unit of the stroke data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Pair {
    StrokeEnd,
    RecordEnd,
    Point(Point),
}

impl Pair {
    pub fn classify(raw: [u8; 4]) -> Self {
        match raw {
            STROKE_END => Pair::StrokeEnd,
            RECORD_END => Pair::RecordEnd,
            [x0, x1, y0, y1] => Pair::Point(Point::new(
                u16::from_le_bytes([x0, x1]),
                u16::from_le_bytes([y0, y1]),
            )),
        }
    }
}

/// Decodes records from a [`ByteSource`].
///
/// ```
/// use casia_pot::record::{RecordDecoder, RecordOutcome};
/// use pot_buffers::Reader;
///
/// let bytes = [
///     0x0C, 0x00, 0x00, 0x41, 0x00, 0x00, 0x01, 0x00, // header
///     0x0A, 0x00, 0x14, 0x00, // (10, 20)
///     0xFF, 0xFF, 0x00, 0x00, // stroke end
///     0xFF, 0xFF, 0xFF, 0xFF, // record end
/// ];
/// let mut reader = Reader::new(&bytes);
/// let RecordOutcome::Sample(sample) = RecordDecoder::new().decode(&mut reader).unwrap() else {
///     panic!("expected a sample");
/// };
/// assert_eq!(sample.label_text, 'A');
/// assert_eq!(sample.point_count(), 1);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordDecoder;

impl RecordDecoder {
    pub fn new() -> Self {
        Self
    }

    /// Decodes one record, leaving the cursor at the start of the next.
    ///
    /// End of input inside the record yields [`RecordOutcome::Exhausted`];
    /// only failures of the source itself are errors.
    pub fn decode<S: ByteSource>(&self, source: &mut S) -> io::Result<RecordOutcome> {
        match self.read_record(source) {
            Ok(outcome) => Ok(outcome),
            Err(BufferError::EndOfBuffer) => Ok(RecordOutcome::Exhausted),
            Err(BufferError::Io(err)) => Err(err),
        }
    }

    fn read_record<S: ByteSource>(&self, source: &mut S) -> Result<RecordOutcome, BufferError> {
        let header = RecordHeader::read(source)?;
        let label_text = match decode_label(header.label_code) {
            Ok(glyph) => glyph,
            Err(err) => return header.skip_rest(source, err).map(RecordOutcome::Skipped),
        };
        let declared_stroke_count = source.u16_le()?;
        let strokes = read_strokes(source, header.offset)?;

        Ok(RecordOutcome::Sample(Sample {
            label_code: header.label_code,
            label_text,
            declared_stroke_count,
            strokes: normalize(&strokes),
        }))
    }
}

/// Scans point pairs up to and including the record terminator.
///
/// Points after the last stroke terminator are dropped with the record
/// terminator.
fn read_strokes<S: ByteSource>(source: &mut S, offset: usize) -> Result<Vec<Stroke>, BufferError> {
    let mut strokes = Vec::new();
    let mut current = Stroke::new();
    loop {
        match Pair::classify(source.array::<4>()?) {
            Pair::StrokeEnd => strokes.push(std::mem::take(&mut current)),
            Pair::RecordEnd => break,
            Pair::Point(point) => current.push(point),
        }
    }
    if !current.is_empty() {
        debug!(
            offset,
            points = current.len(),
            "dropping unterminated stroke before record end"
        );
    }
    Ok(strokes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pot_buffers::Reader;

    fn decode(bytes: &[u8]) -> (RecordOutcome, usize) {
        let mut reader = Reader::new(bytes);
        let outcome = RecordDecoder::new().decode(&mut reader).unwrap();
        (outcome, reader.position())
    }

    fn header(size: u16, label: [u8; 2], strokes: u16) -> Vec<u8> {
        let mut out = size.to_le_bytes().to_vec();
        out.extend_from_slice(&label);
        out.extend_from_slice(&[0, 0]);
        out.extend_from_slice(&strokes.to_le_bytes());
        out
    }

    fn point(x: u16, y: u16) -> [u8; 4] {
        let [x0, x1] = x.to_le_bytes();
        let [y0, y1] = y.to_le_bytes();
        [x0, x1, y0, y1]
    }

    #[test]
    fn test_classify() {
        assert_eq!(Pair::classify(STROKE_END), Pair::StrokeEnd);
        assert_eq!(Pair::classify(RECORD_END), Pair::RecordEnd);
        assert_eq!(
            Pair::classify([0xFF, 0xFF, 0x01, 0x00]),
            Pair::Point(Point::new(0xFFFF, 1))
        );
        assert_eq!(
            Pair::classify([0x00, 0x00, 0xFF, 0xFF]),
            Pair::Point(Point::new(0, 0xFFFF))
        );
    }

    #[test]
    fn test_two_strokes() {
        let mut bytes = header(0, [0x00, 0x41], 2);
        bytes.extend(point(10, 5));
        bytes.extend(point(12, 9));
        bytes.extend(STROKE_END);
        bytes.extend(point(20, 1));
        bytes.extend(STROKE_END);
        bytes.extend(RECORD_END);
        let (outcome, pos) = decode(&bytes);
        let RecordOutcome::Sample(sample) = outcome else {
            panic!("expected sample, got {outcome:?}");
        };
        assert_eq!(pos, bytes.len());
        assert_eq!(sample.declared_stroke_count, 2);
        assert_eq!(
            sample.strokes,
            vec![
                Stroke::from(vec![Point::new(0, 4), Point::new(2, 0)]),
                Stroke::from(vec![Point::new(10, 8)]),
            ]
        );
    }

    #[test]
    fn test_declared_count_is_advisory() {
        let mut bytes = header(0, [0x00, 0x41], 7);
        bytes.extend(point(1, 1));
        bytes.extend(STROKE_END);
        bytes.extend(RECORD_END);
        let (RecordOutcome::Sample(sample), _) = decode(&bytes) else {
            panic!("expected sample");
        };
        assert_eq!(sample.declared_stroke_count, 7);
        assert_eq!(sample.strokes.len(), 1);
    }

    #[test]
    fn test_zero_stroke_record() {
        let mut bytes = header(12, [0x00, 0x41], 0);
        bytes.extend(RECORD_END);
        let (RecordOutcome::Sample(sample), pos) = decode(&bytes) else {
            panic!("expected sample");
        };
        assert!(sample.strokes.is_empty());
        assert_eq!(pos, 12);
    }

    #[test]
    fn test_empty_strokes_kept() {
        let mut bytes = header(0, [0x00, 0x41], 2);
        bytes.extend(STROKE_END);
        bytes.extend(point(3, 3));
        bytes.extend(STROKE_END);
        bytes.extend(RECORD_END);
        let (RecordOutcome::Sample(sample), _) = decode(&bytes) else {
            panic!("expected sample");
        };
        assert_eq!(
            sample.strokes,
            vec![Stroke::new(), Stroke::from(vec![Point::new(0, 0)])]
        );
    }

    #[test]
    fn test_unterminated_stroke_dropped() {
        let mut bytes = header(0, [0x00, 0x41], 1);
        bytes.extend(point(1, 2));
        bytes.extend(STROKE_END);
        bytes.extend(point(9, 9));
        bytes.extend(RECORD_END);
        let (RecordOutcome::Sample(sample), pos) = decode(&bytes) else {
            panic!("expected sample");
        };
        assert_eq!(sample.strokes, vec![Stroke::from(vec![Point::new(0, 0)])]);
        assert_eq!(pos, bytes.len());
    }

    #[test]
    fn test_skipped_record_resyncs() {
        // 0x00B0 is not a GB2312 code; skip record_size - 2 = 4 more bytes.
        let mut bytes = header(6, [0x00, 0xB0], 0);
        bytes.truncate(6);
        bytes.extend([1, 2, 3, 4, 5, 6]);
        let (outcome, pos) = decode(&bytes);
        assert_eq!(
            outcome,
            RecordOutcome::Skipped(SkippedRecord {
                offset: 0,
                label_code: 0x00B0,
                record_size: 6,
                error: LabelError::InvalidCodePoint(0x00B0),
            })
        );
        assert_eq!(pos, 10);
    }

    #[test]
    fn test_tiny_record_size_skips_nothing() {
        let mut bytes = header(1, [0x00, 0x80], 0);
        bytes.truncate(6);
        let (outcome, pos) = decode(&bytes);
        assert!(matches!(outcome, RecordOutcome::Skipped(_)));
        assert_eq!(pos, 6);

        // The following record still decodes.
        let mut next = header(0, [0x00, 0x41], 0);
        next.extend(RECORD_END);
        bytes.extend(next);
        let mut reader = Reader::new(&bytes);
        let decoder = RecordDecoder::new();
        assert!(matches!(decoder.decode(&mut reader).unwrap(), RecordOutcome::Skipped(_)));
        let RecordOutcome::Sample(sample) = decoder.decode(&mut reader).unwrap() else {
            panic!("expected sample after tiny record");
        };
        assert_eq!(sample.label_text, 'A');
    }

    #[test]
    fn test_exhausted_mid_record() {
        let mut bytes = header(0, [0x00, 0x41], 1);
        bytes.extend(point(1, 2));
        bytes.extend([0xFF, 0xFF]);
        assert_eq!(decode(&bytes).0, RecordOutcome::Exhausted);
        assert_eq!(decode(&bytes[..3]).0, RecordOutcome::Exhausted);
    }

    #[test]
    fn test_exhausted_while_resyncing() {
        let mut bytes = header(100, [0x00, 0xB0], 0);
        bytes.truncate(6);
        assert_eq!(decode(&bytes).0, RecordOutcome::Exhausted);
    }
}
