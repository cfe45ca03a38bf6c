//! Record encoder for the `.pot` wire format.

use pot_buffers::Writer;

use crate::error::EncodeError;
use crate::label::encode_label;
use crate::record::{HEADER_LEN, RECORD_END, STROKE_END};
use crate::sample::Stroke;

/// Writes records that [`RecordDecoder`](crate::record::RecordDecoder) reads back.
///
/// `record_size` is set to the full record length. Every stroke, including
/// the last, is followed by a stroke terminator.
///
/// ```
/// use casia_pot::encode::RecordEncoder;
/// use casia_pot::{Point, Stroke, StreamDecoder};
///
/// let mut encoder = RecordEncoder::new();
/// let strokes = vec![Stroke::from(vec![Point::new(10, 20)])];
/// encoder.record(0x41, strokes.len() as u16, &strokes).unwrap();
/// let bytes = encoder.flush();
///
/// let decoded = StreamDecoder::new().decode_slice(&bytes);
/// assert_eq!(decoded.samples[0].strokes, vec![Stroke::from(vec![Point::new(0, 0)])]);
/// ```
#[derive(Debug, Default)]
pub struct RecordEncoder {
    pub writer: Writer,
}

impl RecordEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one record.
    ///
    /// Nothing is written when an error is returned.
    pub fn record(
        &mut self,
        label_code: u16,
        declared_stroke_count: u16,
        strokes: &[Stroke],
    ) -> Result<(), EncodeError> {
        let label = encode_label(label_code)?;
        let points: usize = strokes.iter().map(Stroke::len).sum();
        let len = HEADER_LEN + 4 * (points + strokes.len() + 1);
        let record_size = u16::try_from(len).map_err(|_| EncodeError::RecordTooLarge(len))?;
        if let Some(p) = strokes
            .iter()
            .flat_map(Stroke::iter)
            .find(|p| p.x == 0xFFFF && (p.y == 0 || p.y == 0xFFFF))
        {
            return Err(EncodeError::SentinelPoint { x: p.x, y: p.y });
        }

        let w = &mut self.writer;
        w.u16_le(record_size);
        w.buf(&label);
        w.u16(0);
        w.u16_le(declared_stroke_count);
        for stroke in strokes {
            for p in stroke {
                w.u16_le(p.x);
                w.u16_le(p.y);
            }
            w.buf(&STROKE_END);
        }
        w.buf(&RECORD_END);
        Ok(())
    }

    /// Appends a record with raw label bytes and an opaque body.
    ///
    /// `record_size` is `body.len() + 2`, so a decoder that rejects the label
    /// resynchronizes exactly at the end of `body`.
    pub fn opaque(&mut self, label_raw: [u8; 2], body: &[u8]) -> Result<(), EncodeError> {
        let record_size = u16::try_from(body.len() + 2)
            .map_err(|_| EncodeError::RecordTooLarge(body.len() + 6))?;
        let w = &mut self.writer;
        w.u16_le(record_size);
        w.buf(&label_raw);
        w.u16(0);
        w.buf(body);
        Ok(())
    }

    /// Takes the encoded stream.
    pub fn flush(&mut self) -> Vec<u8> {
        self.writer.flush()
    }
}
