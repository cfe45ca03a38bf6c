//! Parallel decoding of in-memory streams.
//!
//! Records are self-delimiting, so a cheap sequential pass can find each
//! record's byte range. The ranges are then decoded independently on the
//! rayon pool and collected back in stream order.

use pot_buffers::{BufferError, ByteSource, Reader};
use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::label::decode_label;
use crate::record::{Pair, RecordDecoder, RecordHeader, RecordOutcome};
use crate::stream::Decoded;

/// Byte range of one decodable record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordSpan {
    pub offset: usize,
    pub len: usize,
}

impl RecordSpan {
    pub fn end(&self) -> usize {
        self.offset + self.len
    }
}

/// Result of the framing pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Spans {
    pub spans: Vec<RecordSpan>,
    pub skipped: usize,
    pub truncated: bool,
}

/// Finds the byte range of every record with a decodable label.
///
/// Applies the same framing, label and resynchronization rules as
/// [`StreamDecoder`](crate::StreamDecoder), without building points.
pub fn split_records(data: &[u8]) -> Spans {
    let mut reader = Reader::new(data);
    let mut out = Spans::default();
    while reader.size() >= 2 {
        match frame(&mut reader) {
            Ok(Some(span)) => out.spans.push(span),
            Ok(None) => out.skipped += 1,
            Err(_) => {
                out.truncated = true;
                break;
            }
        }
    }
    out
}

fn frame(reader: &mut Reader<'_>) -> Result<Option<RecordSpan>, BufferError> {
    let header = RecordHeader::read(reader)?;
    if let Err(err) = decode_label(header.label_code) {
        header.skip_rest(reader, err)?;
        return Ok(None);
    }
    reader.skip(2)?;
    while Pair::classify(reader.array::<4>()?) != Pair::RecordEnd {}
    Ok(Some(RecordSpan {
        offset: header.offset,
        len: reader.position() - header.offset,
    }))
}

/// Decodes an in-memory stream using the rayon thread pool.
///
/// Produces the same result as [`StreamDecoder::decode_slice`](crate::StreamDecoder::decode_slice).
#[instrument(skip_all, fields(bytes = data.len()))]
pub fn decode_parallel(data: &[u8]) -> Decoded {
    let Spans {
        spans,
        skipped,
        truncated,
    } = split_records(data);
    debug!(records = spans.len(), skipped, "framed stream");

    let decoder = RecordDecoder::new();
    let samples = spans
        .par_iter()
        .filter_map(|span| {
            let mut reader = Reader::from_slice(data, span.offset, span.end());
            match decoder.decode(&mut reader) {
                Ok(RecordOutcome::Sample(sample)) => Some(sample),
                other => {
                    debug!(offset = span.offset, ?other, "framed record did not decode");
                    None
                }
            }
        })
        .collect();

    Decoded {
        samples,
        skipped,
        truncated,
    }
}
