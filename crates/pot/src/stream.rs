//! Whole-source decoding.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use pot_buffers::{BufferError, ByteSource, IoReader, Reader};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::error::StreamError;
use crate::record::{RecordDecoder, RecordOutcome};
use crate::sample::Sample;

/// Everything a stream decode produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Decoded {
    /// Samples in the order their records appear.
    pub samples: Vec<Sample>,
    /// Records dropped for an undecodable label.
    pub skipped: usize,
    /// The source ended inside a record.
    pub truncated: bool,
}

impl Decoded {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Appends another decode's results, as when reading several files.
    pub fn extend(&mut self, other: Decoded) {
        self.samples.extend(other.samples);
        self.skipped += other.skipped;
        self.truncated |= other.truncated;
    }
}

impl IntoIterator for Decoded {
    type Item = Sample;
    type IntoIter = std::vec::IntoIter<Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.into_iter()
    }
}

/// Drives [`RecordDecoder`] over a source until it runs out.
///
/// Records with an undecodable label are skipped and counted. A source that
/// ends inside a record stops the decode normally with `truncated` set. Only
/// an I/O failure of the source aborts, and it still hands back what was
/// decoded before it.
#[derive(Debug, Clone, Copy, Default)]
pub struct StreamDecoder {
    record: RecordDecoder,
}

impl StreamDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes an in-memory stream.
    pub fn decode_slice(&self, data: &[u8]) -> Decoded {
        let mut reader = Reader::new(data);
        match self.decode_source(&mut reader) {
            Ok(decoded) => decoded,
            // A slice reader never reports I/O failures.
            Err(err) => err.decoded,
        }
    }

    /// Decodes a stream read incrementally from `reader`.
    pub fn decode_reader<R: Read>(&self, reader: R) -> Result<Decoded, StreamError> {
        self.decode_source(&mut IoReader::new(reader))
    }

    /// Opens and decodes a `.pot` file.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn decode_file(&self, path: impl AsRef<Path>) -> Result<Decoded, StreamError> {
        let file = File::open(path.as_ref()).map_err(|source| StreamError {
            decoded: Decoded::default(),
            position: 0,
            source,
        })?;
        let decoded = self.decode_reader(file)?;
        info!(
            samples = decoded.samples.len(),
            skipped = decoded.skipped,
            truncated = decoded.truncated,
            "decoded file"
        );
        Ok(decoded)
    }

    /// Decodes every record of an arbitrary [`ByteSource`].
    pub fn decode_source<S: ByteSource>(&self, source: &mut S) -> Result<Decoded, StreamError> {
        let mut decoded = Decoded::default();
        loop {
            match self.step(source) {
                Ok(Some(RecordOutcome::Sample(sample))) => {
                    debug!(
                        index = decoded.samples.len(),
                        label = %sample.label_text,
                        strokes = sample.strokes.len(),
                        "decoded record"
                    );
                    decoded.samples.push(sample);
                }
                Ok(Some(RecordOutcome::Skipped(_))) => decoded.skipped += 1,
                Ok(Some(RecordOutcome::Exhausted)) => {
                    warn!(
                        position = source.position(),
                        "source ended inside a record; dropping the partial record"
                    );
                    decoded.truncated = true;
                    break;
                }
                Ok(None) => break,
                Err(source_err) => {
                    return Err(StreamError {
                        decoded,
                        position: source.position(),
                        source: source_err,
                    })
                }
            }
        }
        Ok(decoded)
    }

    /// Decodes the next record, or returns `None` when fewer than two bytes remain.
    fn step<S: ByteSource>(&self, source: &mut S) -> io::Result<Option<RecordOutcome>> {
        let more = source.has(2).map_err(|err| match err {
            BufferError::Io(err) => err,
            BufferError::EndOfBuffer => io::ErrorKind::UnexpectedEof.into(),
        })?;
        if !more {
            return Ok(None);
        }
        self.record.decode(source).map(Some)
    }
}
