//! Buffered reader over `std::io::Read` with internal buffer management.

use std::io::{ErrorKind, Read};

use crate::{BufferError, ByteSource};

/// A reader that pulls chunks from an [`io::Read`](std::io::Read) into a
/// growing buffer and exposes them through [`ByteSource`].
///
/// Consumed bytes are dropped from the front of the buffer once they make up
/// half of it, so memory stays bounded by the largest single read request
/// plus one chunk.
pub struct IoReader<R> {
    inner: R,
    buffer: Vec<u8>,
    /// Offset of the cursor inside `buffer`.
    offset: usize,
    /// Bytes dropped from the front of `buffer` so far.
    consumed: usize,
    chunk_size: usize,
    eof: bool,
}

impl<R: Read> IoReader<R> {
    /// Creates a reader with the default 64 KiB chunk size.
    pub fn new(inner: R) -> Self {
        Self::with_chunk_size(inner, 64 * 1024)
    }

    /// Creates a reader with a custom chunk size.
    pub fn with_chunk_size(inner: R, chunk_size: usize) -> Self {
        Self {
            inner,
            buffer: Vec::new(),
            offset: 0,
            consumed: 0,
            chunk_size: chunk_size.max(1),
            eof: false,
        }
    }

    /// Returns the number of buffered, unread bytes.
    pub fn buffered(&self) -> usize {
        self.buffer.len() - self.offset
    }

    /// Reads from the inner reader until `n` bytes are buffered or it is exhausted.
    fn fill(&mut self, n: usize) -> Result<bool, BufferError> {
        while self.buffered() < n {
            if self.eof {
                return Ok(false);
            }
            self.compact();
            let start = self.buffer.len();
            self.buffer.resize(start + self.chunk_size, 0);
            let read = loop {
                match self.inner.read(&mut self.buffer[start..]) {
                    Ok(read) => break read,
                    Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                    Err(err) => {
                        self.buffer.truncate(start);
                        return Err(err.into());
                    }
                }
            };
            self.buffer.truncate(start + read);
            if read == 0 {
                self.eof = true;
            }
        }
        Ok(true)
    }

    fn compact(&mut self) {
        if self.offset == 0 {
            return;
        }
        if self.offset == self.buffer.len() {
            self.buffer.clear();
        } else if self.offset * 2 >= self.buffer.len() {
            self.buffer.drain(..self.offset);
        } else {
            return;
        }
        self.consumed += self.offset;
        self.offset = 0;
    }
}

impl<R: Read> ByteSource for IoReader<R> {
    fn has(&mut self, n: usize) -> Result<bool, BufferError> {
        self.fill(n)
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N], BufferError> {
        if !self.fill(N)? {
            return Err(BufferError::EndOfBuffer);
        }
        let mut out = [0u8; N];
        out.copy_from_slice(&self.buffer[self.offset..self.offset + N]);
        self.offset += N;
        Ok(out)
    }

    fn skip(&mut self, n: usize) -> Result<(), BufferError> {
        if !self.fill(n)? {
            return Err(BufferError::EndOfBuffer);
        }
        self.offset += n;
        Ok(())
    }

    fn position(&self) -> usize {
        self.consumed + self.offset
    }
}
