//! Binary buffer reader with cursor tracking.

use crate::{BufferError, ByteSource};

/// A binary buffer reader that reads data from a byte slice.
///
/// Reads are bounds-checked: running past `end` yields
/// [`BufferError::EndOfBuffer`] and leaves the cursor where it was.
///
/// # Example
///
/// ```
/// use pot_buffers::{ByteSource, Reader};
///
/// let data = [0x01, 0x02, 0x03, 0x04];
/// let mut reader = Reader::new(&data);
///
/// assert_eq!(reader.u16_le().unwrap(), 0x0201);
/// assert!(reader.array::<4>().is_err());
/// assert_eq!(reader.u16_le().unwrap(), 0x0403);
/// ```
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    /// The underlying byte slice.
    pub uint8: &'a [u8],
    /// Current cursor position.
    pub x: usize,
    /// End position (exclusive).
    pub end: usize,
}

impl<'a> Reader<'a> {
    /// Creates a new reader for the given byte slice.
    pub fn new(uint8: &'a [u8]) -> Self {
        let end = uint8.len();
        Self { uint8, x: 0, end }
    }

    /// Creates a reader from a slice with custom start and end positions.
    pub fn from_slice(uint8: &'a [u8], x: usize, end: usize) -> Self {
        Self { uint8, x, end }
    }

    /// Returns the number of remaining bytes.
    pub fn size(&self) -> usize {
        self.end - self.x
    }

    fn assert_size(&self, size: usize) -> Result<(), BufferError> {
        if size > self.size() {
            return Err(BufferError::EndOfBuffer);
        }
        Ok(())
    }

}

impl ByteSource for Reader<'_> {
    fn has(&mut self, n: usize) -> Result<bool, BufferError> {
        Ok(self.size() >= n)
    }

    #[inline]
    fn array<const N: usize>(&mut self) -> Result<[u8; N], BufferError> {
        self.assert_size(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(&self.uint8[self.x..self.x + N]);
        self.x += N;
        Ok(out)
    }

    fn skip(&mut self, n: usize) -> Result<(), BufferError> {
        self.assert_size(n)?;
        self.x += n;
        Ok(())
    }

    fn position(&self) -> usize {
        self.x
    }
}
