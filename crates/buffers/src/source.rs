//! Cursor interface shared by the slice and I/O readers.

use crate::BufferError;

/// A forward-only byte cursor.
///
/// Decoders are written against this trait so the same framing logic runs
/// over an in-memory slice ([`Reader`](crate::Reader)) or a file
/// ([`IoReader`](crate::IoReader)).
pub trait ByteSource {
    /// Returns whether at least `n` more bytes can be read, without consuming them.
    fn has(&mut self, n: usize) -> Result<bool, BufferError>;

    /// Reads exactly `N` bytes and advances the cursor.
    fn array<const N: usize>(&mut self) -> Result<[u8; N], BufferError>;

    /// Advances the cursor by `n` bytes.
    fn skip(&mut self, n: usize) -> Result<(), BufferError>;

    /// Absolute number of bytes consumed so far.
    fn position(&self) -> usize;

    /// Reads an unsigned 16-bit integer (little-endian).
    #[inline]
    fn u16_le(&mut self) -> Result<u16, BufferError> {
        self.array::<2>().map(u16::from_le_bytes)
    }
}
