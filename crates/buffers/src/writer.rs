//! Auto-growing binary buffer writer.

/// Writes binary data into a growing byte vector.
///
/// # Example
///
/// ```
/// use pot_buffers::Writer;
///
/// let mut writer = Writer::new();
/// writer.u16_le(0x0302);
/// writer.buf(&[0xFF, 0xFF]);
/// assert_eq!(writer.flush(), vec![0x02, 0x03, 0xFF, 0xFF]);
/// ```
#[derive(Debug, Default, Clone)]
pub struct Writer {
    /// Bytes written so far.
    pub uint8: Vec<u8>,
}

impl Writer {
    /// Creates an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bytes written.
    pub fn len(&self) -> usize {
        self.uint8.len()
    }

    /// Returns `true` when nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.uint8.is_empty()
    }

    /// Writes an unsigned 16-bit integer (big-endian).
    #[inline]
    pub fn u16(&mut self, val: u16) {
        self.uint8.extend_from_slice(&val.to_be_bytes());
    }

    /// Writes an unsigned 16-bit integer (little-endian).
    #[inline]
    pub fn u16_le(&mut self, val: u16) {
        self.uint8.extend_from_slice(&val.to_le_bytes());
    }

    /// Writes raw bytes.
    pub fn buf(&mut self, data: &[u8]) {
        self.uint8.extend_from_slice(data);
    }

    /// Takes the written bytes, leaving the writer empty.
    pub fn flush(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.uint8)
    }
}
