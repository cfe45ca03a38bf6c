//! Byte buffer utilities for the `.pot` stream decoder.
//!
//! # Overview
//!
//! - [`Reader`] - Reads binary data from a byte slice with cursor tracking
//! - [`IoReader`] - Reads binary data from any [`std::io::Read`] through an internal buffer
//! - [`ByteSource`] - The cursor interface both readers implement
//! - [`Writer`] - Writes binary data to an auto-growing buffer
//!
//! # Example
//!
//! ```
//! use pot_buffers::{ByteSource, Reader, Writer};
//!
//! let mut writer = Writer::new();
//! writer.u16_le(0x0203);
//! writer.u16(0x0405);
//! let data = writer.flush();
//!
//! let mut reader = Reader::new(&data);
//! assert_eq!(reader.u16_le().unwrap(), 0x0203);
//! assert_eq!(reader.array::<2>().unwrap(), [0x04, 0x05]);
//! assert!(!reader.has(1).unwrap());
//! ```

mod io_reader;
mod print_octets;
mod reader;
mod source;
mod writer;

pub use io_reader::IoReader;
pub use print_octets::print_octets;
pub use reader::Reader;
pub use source::ByteSource;
pub use writer::Writer;

use thiserror::Error;

/// Error type for buffer operations.
#[derive(Debug, Error)]
pub enum BufferError {
    /// Attempted to read past the end of the buffer.
    #[error("end of buffer")]
    EndOfBuffer,
    /// The underlying reader failed.
    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),
}

impl BufferError {
    /// Returns `true` when the error only signals that the input ran out.
    pub fn is_end(&self) -> bool {
        matches!(self, BufferError::EndOfBuffer)
    }
}
