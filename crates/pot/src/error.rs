//! Error types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::stream::Decoded;

/// A label code that does not name a GB2312 character.
///
/// This is the only per-record failure; the stream decoder recovers from it
/// by skipping the record.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LabelError {
    #[error("label {0:#06x} is not a GB2312 code point")]
    InvalidCodePoint(u16),
}

/// Fatal failure of the byte source during a stream decode.
///
/// Carries every sample decoded before the failure.
#[derive(Debug, Error)]
#[error("read failed at byte {position} after {} samples: {source}", .decoded.samples.len())]
pub struct StreamError {
    pub decoded: Decoded,
    pub position: usize,
    pub source: io::Error,
}

/// Failure writing a record in the wire format.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
    #[error("label {0:#06x} cannot survive byte-order repair")]
    UnrepresentableLabel(u16),
    #[error("point ({x}, {y}) collides with a terminator sentinel")]
    SentinelPoint { x: u16, y: u16 },
    #[error("record of {0} bytes exceeds the 16-bit size field")]
    RecordTooLarge(usize),
}

/// Failure parsing a class text document.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TextError {
    #[error("invalid class label `{0}`")]
    InvalidLabel(String),
    #[error("unexpected text before the first `{delimiter}` at byte {offset}")]
    StrayText { offset: usize, delimiter: char },
    #[error("malformed point `{text}` at byte {offset}")]
    MalformedPoint { offset: usize, text: String },
}

/// Failure reading or writing a class-file directory.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("{}: {source}", .path.display())]
    Text { path: PathBuf, source: TextError },
    #[error("{}: file name is not a class label", .0.display())]
    InvalidFileName(PathBuf),
    #[error("{}: file holds class {found:#x}, expected {expected:#x}", .path.display())]
    LabelMismatch {
        path: PathBuf,
        expected: u16,
        found: u16,
    },
}

/// Failure loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}
