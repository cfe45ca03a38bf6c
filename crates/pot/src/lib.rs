//! Decoder for CASIA online handwriting `.pot` files.
//!
//! A `.pot` file is a flat sequence of records, one per handwritten
//! character sample. Each record carries a GB2312 class label and a list of
//! pen strokes, each a list of points, delimited by in-band sentinels.
//!
//! # Overview
//!
//! - [`RecordDecoder`] - Decodes one record from a byte cursor
//! - [`StreamDecoder`] - Decodes a whole source, skipping records with bad labels
//! - [`decode_parallel`] - Decodes an in-memory stream on the rayon pool
//! - [`Dataset`] - Samples bucketed by class label
//! - [`text`] / [`ClassStore`] - One delimited text file per class, for partial reloads
//!
//! # Example
//!
//! ```
//! use casia_pot::{Dataset, StreamDecoder};
//!
//! let bytes = [
//!     0x0C, 0x00, 0x00, 0x41, 0x00, 0x00, 0x01, 0x00,
//!     0x0A, 0x00, 0x14, 0x00,
//!     0xFF, 0xFF, 0x00, 0x00,
//!     0xFF, 0xFF, 0xFF, 0xFF,
//! ];
//! let decoded = StreamDecoder::new().decode_slice(&bytes);
//! assert_eq!(decoded.samples[0].label_text, 'A');
//!
//! let dataset = Dataset::from_samples(decoded);
//! assert_eq!(casia_pot::text::encode_class(0x41, dataset.get(0x41).unwrap()), "0x41$#!0,0");
//! ```

pub mod config;
pub mod dataset;
pub mod encode;
pub mod error;
pub mod label;
pub mod normalize;
pub mod parallel;
pub mod record;
pub mod sample;
pub mod store;
pub mod stream;
pub mod text;

pub use config::Config;
pub use dataset::{Dataset, StrokeSet};
pub use error::{ConfigError, EncodeError, LabelError, StoreError, StreamError, TextError};
pub use parallel::decode_parallel;
pub use record::{RecordDecoder, RecordOutcome, SkippedRecord};
pub use sample::{Point, Sample, Stroke};
pub use store::{ClassStore, WriteMode};
pub use stream::{Decoded, StreamDecoder};
