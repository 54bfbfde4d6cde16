//! # IronRec Core
//!
//! Runtime support for code generated by `ironrec-codegen`.
//!
//! This crate provides:
//! - [`WireWriter`] and [`WireReader`] for byte-order aware primitive I/O
//! - [`WireEncode`] and [`WireDecode`], implemented by every generated record
//! - [`SequenceLen`] for turning count fields into sequence lengths
//! - Error types for encoding/decoding operations
//!
//! The wire format carries no type tags and no padding: fields follow each
//! other in declared order, and the reader must be generated from the same
//! schema as the writer.

pub mod decoder;
pub mod encoder;
pub mod error;
pub mod types;

pub use decoder::{DEFAULT_MAX_SEQUENCE_LEN, WireDecode, WireReader, decode_from_slice};
pub use encoder::{WireEncode, WireWriter, encode_to_vec};
pub use error::{Error, Result};
pub use types::{ByteOrder, SequenceLen};
