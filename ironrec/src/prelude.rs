//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and traits.
//!
//! ```ignore
//! use ironrec::prelude::*;
//! ```

// Runtime types
pub use ironrec_core::{
    ByteOrder, SequenceLen, WireDecode, WireEncode, WireReader, WireWriter, decode_from_slice,
    encode_to_vec,
};
pub use ironrec_core::{Error as WireError, Result as WireResult};

// Schema types
pub use ironrec_schema::{FieldKind, Schema, SchemaIr, parse_schema};

// Codegen types
pub use ironrec_codegen::{CodegenError, Generator, GeneratorConfig};
