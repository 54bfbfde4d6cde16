//! # IronRec
//!
//! Schema-driven record types and binary wire codecs for Rust.
//!
//! IronRec compiles a declarative record schema into plain Rust structs plus
//! paired encode/decode routines that write fields back to back in declared
//! order.
//!
//! ## Features
//!
//! - **Deterministic layout** - fields keep schema order; fixed-layout records are byte-tight
//! - **Count fields** - a sequence following an integer field is sized by it
//! - **Self-describing sequences** - other sequences carry a 32-bit length prefix
//! - **Build script integration** - generate code into `OUT_DIR` and `include!` it
//!
//! ## Quick Start
//!
//! ```ignore
//! // build.rs
//! ironrec::codegen::generate_to_file(
//!     Path::new("schema.json"),
//!     &out_dir.join("records.rs"),
//!     ironrec::codegen::GeneratorConfig::new().runtime_path("ironrec::core"),
//! )?;
//!
//! // lib.rs
//! include!(concat!(env!("OUT_DIR"), "/records.rs"));
//! use ironrec::prelude::*;
//!
//! let bytes = encode_to_vec(&frame, generated_structs::BYTE_ORDER)?;
//! ```
//!
//! ## Crate Organization
//!
//! - [`core`] - Wire runtime used by generated code
//! - [`schema`] - Schema parsing, classification and validation
//! - [`codegen`] - Rust code generation from schemas

pub mod prelude;

/// Wire runtime used by generated code.
pub mod core {
    pub use ironrec_core::*;
}

/// Schema parsing, classification and validation.
pub mod schema {
    pub use ironrec_schema::*;
}

/// Code generation from record schemas.
pub mod codegen {
    pub use ironrec_codegen::*;
}

// Re-export commonly used items at the crate root
pub use ironrec_codegen::{Generator, GeneratorConfig, generate_from_json};
pub use ironrec_core::{ByteOrder, WireDecode, WireEncode, WireReader, WireWriter};
