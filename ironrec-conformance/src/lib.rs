//! # IronRec Conformance
//!
//! Code generated at build time from the schemas in `schemas/`, compiled
//! against the runtime crate and exercised by the tests and benches of this
//! package.
//!
//! - [`frames`] - counted and self-describing sequences, byte blocks, packed records
//! - [`nested`] - three levels of embedded records, little-endian
//! - [`generated_structs`] - the older document shape with an opaque type

use ironrec_core::{Result, WireDecode, WireEncode, WireReader, WireWriter};

include!(concat!(env!("OUT_DIR"), "/frames.rs"));
include!(concat!(env!("OUT_DIR"), "/nested.rs"));
include!(concat!(env!("OUT_DIR"), "/legacy.rs"));

/// Point in time used as an opaque field type by the legacy schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Timestamp {
    /// Seconds since the Unix epoch.
    pub secs: i64,
    /// Sub-second nanoseconds.
    pub nanos: u32,
}

impl Timestamp {
    /// Creates a timestamp.
    #[must_use]
    pub const fn new(secs: i64, nanos: u32) -> Self {
        Self { secs, nanos }
    }
}

impl WireEncode for Timestamp {
    fn encode(&self, writer: &mut WireWriter) -> Result<()> {
        writer.put_i64(self.secs);
        writer.put_u32(self.nanos);
        Ok(())
    }
}

impl WireDecode for Timestamp {
    const MIN_WIRE_SIZE: usize = 12;

    fn decode_from(&mut self, reader: &mut WireReader<'_>) -> Result<()> {
        self.secs = reader.get_i64()?;
        self.nanos = reader.get_u32()?;
        Ok(())
    }
}
