//! Rust code generation modules.

pub mod codecs;
pub mod records;

pub use codecs::CodecGenerator;
pub use records::RecordGenerator;
