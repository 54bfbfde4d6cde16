//! Primitive wire types.
//!
//! This module maps the fixed-width primitives of the schema language onto
//! Rust types, implements [`WireEncode`]/[`WireDecode`] for them, and defines
//! [`SequenceLen`], the conversion used by generated `allocate_*` routines to
//! turn a count field into a sequence length.

use crate::decoder::{WireDecode, WireReader};
use crate::encoder::{WireEncode, WireWriter};
use crate::error::Result;

/// Byte order for multi-byte primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ByteOrder {
    /// Big-endian (network) byte order, the default stream order.
    #[default]
    BigEndian,
    /// Little-endian byte order.
    LittleEndian,
}

impl ByteOrder {
    /// Parses byte order from a string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "bigendian" | "big-endian" | "be" => Some(Self::BigEndian),
            "littleendian" | "little-endian" | "le" => Some(Self::LittleEndian),
            _ => None,
        }
    }

    /// Returns the Rust path of this variant, as used in generated code.
    #[must_use]
    pub const fn variant_name(&self) -> &'static str {
        match self {
            Self::BigEndian => "BigEndian",
            Self::LittleEndian => "LittleEndian",
        }
    }
}

macro_rules! impl_wire_primitive {
    ($($ty:ty => $put:ident, $get:ident;)*) => {
        $(
            impl WireEncode for $ty {
                #[inline]
                fn encode(&self, writer: &mut WireWriter) -> Result<()> {
                    writer.$put(*self);
                    Ok(())
                }
            }

            impl WireDecode for $ty {
                const MIN_WIRE_SIZE: usize = std::mem::size_of::<$ty>();

                #[inline]
                fn decode_from(&mut self, reader: &mut WireReader<'_>) -> Result<()> {
                    *self = reader.$get()?;
                    Ok(())
                }
            }
        )*
    };
}

impl_wire_primitive! {
    u8 => put_u8, get_u8;
    i8 => put_i8, get_i8;
    u16 => put_u16, get_u16;
    i16 => put_i16, get_i16;
    u32 => put_u32, get_u32;
    i32 => put_i32, get_i32;
    u64 => put_u64, get_u64;
    i64 => put_i64, get_i64;
    f32 => put_f32, get_f32;
    f64 => put_f64, get_f64;
}

/// Converts the value of a count field into a sequence length.
///
/// Negative counts map to zero; counts larger than `usize::MAX` saturate.
pub trait SequenceLen {
    /// Returns the sequence length this count stands for.
    fn sequence_len(&self) -> usize;
}

macro_rules! impl_sequence_len_unsigned {
    ($($ty:ty),*) => {
        $(
            impl SequenceLen for $ty {
                #[inline]
                fn sequence_len(&self) -> usize {
                    usize::try_from(*self).unwrap_or(usize::MAX)
                }
            }
        )*
    };
}

macro_rules! impl_sequence_len_signed {
    ($($ty:ty),*) => {
        $(
            impl SequenceLen for $ty {
                #[inline]
                fn sequence_len(&self) -> usize {
                    if *self < 0 {
                        0
                    } else {
                        usize::try_from(*self).unwrap_or(usize::MAX)
                    }
                }
            }
        )*
    };
}

impl_sequence_len_unsigned!(u8, u16, u32, u64);
impl_sequence_len_signed!(i8, i16, i32, i64);
