//! Encoder side of the wire format.
//!
//! This module provides the [`WireWriter`] byte sink and the [`WireEncode`]
//! trait implemented by primitives and by every generated record.

use crate::error::{Error, Result};
use crate::types::ByteOrder;
use bytes::{BufMut, Bytes, BytesMut};

/// Default initial capacity of a [`WireWriter`] in bytes.
pub const DEFAULT_WRITER_CAPACITY: usize = 256;

/// Growable byte sink that writes primitives in a fixed byte order.
///
/// Fields are appended back to back with no padding and no type tags; the
/// reader must know the record layout to make sense of the stream.
///
/// # Example
/// ```
/// use ironrec_core::{ByteOrder, WireWriter};
///
/// let mut writer = WireWriter::new(ByteOrder::BigEndian);
/// writer.put_u32(3);
/// writer.put_raw(b"ab");
/// assert_eq!(writer.as_slice(), &[0, 0, 0, 3, b'a', b'b']);
/// ```
#[derive(Debug, Clone)]
pub struct WireWriter {
    buffer: BytesMut,
    order: ByteOrder,
}

impl WireWriter {
    /// Creates an empty writer using the given byte order.
    #[must_use]
    pub fn new(order: ByteOrder) -> Self {
        Self::with_capacity(order, DEFAULT_WRITER_CAPACITY)
    }

    /// Creates an empty writer with a preallocated capacity.
    ///
    /// # Arguments
    /// * `order` - Byte order for multi-byte primitives
    /// * `capacity` - Initial buffer capacity in bytes
    #[must_use]
    pub fn with_capacity(order: ByteOrder, capacity: usize) -> Self {
        Self {
            buffer: BytesMut::with_capacity(capacity),
            order,
        }
    }

    /// Returns the byte order used by this writer.
    #[must_use]
    pub const fn byte_order(&self) -> ByteOrder {
        self.order
    }

    /// Returns the number of bytes written so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns true if nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Returns the bytes written so far.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.buffer
    }

    /// Consumes the writer and returns the encoded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Bytes {
        self.buffer.freeze()
    }

    /// Consumes the writer and returns the encoded bytes as a vector.
    #[must_use]
    pub fn into_vec(self) -> Vec<u8> {
        self.buffer.to_vec()
    }

    /// Writes a u8.
    #[inline]
    pub fn put_u8(&mut self, value: u8) {
        self.buffer.put_u8(value);
    }

    /// Writes an i8.
    #[inline]
    pub fn put_i8(&mut self, value: i8) {
        self.buffer.put_i8(value);
    }

    /// Writes a u16 in the writer's byte order.
    #[inline]
    pub fn put_u16(&mut self, value: u16) {
        match self.order {
            ByteOrder::BigEndian => self.buffer.put_u16(value),
            ByteOrder::LittleEndian => self.buffer.put_u16_le(value),
        }
    }

    /// Writes an i16 in the writer's byte order.
    #[inline]
    pub fn put_i16(&mut self, value: i16) {
        match self.order {
            ByteOrder::BigEndian => self.buffer.put_i16(value),
            ByteOrder::LittleEndian => self.buffer.put_i16_le(value),
        }
    }

    /// Writes a u32 in the writer's byte order.
    #[inline]
    pub fn put_u32(&mut self, value: u32) {
        match self.order {
            ByteOrder::BigEndian => self.buffer.put_u32(value),
            ByteOrder::LittleEndian => self.buffer.put_u32_le(value),
        }
    }

    /// Writes an i32 in the writer's byte order.
    #[inline]
    pub fn put_i32(&mut self, value: i32) {
        match self.order {
            ByteOrder::BigEndian => self.buffer.put_i32(value),
            ByteOrder::LittleEndian => self.buffer.put_i32_le(value),
        }
    }

    /// Writes a u64 in the writer's byte order.
    #[inline]
    pub fn put_u64(&mut self, value: u64) {
        match self.order {
            ByteOrder::BigEndian => self.buffer.put_u64(value),
            ByteOrder::LittleEndian => self.buffer.put_u64_le(value),
        }
    }

    /// Writes an i64 in the writer's byte order.
    #[inline]
    pub fn put_i64(&mut self, value: i64) {
        match self.order {
            ByteOrder::BigEndian => self.buffer.put_i64(value),
            ByteOrder::LittleEndian => self.buffer.put_i64_le(value),
        }
    }

    /// Writes an f32 as its IEEE-754 bit pattern.
    #[inline]
    pub fn put_f32(&mut self, value: f32) {
        self.put_u32(value.to_bits());
    }

    /// Writes an f64 as its IEEE-754 bit pattern.
    #[inline]
    pub fn put_f64(&mut self, value: f64) {
        self.put_u64(value.to_bits());
    }

    /// Writes a fixed-length byte block verbatim, without a length.
    #[inline]
    pub fn put_raw(&mut self, src: &[u8]) {
        self.buffer.put_slice(src);
    }

    /// Writes the 32-bit length prefix of a self-describing sequence.
    ///
    /// # Errors
    /// Returns [`Error::LengthOverflow`] if `len` does not fit in a `u32`.
    pub fn put_len(&mut self, len: usize) -> Result<()> {
        let prefix = u32::try_from(len).map_err(|_| Error::LengthOverflow { len })?;
        self.put_u32(prefix);
        Ok(())
    }
}

/// Trait for values that can be written to a [`WireWriter`].
///
/// Generated records implement this by encoding their fields in declared
/// order. Types used as opaque fields in a schema must implement it too.
pub trait WireEncode {
    /// Appends the wire representation of `self` to `writer`.
    ///
    /// # Errors
    /// Returns an error if a sequence length cannot be represented.
    fn encode(&self, writer: &mut WireWriter) -> Result<()>;
}

/// Encodes a value into a freshly allocated byte vector.
///
/// # Errors
/// Propagates any error returned by the value's [`WireEncode`] impl.
pub fn encode_to_vec<T: WireEncode + ?Sized>(value: &T, order: ByteOrder) -> Result<Vec<u8>> {
    let mut writer = WireWriter::new(order);
    value.encode(&mut writer)?;
    Ok(writer.into_vec())
}
