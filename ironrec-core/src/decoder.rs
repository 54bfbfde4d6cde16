//! Decoder side of the wire format.
//!
//! This module provides the [`WireReader`] cursor and the [`WireDecode`]
//! trait implemented by primitives and by every generated record.

use crate::error::{Error, Result};
use crate::types::ByteOrder;

/// Default upper bound on the element count of a decoded sequence.
pub const DEFAULT_MAX_SEQUENCE_LEN: usize = 16 * 1024 * 1024;

/// Cursor over an encoded byte slice.
///
/// Every read checks the remaining input and fails with
/// [`Error::BufferTooShort`] instead of panicking.
#[derive(Debug, Clone)]
pub struct WireReader<'a> {
    buffer: &'a [u8],
    position: usize,
    order: ByteOrder,
    max_sequence_len: usize,
}

impl<'a> WireReader<'a> {
    /// Wraps a byte slice for decoding.
    ///
    /// # Arguments
    /// * `buffer` - Encoded bytes
    /// * `order` - Byte order the bytes were written with
    #[must_use]
    pub fn new(buffer: &'a [u8], order: ByteOrder) -> Self {
        Self {
            buffer,
            position: 0,
            order,
            max_sequence_len: DEFAULT_MAX_SEQUENCE_LEN,
        }
    }

    /// Sets the largest sequence length this reader accepts.
    #[must_use]
    pub fn with_max_sequence_len(mut self, limit: usize) -> Self {
        self.max_sequence_len = limit;
        self
    }

    /// Returns the byte order used by this reader.
    #[must_use]
    pub const fn byte_order(&self) -> ByteOrder {
        self.order
    }

    /// Returns the current read position.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Returns the number of unread bytes.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.position
    }

    /// Returns true if all input has been consumed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut bytes = [0u8; N];
        self.get_raw(&mut bytes)?;
        Ok(bytes)
    }

    /// Reads a u8.
    ///
    /// # Errors
    /// Returns [`Error::BufferTooShort`] at end of input.
    #[inline]
    pub fn get_u8(&mut self) -> Result<u8> {
        Ok(self.take::<1>()?[0])
    }

    /// Reads an i8.
    ///
    /// # Errors
    /// Returns [`Error::BufferTooShort`] at end of input.
    #[inline]
    pub fn get_i8(&mut self) -> Result<i8> {
        Ok(i8::from_ne_bytes(self.take::<1>()?))
    }

    /// Reads a u16 in the reader's byte order.
    ///
    /// # Errors
    /// Returns [`Error::BufferTooShort`] if fewer than 2 bytes remain.
    #[inline]
    pub fn get_u16(&mut self) -> Result<u16> {
        let bytes = self.take::<2>()?;
        Ok(match self.order {
            ByteOrder::BigEndian => u16::from_be_bytes(bytes),
            ByteOrder::LittleEndian => u16::from_le_bytes(bytes),
        })
    }

    /// Reads an i16 in the reader's byte order.
    ///
    /// # Errors
    /// Returns [`Error::BufferTooShort`] if fewer than 2 bytes remain.
    #[inline]
    pub fn get_i16(&mut self) -> Result<i16> {
        let bytes = self.take::<2>()?;
        Ok(match self.order {
            ByteOrder::BigEndian => i16::from_be_bytes(bytes),
            ByteOrder::LittleEndian => i16::from_le_bytes(bytes),
        })
    }

    /// Reads a u32 in the reader's byte order.
    ///
    /// # Errors
    /// Returns [`Error::BufferTooShort`] if fewer than 4 bytes remain.
    #[inline]
    pub fn get_u32(&mut self) -> Result<u32> {
        let bytes = self.take::<4>()?;
        Ok(match self.order {
            ByteOrder::BigEndian => u32::from_be_bytes(bytes),
            ByteOrder::LittleEndian => u32::from_le_bytes(bytes),
        })
    }

    /// Reads an i32 in the reader's byte order.
    ///
    /// # Errors
    /// Returns [`Error::BufferTooShort`] if fewer than 4 bytes remain.
    #[inline]
    pub fn get_i32(&mut self) -> Result<i32> {
        let bytes = self.take::<4>()?;
        Ok(match self.order {
            ByteOrder::BigEndian => i32::from_be_bytes(bytes),
            ByteOrder::LittleEndian => i32::from_le_bytes(bytes),
        })
    }

    /// Reads a u64 in the reader's byte order.
    ///
    /// # Errors
    /// Returns [`Error::BufferTooShort`] if fewer than 8 bytes remain.
    #[inline]
    pub fn get_u64(&mut self) -> Result<u64> {
        let bytes = self.take::<8>()?;
        Ok(match self.order {
            ByteOrder::BigEndian => u64::from_be_bytes(bytes),
            ByteOrder::LittleEndian => u64::from_le_bytes(bytes),
        })
    }

    /// Reads an i64 in the reader's byte order.
    ///
    /// # Errors
    /// Returns [`Error::BufferTooShort`] if fewer than 8 bytes remain.
    #[inline]
    pub fn get_i64(&mut self) -> Result<i64> {
        let bytes = self.take::<8>()?;
        Ok(match self.order {
            ByteOrder::BigEndian => i64::from_be_bytes(bytes),
            ByteOrder::LittleEndian => i64::from_le_bytes(bytes),
        })
    }

    /// Reads an f32 from its IEEE-754 bit pattern.
    ///
    /// # Errors
    /// Returns [`Error::BufferTooShort`] if fewer than 4 bytes remain.
    #[inline]
    pub fn get_f32(&mut self) -> Result<f32> {
        self.get_u32().map(f32::from_bits)
    }

    /// Reads an f64 from its IEEE-754 bit pattern.
    ///
    /// # Errors
    /// Returns [`Error::BufferTooShort`] if fewer than 8 bytes remain.
    #[inline]
    pub fn get_f64(&mut self) -> Result<f64> {
        self.get_u64().map(f64::from_bits)
    }

    /// Fills `dst` with exactly `dst.len()` bytes from the input.
    ///
    /// # Errors
    /// Returns [`Error::BufferTooShort`] if not enough bytes remain; the
    /// position is left unchanged in that case.
    pub fn get_raw(&mut self, dst: &mut [u8]) -> Result<()> {
        let available = self.remaining();
        if dst.len() > available {
            return Err(Error::BufferTooShort {
                required: dst.len(),
                available,
            });
        }
        let end = self.position + dst.len();
        dst.copy_from_slice(&self.buffer[self.position..end]);
        self.position = end;
        Ok(())
    }

    /// Reads the 32-bit length prefix of a self-describing sequence.
    ///
    /// # Errors
    /// Returns [`Error::BufferTooShort`] at end of input or
    /// [`Error::SequenceTooLong`] if the prefix exceeds the reader's limit.
    pub fn get_len(&mut self) -> Result<usize> {
        let prefix = self.get_u32()?;
        let len = usize::try_from(prefix).unwrap_or(usize::MAX);
        self.check_sequence_len(len)
    }

    /// Validates a sequence length before the sequence is resized.
    ///
    /// # Errors
    /// Returns [`Error::SequenceTooLong`] if `len` exceeds the limit.
    pub fn check_sequence_len(&self, len: usize) -> Result<usize> {
        if len > self.max_sequence_len {
            return Err(Error::SequenceTooLong {
                len,
                limit: self.max_sequence_len,
            });
        }
        Ok(len)
    }

    /// Validates the length of a sequence of `T` against both the reader's
    /// limit and the input that is left.
    ///
    /// Every element needs at least `T::MIN_WIRE_SIZE` bytes, so a length the
    /// remaining input cannot hold is rejected before anything is allocated.
    ///
    /// # Errors
    /// Returns [`Error::SequenceTooLong`] if `len` exceeds the limit, or
    /// [`Error::BufferTooShort`] if the remaining input is too small.
    pub fn check_sequence<T: WireDecode>(&self, len: usize) -> Result<usize> {
        self.check_sequence_len(len)?;
        let required = len.saturating_mul(T::MIN_WIRE_SIZE);
        let available = self.remaining();
        if required > available {
            return Err(Error::BufferTooShort {
                required,
                available,
            });
        }
        Ok(len)
    }
}

/// Trait for values that can be read back from a [`WireReader`].
///
/// Decoding happens in place: the target is usually a freshly
/// default-initialized value whose fields are overwritten in declared order.
pub trait WireDecode {
    /// Smallest number of bytes one encoded value occupies.
    ///
    /// Zero means no lower bound is known.
    const MIN_WIRE_SIZE: usize = 0;

    /// Overwrites `self` with the value read from `reader`.
    ///
    /// # Errors
    /// Returns an error if the input is truncated or a sequence length is
    /// rejected by the reader.
    fn decode_from(&mut self, reader: &mut WireReader<'_>) -> Result<()>;

    /// Decodes a new value, starting from its default.
    ///
    /// # Errors
    /// Propagates any error returned by [`WireDecode::decode_from`].
    fn decode(reader: &mut WireReader<'_>) -> Result<Self>
    where
        Self: Sized + Default,
    {
        let mut value = Self::default();
        value.decode_from(reader)?;
        Ok(value)
    }
}

/// Decodes a value from a complete byte slice.
///
/// # Errors
/// Returns a decode error, or [`Error::TrailingBytes`] if input remains after
/// the value.
pub fn decode_from_slice<T: WireDecode + Default>(bytes: &[u8], order: ByteOrder) -> Result<T> {
    let mut reader = WireReader::new(bytes, order);
    let value = T::decode(&mut reader)?;
    if !reader.is_empty() {
        return Err(Error::TrailingBytes {
            remaining: reader.remaining(),
        });
    }
    Ok(value)
}
