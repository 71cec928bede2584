//! Buffer bounds checks shared by the codec implementations.

use crate::error::{DecodeError, EncodeError};
use bytes::{Buf, BufMut};

/// Fails unless `buf` holds at least `len` more bytes.
#[inline]
pub fn at_least(buf: &impl Buf, len: usize) -> Result<(), DecodeError> {
    if buf.remaining() < len {
        return Err(DecodeError::InputTooSmall);
    }
    Ok(())
}

/// Fails unless `buf` has room for `len` more bytes.
#[inline]
pub fn room_for(buf: &impl BufMut, len: usize) -> Result<(), EncodeError> {
    if buf.remaining_mut() < len {
        return Err(EncodeError::BufferTooSmall);
    }
    Ok(())
}

/// Reads a single tag or flag byte.
#[inline]
pub fn read_byte(buf: &mut impl Buf) -> Result<u8, DecodeError> {
    at_least(buf, 1)?;
    Ok(buf.get_u8())
}

/// Writes a single tag or flag byte.
#[inline]
pub fn write_byte(buf: &mut impl BufMut, byte: u8) -> Result<(), EncodeError> {
    room_for(buf, 1)?;
    buf.put_u8(byte);
    Ok(())
}
