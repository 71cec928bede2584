//! Codec implementations for Rust primitive types.
//!
//! # Fixed-width scalars
//!
//! Integers and floats are written as their little-endian byte pattern (two's complement for
//! signed integers, IEEE 754 bits for floats) regardless of the host's byte order. Booleans take
//! one byte that must be 0 or 1. `()` takes no bytes.
//!
//! Half-precision floats have no stable Rust type; [F16] carries their bit pattern.
//!
//! # Runs
//!
//! Sequences and arrays of scalars skip per-element recursion. On little-endian hosts the whole
//! run is moved with one copy, since the in-memory representation already is the wire format.
//! Big-endian hosts convert element by element. Boolean runs are copied in bulk too, but every
//! decoded byte is still validated.

use crate::{
    util::{at_least, read_byte, room_for, write_byte},
    DecodeError, Decoder, EncodeError, EncodeSize, Encoder, Read, Schema, Shape, Write,
};
use bytes::{Buf, BufMut};
use paste::paste;

/// Scalars whose in-memory representation on a little-endian host is their wire encoding.
///
/// # Safety
///
/// Implementors must have no padding bytes and must accept every bit pattern.
unsafe trait Plain: Copy + Default {}

fn as_bytes<T: Plain>(items: &[T]) -> &[u8] {
    // SAFETY: `Plain` types have no padding, so every byte in the slice is initialized.
    unsafe { core::slice::from_raw_parts(items.as_ptr().cast(), core::mem::size_of_val(items)) }
}

fn as_bytes_mut<T: Plain>(items: &mut [T]) -> &mut [u8] {
    // SAFETY: `Plain` types have no padding and accept every bit pattern.
    unsafe {
        core::slice::from_raw_parts_mut(items.as_mut_ptr().cast(), core::mem::size_of_val(items))
    }
}

/// Whether the host's in-memory layout of [Plain] scalars already is the wire format.
const BULK: bool = cfg!(target_endian = "little");

/// Writes a run of scalars, either as one copy (`bulk`) or one `put` per element.
///
/// `bulk` is only correct on little-endian hosts.
fn write_plain<T: Plain, B: BufMut>(
    items: &[T],
    buf: &mut B,
    put: impl Fn(&mut B, T),
    bulk: bool,
) -> Result<(), EncodeError> {
    room_for(buf, core::mem::size_of_val(items))?;
    if bulk {
        buf.put_slice(as_bytes(items));
    } else {
        items.iter().for_each(|item| put(buf, *item));
    }
    Ok(())
}

/// Reads a run of `len` scalars, mirroring [write_plain].
fn read_plain<T: Plain, B: Buf>(
    buf: &mut B,
    len: usize,
    get: impl Fn(&mut B) -> T,
    bulk: bool,
) -> Result<Vec<T>, DecodeError> {
    // A run too long to address cannot be backed by the input either.
    let bytes = len
        .checked_mul(core::mem::size_of::<T>())
        .ok_or(DecodeError::InputTooSmall)?;
    at_least(buf, bytes)?;
    if bulk {
        let mut items = vec![T::default(); len];
        buf.copy_to_slice(as_bytes_mut(&mut items));
        Ok(items)
    } else {
        Ok((0..len).map(|_| get(buf)).collect())
    }
}

// Numeric types implementation
macro_rules! impl_numeric {
    ($type:ty, $get:ident, $put:ident, $shape:expr) => {
        impl Schema for $type {
            #[inline]
            fn shape() -> Shape {
                $shape
            }
        }

        impl EncodeSize for $type {
            #[inline]
            fn encode_size(&self, _: &mut Encoder) -> Result<usize, EncodeError> {
                Ok(core::mem::size_of::<$type>())
            }

            fn encode_size_run(items: &[Self], enc: &mut Encoder) -> Result<usize, EncodeError> {
                if items.is_empty() {
                    return Ok(0);
                }
                enc.check_descend()?;
                items
                    .len()
                    .checked_mul(core::mem::size_of::<$type>())
                    .ok_or(EncodeError::SizeOverflow)
            }
        }

        impl Write for $type {
            #[inline]
            fn write(&self, buf: &mut impl BufMut, _: &mut Encoder) -> Result<(), EncodeError> {
                room_for(buf, core::mem::size_of::<$type>())?;
                buf.$put(*self);
                Ok(())
            }

            fn write_run(
                items: &[Self],
                buf: &mut impl BufMut,
                enc: &mut Encoder,
            ) -> Result<(), EncodeError> {
                if items.is_empty() {
                    return Ok(());
                }
                enc.check_descend()?;
                write_plain(items, buf, |buf, item| buf.$put(item), BULK)
            }
        }

        impl Read for $type {
            #[inline]
            fn read(buf: &mut impl Buf, _: &mut Decoder<'_>) -> Result<Self, DecodeError> {
                at_least(buf, core::mem::size_of::<$type>())?;
                Ok(buf.$get())
            }

            fn read_run(
                buf: &mut impl Buf,
                len: usize,
                dec: &mut Decoder<'_>,
            ) -> Result<Vec<Self>, DecodeError> {
                if len == 0 {
                    return Ok(Vec::new());
                }
                dec.check_descend()?;
                read_plain(buf, len, |buf| buf.$get(), BULK)
            }
        }

        // SAFETY: primitive integers and floats have no padding and no invalid bit patterns.
        unsafe impl Plain for $type {}
    };
}

// Multi-byte scalars use the explicit little-endian accessors.
macro_rules! impl_little_endian {
    ($($type:ident => $shape:expr),* $(,)?) => {
        paste! {
            $( impl_numeric!($type, [<get_ $type _le>], [<put_ $type _le>], $shape); )*
        }
    };
}

impl_numeric!(u8, get_u8, put_u8, Shape::Integer { bits: 8, signed: false });
impl_numeric!(i8, get_i8, put_i8, Shape::Integer { bits: 8, signed: true });
impl_little_endian!(
    u16 => Shape::Integer { bits: 16, signed: false },
    u32 => Shape::Integer { bits: 32, signed: false },
    u64 => Shape::Integer { bits: 64, signed: false },
    u128 => Shape::Integer { bits: 128, signed: false },
    i16 => Shape::Integer { bits: 16, signed: true },
    i32 => Shape::Integer { bits: 32, signed: true },
    i64 => Shape::Integer { bits: 64, signed: true },
    i128 => Shape::Integer { bits: 128, signed: true },
    f32 => Shape::Float { bits: 32 },
    f64 => Shape::Float { bits: 64 },
);

/// A half-precision IEEE 754 float, carried as its bit pattern.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct F16(u16);

impl F16 {
    /// Wraps a raw bit pattern.
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    /// Returns the raw bit pattern.
    pub const fn to_bits(self) -> u16 {
        self.0
    }
}

impl Schema for F16 {
    fn shape() -> Shape {
        Shape::Float { bits: 16 }
    }
}

impl EncodeSize for F16 {
    #[inline]
    fn encode_size(&self, _: &mut Encoder) -> Result<usize, EncodeError> {
        Ok(2)
    }
}

impl Write for F16 {
    #[inline]
    fn write(&self, buf: &mut impl BufMut, enc: &mut Encoder) -> Result<(), EncodeError> {
        self.0.write(buf, enc)
    }
}

impl Read for F16 {
    #[inline]
    fn read(buf: &mut impl Buf, dec: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        u16::read(buf, dec).map(Self)
    }
}

// Bool implementation
impl Schema for bool {
    #[inline]
    fn shape() -> Shape {
        Shape::Bool
    }
}

impl EncodeSize for bool {
    #[inline]
    fn encode_size(&self, _: &mut Encoder) -> Result<usize, EncodeError> {
        Ok(1)
    }

    fn encode_size_run(items: &[Self], enc: &mut Encoder) -> Result<usize, EncodeError> {
        if !items.is_empty() {
            enc.check_descend()?;
        }
        Ok(items.len())
    }
}

impl Write for bool {
    #[inline]
    fn write(&self, buf: &mut impl BufMut, _: &mut Encoder) -> Result<(), EncodeError> {
        write_byte(buf, u8::from(*self))
    }

    fn write_run(
        items: &[Self],
        buf: &mut impl BufMut,
        enc: &mut Encoder,
    ) -> Result<(), EncodeError> {
        if items.is_empty() {
            return Ok(());
        }
        enc.check_descend()?;
        room_for(buf, items.len())?;
        // SAFETY: `bool` is one byte holding 0 or 1, which is exactly its encoding.
        let bytes = unsafe { core::slice::from_raw_parts(items.as_ptr().cast(), items.len()) };
        buf.put_slice(bytes);
        Ok(())
    }
}

impl Read for bool {
    #[inline]
    fn read(buf: &mut impl Buf, _: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        match read_byte(buf)? {
            0 => Ok(false),
            1 => Ok(true),
            byte => Err(DecodeError::InvalidBoolean(byte)),
        }
    }

    fn read_run(
        buf: &mut impl Buf,
        len: usize,
        dec: &mut Decoder<'_>,
    ) -> Result<Vec<Self>, DecodeError> {
        if len == 0 {
            return Ok(Vec::new());
        }
        dec.check_descend()?;
        at_least(buf, len)?;
        let mut bytes = vec![0u8; len];
        buf.copy_to_slice(&mut bytes);
        bytes
            .into_iter()
            .map(|byte| match byte {
                0 => Ok(false),
                1 => Ok(true),
                byte => Err(DecodeError::InvalidBoolean(byte)),
            })
            .collect()
    }
}

// Unit implementation
impl Schema for () {
    #[inline]
    fn shape() -> Shape {
        Shape::Unit
    }
}

// Runs of `()` occupy neither input nor memory, so they are handled in one step.
impl EncodeSize for () {
    #[inline]
    fn encode_size(&self, _: &mut Encoder) -> Result<usize, EncodeError> {
        Ok(0)
    }

    fn encode_size_run(items: &[Self], enc: &mut Encoder) -> Result<usize, EncodeError> {
        if !items.is_empty() {
            enc.check_descend()?;
        }
        Ok(0)
    }
}

impl Write for () {
    #[inline]
    fn write(&self, _: &mut impl BufMut, _: &mut Encoder) -> Result<(), EncodeError> {
        Ok(())
    }

    fn write_run(
        items: &[Self],
        _: &mut impl BufMut,
        enc: &mut Encoder,
    ) -> Result<(), EncodeError> {
        if !items.is_empty() {
            enc.check_descend()?;
        }
        Ok(())
    }
}

impl Read for () {
    #[inline]
    fn read(_: &mut impl Buf, _: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        Ok(())
    }

    fn read_run(
        _: &mut impl Buf,
        len: usize,
        dec: &mut Decoder<'_>,
    ) -> Result<Vec<Self>, DecodeError> {
        if len != 0 {
            dec.check_descend()?;
        }
        Ok(vec![(); len])
    }
}
