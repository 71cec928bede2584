//! Codec implementations for dynamic sequences.
//!
//! A sequence is a `u32` little-endian element count followed by the elements. [Terminated]
//! sequences additionally declare a terminator value that may never appear as an element; under
//! [Terminators::Trailing] the terminator is also written after the last element.

use crate::{
    codec::MAX_PREALLOCATION, config::Terminators, util::room_for, AllocError, DecodeError,
    Decoder, EncodeError, EncodeSize, Encoder, Read, Schema, Shape, Write,
};
use bytes::{Buf, BufMut};
use core::marker::PhantomData;

/// Size of the length prefix.
const PREFIX: usize = 4;

fn write_len(len: usize, buf: &mut impl BufMut) -> Result<(), EncodeError> {
    let len = u32::try_from(len).map_err(|_| EncodeError::SequenceTooLong(len))?;
    room_for(buf, PREFIX)?;
    buf.put_u32_le(len);
    Ok(())
}

fn prefixed(len: usize, payload: usize) -> Result<usize, EncodeError> {
    if u32::try_from(len).is_err() {
        return Err(EncodeError::SequenceTooLong(len));
    }
    payload.checked_add(PREFIX).ok_or(EncodeError::SizeOverflow)
}

/// Reads the length prefix, reserves storage for that many elements and reads them.
fn read_items<T: Read>(buf: &mut impl Buf, dec: &mut Decoder<'_>) -> Result<Vec<T>, DecodeError> {
    let len = u32::read(buf, dec)?;
    let len = usize::try_from(len).map_err(|_| AllocError::Overflow)?;
    // Elements that may encode to nothing but still occupy memory are not bounded by the input.
    // Cap what such a run may claim instead.
    if T::shape().min_size() == 0 {
        let size = core::mem::size_of::<T>();
        if size != 0 && len > MAX_PREALLOCATION / size {
            return Err(DecodeError::InputTooSmall);
        }
    }
    dec.reserve_array::<T>(len)?;
    T::read_run(buf, len, dec)
}

fn heap_size_of<T: Read>(items: &[T]) -> usize {
    items
        .iter()
        .fold(core::mem::size_of_val(items), |total, item| {
            total + item.heap_size()
        })
}

// Vec implementation
impl<T: Schema> Schema for Vec<T> {
    #[inline]
    fn shape() -> Shape {
        Shape::Sequence {
            element: T::shape,
            terminated: false,
        }
    }
}

impl<T: EncodeSize> EncodeSize for Vec<T> {
    #[inline]
    fn encode_size(&self, enc: &mut Encoder) -> Result<usize, EncodeError> {
        prefixed(self.len(), T::encode_size_run(self, enc)?)
    }
}

impl<T: Write> Write for Vec<T> {
    #[inline]
    fn write(&self, buf: &mut impl BufMut, enc: &mut Encoder) -> Result<(), EncodeError> {
        write_len(self.len(), buf)?;
        T::write_run(self, buf, enc)
    }
}

impl<T: Read> Read for Vec<T> {
    #[inline]
    fn read(buf: &mut impl Buf, dec: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        read_items(buf, dec)
    }

    fn heap_size(&self) -> usize {
        heap_size_of(self)
    }
}

/// Declares the value that terminates a [Terminated] sequence of `T`.
pub trait Terminator<T> {
    /// The reserved value.
    const VALUE: T;
}

/// Terminator for integer sequences: zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Zero;

macro_rules! impl_zero {
    ($($type:ty),*) => {
        $( impl Terminator<$type> for Zero { const VALUE: $type = 0; } )*
    };
}
impl_zero!(u8, u16, u32, u64, u128, i8, i16, i32, i64, i128);

/// A sequence whose elements never equal the terminator `S` declares.
///
/// # Examples
///
/// ```
/// use canon_codec::{Decode, DecodeError, Encode, Terminated};
///
/// let name = Terminated::<u8>::new(b"canon".to_vec()).unwrap();
/// let encoded = name.encode().unwrap();
/// assert_eq!(encoded, [5, 0, 0, 0, b'c', b'a', b'n', b'o', b'n']);
/// assert_eq!(Terminated::<u8>::decode(&encoded).unwrap(), name);
///
/// // The terminator is reserved.
/// assert!(Terminated::<u8>::new(vec![1, 0, 2]).is_none());
/// assert_eq!(
///     Terminated::<u8>::decode(&[3, 0, 0, 0, 1, 0, 2]),
///     Err(DecodeError::SentinelInSlice)
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Terminated<T, S = Zero> {
    items: Vec<T>,
    _terminator: PhantomData<S>,
}

impl<T: PartialEq, S: Terminator<T>> Terminated<T, S> {
    /// Wraps `items`, or returns `None` if any of them equals the terminator.
    pub fn new(items: Vec<T>) -> Option<Self> {
        if items.iter().any(|item| *item == S::VALUE) {
            return None;
        }
        Some(Self {
            items,
            _terminator: PhantomData,
        })
    }
}

impl<T, S> Terminated<T, S> {
    /// Returns the elements.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Returns the elements, giving up the guarantee that none equals the terminator.
    pub fn into_inner(self) -> Vec<T> {
        self.items
    }
}

impl<T, S> Default for Terminated<T, S> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            _terminator: PhantomData,
        }
    }
}

impl<T, S> AsRef<[T]> for Terminated<T, S> {
    fn as_ref(&self) -> &[T] {
        &self.items
    }
}

impl<T: Schema, S> Schema for Terminated<T, S> {
    #[inline]
    fn shape() -> Shape {
        Shape::Sequence {
            element: T::shape,
            terminated: true,
        }
    }
}

impl<T: EncodeSize, S: Terminator<T>> EncodeSize for Terminated<T, S> {
    fn encode_size(&self, enc: &mut Encoder) -> Result<usize, EncodeError> {
        let mut payload = T::encode_size_run(&self.items, enc)?;
        if enc.terminators() == Terminators::Trailing {
            let end = enc.descend(|enc| S::VALUE.encode_size(enc))?;
            payload = payload.checked_add(end).ok_or(EncodeError::SizeOverflow)?;
        }
        prefixed(self.items.len(), payload)
    }
}

impl<T: Write, S: Terminator<T>> Write for Terminated<T, S> {
    fn write(&self, buf: &mut impl BufMut, enc: &mut Encoder) -> Result<(), EncodeError> {
        write_len(self.items.len(), buf)?;
        T::write_run(&self.items, buf, enc)?;
        if enc.terminators() == Terminators::Trailing {
            enc.descend(|enc| S::VALUE.write(buf, enc))?;
        }
        Ok(())
    }
}

impl<T: Read + PartialEq, S: Terminator<T>> Read for Terminated<T, S> {
    fn read(buf: &mut impl Buf, dec: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        let items = read_items::<T>(buf, dec)?;
        if items.iter().any(|item| *item == S::VALUE) {
            return Err(DecodeError::SentinelInSlice);
        }
        if dec.terminators() == Terminators::Trailing {
            let end = dec.descend(|dec| T::read(buf, dec))?;
            if end != S::VALUE {
                return Err(DecodeError::WrongSentinel);
            }
        }
        Ok(Self {
            items,
            _terminator: PhantomData,
        })
    }

    fn heap_size(&self) -> usize {
        heap_size_of(&self.items)
    }
}
