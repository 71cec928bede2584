//! Codec implementation for single owned references.
//!
//! A `Box<T>` encodes exactly like `T`; no indirection marker reaches the wire. Boxes are how a
//! type refers to itself, so the target is always one level deeper than the box.

use crate::{DecodeError, Decoder, EncodeError, EncodeSize, Encoder, Read, Schema, Shape, Write};
use bytes::{Buf, BufMut};

impl<T: Schema> Schema for Box<T> {
    #[inline]
    fn shape() -> Shape {
        Shape::Boxed(T::shape)
    }
}

impl<T: EncodeSize> EncodeSize for Box<T> {
    #[inline]
    fn encode_size(&self, enc: &mut Encoder) -> Result<usize, EncodeError> {
        enc.descend(|enc| self.as_ref().encode_size(enc))
    }
}

impl<T: Write> Write for Box<T> {
    #[inline]
    fn write(&self, buf: &mut impl BufMut, enc: &mut Encoder) -> Result<(), EncodeError> {
        enc.descend(|enc| self.as_ref().write(buf, enc))
    }
}

impl<T: Read> Read for Box<T> {
    #[inline]
    fn read(buf: &mut impl Buf, dec: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        let value = dec.descend(|dec| T::read(buf, dec))?;
        dec.reserve_one::<T>()?;
        Ok(Box::new(value))
    }

    fn heap_size(&self) -> usize {
        core::mem::size_of::<T>() + self.as_ref().heap_size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{deserialize, release, Decode, Encode, Tracked};

    #[test]
    fn test_inline() {
        let value = Box::new(0x0102u16);
        assert_eq!(value.encode().unwrap(), [0x02, 0x01]);
        assert_eq!(Box::<u16>::decode(&[0x02, 0x01]), Ok(value));
    }

    #[test]
    fn test_reservations() {
        let value = Box::new(vec![Box::new(1u64), Box::new(2u64)]);
        let encoded = value.encode().unwrap();
        assert_eq!(encoded.len(), 4 + 8 + 8);

        let alloc = Tracked::new();
        let decoded: Box<Vec<Box<u64>>> = deserialize(&encoded, &alloc, 20).unwrap();
        assert_eq!(decoded, value);

        // The outer box, two slots for boxes, two u64 targets.
        let expected = core::mem::size_of::<Vec<Box<u64>>>()
            + 2 * core::mem::size_of::<Box<u64>>()
            + 2 * 8;
        assert_eq!(alloc.outstanding(), expected);
        release(decoded, &alloc);
        assert_eq!(alloc.outstanding(), 0);
    }

    #[test]
    fn test_failure_releases() {
        let alloc = Tracked::new();
        // Second box truncated.
        let bytes = [2, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 2, 0];
        assert_eq!(
            deserialize::<Vec<Box<u64>>>(&bytes, &alloc, 20),
            Err(DecodeError::InputTooSmall)
        );
        assert_eq!(alloc.outstanding(), 0);
    }

    #[test]
    fn test_shape() {
        assert_eq!(Box::<i64>::shape().to_string(), "Box<i64>");
    }
}
