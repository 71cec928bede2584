//! Codec implementation for optional values.
//!
//! A presence byte (0 or 1, read like a `bool`) is followed by the inner value when present.

use crate::{
    util::write_byte, DecodeError, Decoder, EncodeError, EncodeSize, Encoder, Read, Schema,
    Shape, Write,
};
use bytes::{Buf, BufMut};

impl<T: Schema> Schema for Option<T> {
    #[inline]
    fn shape() -> Shape {
        Shape::Optional(T::shape)
    }
}

impl<T: EncodeSize> EncodeSize for Option<T> {
    #[inline]
    fn encode_size(&self, enc: &mut Encoder) -> Result<usize, EncodeError> {
        match self {
            Some(inner) => enc
                .descend(|enc| inner.encode_size(enc))?
                .checked_add(1)
                .ok_or(EncodeError::SizeOverflow),
            None => Ok(1),
        }
    }
}

impl<T: Write> Write for Option<T> {
    #[inline]
    fn write(&self, buf: &mut impl BufMut, enc: &mut Encoder) -> Result<(), EncodeError> {
        write_byte(buf, u8::from(self.is_some()))?;
        if let Some(inner) = self {
            enc.descend(|enc| inner.write(buf, enc))?;
        }
        Ok(())
    }
}

impl<T: Read> Read for Option<T> {
    #[inline]
    fn read(buf: &mut impl Buf, dec: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        if bool::read(buf, dec)? {
            Ok(Some(dec.descend(|dec| T::read(buf, dec))?))
        } else {
            Ok(None)
        }
    }

    fn heap_size(&self) -> usize {
        self.as_ref().map_or(0, Read::heap_size)
    }
}
