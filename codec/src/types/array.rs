//! Codec implementation for fixed-size arrays.
//!
//! `[T; N]` encodes its `N` elements back to back with no length prefix.

use crate::{DecodeError, Decoder, EncodeError, EncodeSize, Encoder, Read, Schema, Shape, Write};
use bytes::{Buf, BufMut};

impl<T: Schema, const N: usize> Schema for [T; N] {
    #[inline]
    fn shape() -> Shape {
        Shape::Array {
            len: N,
            element: T::shape,
        }
    }
}

impl<T: EncodeSize, const N: usize> EncodeSize for [T; N] {
    #[inline]
    fn encode_size(&self, enc: &mut Encoder) -> Result<usize, EncodeError> {
        T::encode_size_run(self, enc)
    }
}

impl<T: Write, const N: usize> Write for [T; N] {
    #[inline]
    fn write(&self, buf: &mut impl BufMut, enc: &mut Encoder) -> Result<(), EncodeError> {
        T::write_run(self, buf, enc)
    }
}

impl<T: Read, const N: usize> Read for [T; N] {
    #[inline]
    fn read(buf: &mut impl Buf, dec: &mut Decoder<'_>) -> Result<Self, DecodeError> {
        // The elements live inline in the array, so nothing is reserved for them.
        let items = T::read_run(buf, N, dec)?;
        Ok(<[T; N]>::try_from(items)
            .unwrap_or_else(|_| unreachable!("read_run returns exactly N items")))
    }

    fn heap_size(&self) -> usize {
        self.iter().map(Read::heap_size).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{deserialize, release, Config, Decode, Encode, Tracked};

    #[test]
    fn test_array() {
        let values = [1u8, 2, 3];
        let encoded = values.encode().unwrap();
        assert_eq!(encoded, [1, 2, 3]);
        assert_eq!(<[u8; 3]>::decode(&encoded), Ok(values));
    }

    #[test]
    fn test_empty_array() {
        let values: [u64; 0] = [];
        assert!(values.encode().unwrap().is_empty());
        assert_eq!(<[u64; 0]>::decode(&[]), Ok(values));
    }

    #[test]
    fn test_array_of_sequences() {
        let values = [vec![1u16], vec![], vec![2, 3]];
        let encoded = values.encode().unwrap();
        assert_eq!(encoded.len(), (4 + 2) + 4 + (4 + 4));

        let alloc = Tracked::new();
        let decoded: [Vec<u16>; 3] = deserialize(&encoded, &alloc, 20).unwrap();
        assert_eq!(decoded, values);
        assert_eq!(alloc.outstanding(), 6);
        assert_eq!(decoded.heap_size(), 6);
        release(decoded, &alloc);
        assert_eq!(alloc.outstanding(), 0);
    }

    #[test]
    fn test_truncated() {
        assert_eq!(<[u32; 2]>::decode(&[0; 7]), Err(DecodeError::InputTooSmall));
        assert_eq!(
            <[bool; 2]>::decode(&[1, 3]),
            Err(DecodeError::InvalidBoolean(3))
        );
    }

    #[test]
    fn test_elements_are_nested() {
        // Elements sit one level below the array.
        let values = [[7u8; 2]; 2];
        let encoded = values.encode().unwrap();
        assert_eq!(crate::size_cfg(&values, Config::new(3)), Ok(4));
        assert_eq!(
            crate::size_cfg(&values, Config::new(2)),
            Err(EncodeError::MaxRecursionDepthReached)
        );
        assert_eq!(
            deserialize::<[[u8; 2]; 2]>(&encoded, &Tracked::new(), 2),
            Err(DecodeError::MaxRecursionDepthReached)
        );
        assert_eq!(deserialize::<[[u8; 2]; 2]>(&encoded, &Tracked::new(), 3), Ok(values));
    }

    #[test]
    fn test_shape() {
        assert_eq!(<[u8; 32]>::shape().to_string(), "[u8; 32]");
        assert_eq!(<[u16; 4]>::shape().min_size(), 8);
    }
}
