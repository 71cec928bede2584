//! Core codec traits and entry points

use crate::{
    alloc::{Allocator, Unbounded},
    config::{Config, DEFAULT_MAX_DEPTH},
    context::{Decoder, Encoder},
    error::{DecodeError, EncodeError},
    shape::Shape,
};
use bytes::{Buf, BufMut};

/// Most bytes a run preallocates before its elements are read. Longer runs grow as they decode.
pub(crate) const MAX_PREALLOCATION: usize = 1 << 20;

/// Trait for types with a known [Shape].
pub trait Schema {
    /// Describes how values of this type are laid out on the wire.
    fn shape() -> Shape;
}

/// Trait for types whose encoded length can be computed without encoding them.
pub trait EncodeSize {
    /// Returns the exact number of bytes [Write::write] produces for this value.
    fn encode_size(&self, enc: &mut Encoder) -> Result<usize, EncodeError>;

    /// Returns the combined encoded length of `items`, each one level below the caller.
    ///
    /// (Provided method). Scalars override this to skip per-element recursion.
    fn encode_size_run(items: &[Self], enc: &mut Encoder) -> Result<usize, EncodeError>
    where
        Self: Sized,
    {
        items.iter().try_fold(0usize, |total, item| {
            let size = enc.descend(|enc| item.encode_size(enc))?;
            total.checked_add(size).ok_or(EncodeError::SizeOverflow)
        })
    }
}

/// Trait for types that can be written (encoded) to a buffer.
pub trait Write {
    /// Encodes this value by writing to a buffer.
    ///
    /// Fails with [EncodeError::BufferTooSmall] if the buffer runs out of space.
    fn write(&self, buf: &mut impl BufMut, enc: &mut Encoder) -> Result<(), EncodeError>;

    /// Writes `items` back to back, each one level below the caller.
    ///
    /// (Provided method). Scalars override this with a single bulk copy.
    fn write_run(
        items: &[Self],
        buf: &mut impl BufMut,
        enc: &mut Encoder,
    ) -> Result<(), EncodeError>
    where
        Self: Sized,
    {
        for item in items {
            enc.descend(|enc| item.write(buf, enc))?;
        }
        Ok(())
    }
}

/// Trait for types that can be read/decoded from a buffer.
pub trait Read: Schema + Sized {
    /// Reads a value from the buffer, consuming the necessary bytes.
    ///
    /// Heap storage is reserved through `dec` before it is handed to the result.
    fn read(buf: &mut impl Buf, dec: &mut Decoder<'_>) -> Result<Self, DecodeError>;

    /// Reads `len` values back to back, each one level below the caller.
    ///
    /// (Provided method). Scalars override this with a single bulk copy. The caller has already
    /// reserved storage for the returned items.
    fn read_run(
        buf: &mut impl Buf,
        len: usize,
        dec: &mut Decoder<'_>,
    ) -> Result<Vec<Self>, DecodeError> {
        // Never trust `len` further than the input could possibly back it, and never
        // preallocate more than MAX_PREALLOCATION bytes up front.
        let by_input = buf.remaining() / Self::shape().min_size().max(1);
        let by_memory = MAX_PREALLOCATION / core::mem::size_of::<Self>().max(1);
        let mut items = Vec::with_capacity(len.min(by_input).min(by_memory));
        for _ in 0..len {
            items.push(dec.descend(|dec| Self::read(buf, dec))?);
        }
        Ok(items)
    }

    /// Returns the number of bytes this value reserved from the allocator it was decoded with.
    ///
    /// (Provided method). Types that own heap storage, directly or through their children,
    /// must override this.
    fn heap_size(&self) -> usize {
        0
    }
}

/// Trait for types that can be sized and encoded.
pub trait Encode: Schema + EncodeSize + Write {
    /// Encodes this value into a freshly allocated buffer of exactly the right length.
    ///
    /// (Provided method).
    fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        to_vec(self)
    }
}

// Automatically implement `Encode` for types that implement `Schema`, `EncodeSize` and `Write`.
impl<T: Schema + EncodeSize + Write> Encode for T {}

/// Trait for types that can be decoded from a buffer.
pub trait Decode: Read {
    /// Decodes a value from a buffer, ensuring the buffer is fully consumed.
    ///
    /// Uses the default depth limit and does not account allocations.
    ///
    /// (Provided method).
    fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        deserialize(bytes, &Unbounded, DEFAULT_MAX_DEPTH)
    }
}

// Automatically implement `Decode` for types that implement `Read`.
impl<T: Read> Decode for T {}

/// Trait for types that can be encoded and decoded.
pub trait Codec: Encode + Decode {}

// Automatically implement `Codec` for types that implement `Encode` and `Decode`.
impl<T: Encode + Decode> Codec for T {}

/// Returns the exact encoded length of `value`.
pub fn size<T: Encode + ?Sized>(value: &T) -> Result<usize, EncodeError> {
    size_cfg(value, Config::default())
}

/// Returns the exact encoded length of `value` under `config`.
pub fn size_cfg<T: Encode + ?Sized>(value: &T, config: Config) -> Result<usize, EncodeError> {
    Encoder::new(config).root(|enc| value.encode_size(enc))
}

/// Encodes `value` into `buf`, which must be exactly [size] bytes long.
///
/// Fails with [EncodeError::BufferTooSmall] if `buf` is shorter and with
/// [EncodeError::BufferTooBig] if bytes remain unwritten.
pub fn serialize<T: Encode + ?Sized>(value: &T, buf: &mut [u8]) -> Result<(), EncodeError> {
    serialize_cfg(value, buf, Config::default())
}

/// Encodes `value` into `buf` under `config`. See [serialize].
pub fn serialize_cfg<T: Encode + ?Sized>(
    value: &T,
    buf: &mut [u8],
    config: Config,
) -> Result<(), EncodeError> {
    let mut cursor = buf;
    Encoder::new(config).root(|enc| value.write(&mut cursor, enc))?;
    match cursor.len() {
        0 => Ok(()),
        unused => Err(EncodeError::BufferTooBig(unused)),
    }
}

/// Sizes `value`, allocates a buffer of that length and encodes into it.
pub fn to_vec<T: Encode + ?Sized>(value: &T) -> Result<Vec<u8>, EncodeError> {
    to_vec_cfg(value, Config::default())
}

/// Sizes, allocates and encodes under `config`. See [to_vec].
pub fn to_vec_cfg<T: Encode + ?Sized>(value: &T, config: Config) -> Result<Vec<u8>, EncodeError> {
    let len = size_cfg(value, config)?;
    let mut buf = vec![0; len];
    serialize_cfg(value, &mut buf, config)?;
    Ok(buf)
}

/// Decodes a value that must occupy all of `bytes`.
///
/// Leftover input fails with [DecodeError::RemainingBytes]. On any failure every reservation made
/// against `allocator` during the call has been released.
pub fn deserialize<T: Decode>(
    bytes: &[u8],
    allocator: &dyn Allocator,
    max_depth: usize,
) -> Result<T, DecodeError> {
    deserialize_cfg(bytes, allocator, Config::new(max_depth))
}

/// Decodes a value that must occupy all of `bytes`, under `config`. See [deserialize].
pub fn deserialize_cfg<T: Decode>(
    bytes: &[u8],
    allocator: &dyn Allocator,
    config: Config,
) -> Result<T, DecodeError> {
    let (value, remaining) = decode(bytes, allocator, config, true)?;
    debug_assert!(remaining.is_empty());
    Ok(value)
}

/// Decodes a value from the front of `bytes`, returning it with the number of bytes consumed.
///
/// The next value, if any, starts at the returned offset.
pub fn deserialize_stream<T: Decode>(
    bytes: &[u8],
    allocator: &dyn Allocator,
    max_depth: usize,
) -> Result<(T, usize), DecodeError> {
    deserialize_stream_cfg(bytes, allocator, Config::new(max_depth))
}

/// Decodes a value from the front of `bytes` under `config`. See [deserialize_stream].
pub fn deserialize_stream_cfg<T: Decode>(
    bytes: &[u8],
    allocator: &dyn Allocator,
    config: Config,
) -> Result<(T, usize), DecodeError> {
    let (value, remaining) = decode(bytes, allocator, config, false)?;
    Ok((value, bytes.len() - remaining.len()))
}

/// Returns the reservations held by a value decoded against `allocator`, then drops it.
pub fn release<T: Read>(value: T, allocator: &dyn Allocator) {
    let bytes = value.heap_size();
    drop(value);
    if bytes > 0 {
        allocator.release(bytes);
    }
}

fn decode<'b, T: Decode>(
    bytes: &'b [u8],
    allocator: &dyn Allocator,
    config: Config,
    exact: bool,
) -> Result<(T, &'b [u8]), DecodeError> {
    let mut buf = bytes;
    let mut dec = Decoder::new(allocator, config);
    let result = dec.root(|dec| T::read(&mut buf, dec)).and_then(|value| {
        if exact && !buf.is_empty() {
            return Err(DecodeError::RemainingBytes(buf.len()));
        }
        Ok(value)
    });
    match result {
        Ok(value) => Ok((value, buf)),
        Err(err) => {
            dec.rollback();
            Err(err)
        }
    }
}
