//! Canonical binary serialization.
//!
//! # Overview
//!
//! A deterministic binary format in the style of Borsh, designed to:
//! - Give every value exactly one encoding, so encodings can be hashed and compared
//! - Deserialize untrusted input with bounded recursion and accounted allocation
//! - Release everything a failed decode allocated before returning the error
//!
//! # Format
//!
//! - Integers and floats: little-endian, native width (`u8` through `u128`, `i8` through
//!   `i128`, [F16], `f32`, `f64`)
//! - `bool`: one byte, `0` or `1`; anything else is rejected
//! - `()`: zero bytes
//! - `[T; N]`: `N` elements, no prefix
//! - `Vec<T>`: `u32` element count, then the elements
//! - [Terminated]: a `Vec` whose elements may never equal a declared terminator value
//! - `Box<T>`: encoded exactly like `T`
//! - `Option<T>`: a presence byte (`0` or `1`), then the value when present
//! - [record!]: fields in declaration order
//! - [enumeration!]: one byte holding the variant index
//! - [tagged_union!]: one byte holding the variant index, then that variant's payload
//!
//! # Example
//!
//! ```
//! use canon_codec::{
//!     deserialize, record, release, serialize, size, tagged_union, DecodeError, Tracked,
//! };
//!
//! tagged_union! {
//!     #[derive(Debug, Clone, PartialEq)]
//!     pub enum Reading {
//!         Missing(()),
//!         Celsius(f32),
//!     }
//! }
//!
//! record! {
//!     #[derive(Debug, Clone, PartialEq)]
//!     pub struct Station {
//!         pub id: u16,
//!         pub name: Vec<u8>,
//!         pub readings: Vec<Reading>,
//!     }
//! }
//!
//! let station = Station {
//!     id: 7,
//!     name: b"north".to_vec(),
//!     readings: vec![Reading::Celsius(21.5), Reading::Missing(())],
//! };
//!
//! // Compute the exact size, then encode into a buffer of that size.
//! let len = size(&station).unwrap();
//! let mut buf = vec![0u8; len];
//! serialize(&station, &mut buf).unwrap();
//!
//! // Decode with a tracking allocator and the default depth limit.
//! let alloc = Tracked::new();
//! let decoded: Station = deserialize(&buf, &alloc, 20).unwrap();
//! assert_eq!(decoded, station);
//! release(decoded, &alloc);
//! assert_eq!(alloc.outstanding(), 0);
//!
//! // Input must be consumed exactly.
//! buf.push(0);
//! assert_eq!(
//!     deserialize::<Station>(&buf, &alloc, 20),
//!     Err(DecodeError::RemainingBytes(1))
//! );
//! assert_eq!(alloc.outstanding(), 0);
//! ```

pub mod alloc;
pub mod codec;
pub mod config;
pub mod context;
pub mod error;
mod macros;
pub mod shape;
pub mod types;
pub mod util;

// Re-export main types and traits
pub use alloc::{Allocator, Tracked, Unbounded};
pub use codec::{
    deserialize, deserialize_cfg, deserialize_stream, deserialize_stream_cfg, release, serialize,
    serialize_cfg, size, size_cfg, to_vec, to_vec_cfg, Codec, Decode, Encode, EncodeSize, Read,
    Schema, Write,
};
pub use config::{Config, Terminators, DEFAULT_MAX_DEPTH};
pub use context::{Decoder, Encoder};
pub use error::{AllocError, DecodeError, EncodeError};
pub use shape::{Describe, Field, Shape, Variant};
pub use types::{
    primitives::F16,
    vec::{Terminated, Terminator, Zero},
};

/// Items referenced by the declarative macros. Not part of the public API.
#[doc(hidden)]
pub mod __private {
    pub use crate::util::{read_byte, write_byte};
    pub use bytes::{Buf, BufMut};
}
