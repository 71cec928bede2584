//! Error types for codec operations

use thiserror::Error;

/// Error returned when encoding (or sizing) a value fails.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
    #[error("buffer too small")]
    BufferTooSmall,
    #[error("buffer too big: {0} bytes unused")]
    BufferTooBig(usize),
    #[error("max recursion depth reached")]
    MaxRecursionDepthReached,
    #[error("encoded size overflows usize")]
    SizeOverflow,
    #[error("sequence too long: {0} elements")]
    SequenceTooLong(usize),
}

/// Error returned when decoding a value fails.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    #[error("input too small")]
    InputTooSmall,
    #[error("invalid boolean: {0}")]
    InvalidBoolean(u8),
    #[error("invalid enum tag: {0}")]
    InvalidEnumTag(u8),
    #[error("invalid tagged union tag: {0}")]
    InvalidTaggedUnionTag(u8),
    #[error("terminator value found inside sequence")]
    SentinelInSlice,
    #[error("sequence not followed by its terminator")]
    WrongSentinel,
    #[error("remaining bytes: {0}")]
    RemainingBytes(usize),
    #[error("max recursion depth reached")]
    MaxRecursionDepthReached,
    #[error("out of memory: {0}")]
    OutOfMemory(#[from] AllocError),
}

/// Error returned by an [crate::Allocator] that cannot satisfy a reservation.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocError {
    #[error("requested {requested} bytes, {available} available")]
    Exhausted { requested: usize, available: usize },
    #[error("allocation size overflows usize")]
    Overflow,
}
