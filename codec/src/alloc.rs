//! Allocation accounting for decoded values.
//!
//! Decoding untrusted input allocates storage for sequences and owned references. Every such
//! allocation is first reserved against the [Allocator] passed to the decode call, which lets the
//! caller bound the memory a single input may claim and observe exactly what a decoded value
//! holds. Reservations made by a call that fails are released before the error is returned.
//! Reservations held by a successfully decoded value are returned with [crate::release] (or in
//! bulk, for arena-style use, with [Tracked::reset]).

use crate::error::AllocError;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Source of memory reservations for the decoder.
pub trait Allocator {
    /// Reserves `bytes` for a decoded allocation.
    fn reserve(&self, bytes: usize) -> Result<(), AllocError>;

    /// Returns `bytes` previously reserved.
    fn release(&self, bytes: usize);
}

/// Accepts every reservation and tracks nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct Unbounded;

impl Allocator for Unbounded {
    #[inline]
    fn reserve(&self, _: usize) -> Result<(), AllocError> {
        Ok(())
    }

    #[inline]
    fn release(&self, _: usize) {}
}

/// Counts outstanding bytes, optionally enforcing a byte limit.
///
/// # Examples
///
/// ```
/// use canon_codec::{deserialize, release, Tracked};
///
/// let arena = Tracked::with_limit(1024);
/// let bytes = [3, 0, 0, 0, 1, 2, 3];
/// let items: Vec<u8> = deserialize(&bytes, &arena, 20).unwrap();
/// assert_eq!(arena.outstanding(), 3);
///
/// release(items, &arena);
/// assert_eq!(arena.outstanding(), 0);
/// ```
#[derive(Debug, Default)]
pub struct Tracked {
    limit: Option<usize>,
    outstanding: AtomicUsize,
    peak: AtomicUsize,
}

impl Tracked {
    /// Creates an allocator without a limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an allocator that refuses to hold more than `limit` bytes at once.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    /// Bytes currently reserved.
    pub fn outstanding(&self) -> usize {
        self.outstanding.load(Ordering::Acquire)
    }

    /// Largest number of bytes held at once since creation.
    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::Acquire)
    }

    /// Releases everything at once.
    ///
    /// Values decoded against this allocator must not be passed to [crate::release] afterwards.
    pub fn reset(&self) {
        self.outstanding.store(0, Ordering::Release);
    }
}

impl Allocator for Tracked {
    fn reserve(&self, bytes: usize) -> Result<(), AllocError> {
        let limit = self.limit.unwrap_or(usize::MAX);
        let previous = self
            .outstanding
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
                current.checked_add(bytes).filter(|total| *total <= limit)
            })
            .map_err(|current| match current.checked_add(bytes) {
                None => AllocError::Overflow,
                Some(_) => AllocError::Exhausted {
                    requested: bytes,
                    available: limit.saturating_sub(current),
                },
            })?;
        self.peak.fetch_max(previous + bytes, Ordering::AcqRel);
        Ok(())
    }

    fn release(&self, bytes: usize) {
        let _ = self
            .outstanding
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
                Some(current.saturating_sub(bytes))
            });
    }
}
