//! State threaded through a single size, encode or decode call.
//!
//! Both contexts carry the depth guard: every descent into a child (array or sequence element,
//! owned-reference target, record field, union or optional payload) goes through `descend`, which
//! refuses to go as deep as [Config::max_depth]. The [Decoder] additionally keeps a ledger of the
//! bytes it reserved from the caller's [Allocator] so a failed call can hand them all back.

use crate::{
    alloc::Allocator,
    config::{Config, Terminators},
    error::{AllocError, DecodeError, EncodeError},
};
use core::alloc::Layout;

/// Depth counter shared by both directions.
#[derive(Clone, Copy, Debug)]
struct Depth {
    current: usize,
    max: usize,
}

impl Depth {
    const fn new(max: usize) -> Self {
        Self { current: 0, max }
    }

    /// Returns the depth a child would sit at, if it is allowed.
    #[inline]
    fn child(&self) -> Option<usize> {
        let next = self.current + 1;
        (next < self.max).then_some(next)
    }

    #[inline]
    fn root(&self) -> bool {
        self.max > 0
    }
}

/// Context for sizing and writing a value.
#[derive(Debug)]
pub struct Encoder {
    depth: Depth,
    config: Config,
}

impl Encoder {
    /// Creates a context for one top-level value.
    pub fn new(config: Config) -> Self {
        Self {
            depth: Depth::new(config.max_depth),
            config,
        }
    }

    /// Layout of terminated sequences for this call.
    pub fn terminators(&self) -> Terminators {
        self.config.terminators
    }

    /// Runs `f` for the top-level value.
    pub(crate) fn root<R>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<R, EncodeError>,
    ) -> Result<R, EncodeError> {
        if !self.depth.root() {
            return Err(EncodeError::MaxRecursionDepthReached);
        }
        f(self)
    }

    /// Runs `f` one level deeper.
    #[inline]
    pub fn descend<R>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<R, EncodeError>,
    ) -> Result<R, EncodeError> {
        let next = self
            .depth
            .child()
            .ok_or(EncodeError::MaxRecursionDepthReached)?;
        let parent = core::mem::replace(&mut self.depth.current, next);
        let result = f(self);
        self.depth.current = parent;
        result
    }

    /// Fails if a child could not be entered. Used by runs of scalars that skip per-element calls.
    #[inline]
    pub fn check_descend(&self) -> Result<(), EncodeError> {
        self.depth
            .child()
            .map(|_| ())
            .ok_or(EncodeError::MaxRecursionDepthReached)
    }
}

/// Context for reading a value.
pub struct Decoder<'a> {
    depth: Depth,
    config: Config,
    allocator: &'a dyn Allocator,
    reserved: usize,
}

impl<'a> Decoder<'a> {
    /// Creates a context for one top-level value.
    pub fn new(allocator: &'a dyn Allocator, config: Config) -> Self {
        Self {
            depth: Depth::new(config.max_depth),
            config,
            allocator,
            reserved: 0,
        }
    }

    /// Layout of terminated sequences for this call.
    pub fn terminators(&self) -> Terminators {
        self.config.terminators
    }

    /// Runs `f` for the top-level value.
    pub(crate) fn root<R>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<R, DecodeError>,
    ) -> Result<R, DecodeError> {
        if !self.depth.root() {
            return Err(DecodeError::MaxRecursionDepthReached);
        }
        f(self)
    }

    /// Runs `f` one level deeper.
    #[inline]
    pub fn descend<R>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<R, DecodeError>,
    ) -> Result<R, DecodeError> {
        let next = self
            .depth
            .child()
            .ok_or(DecodeError::MaxRecursionDepthReached)?;
        let parent = core::mem::replace(&mut self.depth.current, next);
        let result = f(self);
        self.depth.current = parent;
        result
    }

    /// Fails if a child could not be entered. Used by runs of scalars that skip per-element calls.
    #[inline]
    pub fn check_descend(&self) -> Result<(), DecodeError> {
        self.depth
            .child()
            .map(|_| ())
            .ok_or(DecodeError::MaxRecursionDepthReached)
    }

    /// Reserves storage for `len` values of `T` from the caller's allocator.
    pub fn reserve_array<T>(&mut self, len: usize) -> Result<(), DecodeError> {
        let layout = Layout::array::<T>(len).map_err(|_| AllocError::Overflow)?;
        self.reserve(layout)
    }

    /// Reserves storage for one `T` from the caller's allocator.
    pub fn reserve_one<T>(&mut self) -> Result<(), DecodeError> {
        self.reserve(Layout::new::<T>())
    }

    fn reserve(&mut self, layout: Layout) -> Result<(), DecodeError> {
        let bytes = layout.size();
        if bytes == 0 {
            return Ok(());
        }
        self.allocator.reserve(bytes)?;
        self.reserved = self.reserved.saturating_add(bytes);
        Ok(())
    }

    /// Hands every reservation made through this context back to the allocator.
    pub(crate) fn rollback(self) {
        if self.reserved > 0 {
            self.allocator.release(self.reserved);
        }
    }
}

impl core::fmt::Debug for Decoder<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Decoder")
            .field("depth", &self.depth)
            .field("config", &self.config)
            .field("reserved", &self.reserved)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alloc::Tracked;

    #[test]
    fn test_descend_limit() {
        let mut enc = Encoder::new(Config::new(3));
        let reached = enc.root(|enc| {
            enc.descend(|enc| {
                enc.descend(|enc| {
                    enc.check_descend()?;
                    Ok(2)
                })
            })
        });
        assert_eq!(reached, Err(EncodeError::MaxRecursionDepthReached));

        // The counter unwinds after a failure.
        assert_eq!(enc.descend(|enc| enc.descend(|_| Ok(2))), Ok(2));
    }

    #[test]
    fn test_zero_depth_rejects_root() {
        let mut enc = Encoder::new(Config::new(0));
        assert_eq!(enc.root(|_| Ok(())), Err(EncodeError::MaxRecursionDepthReached));

        let alloc = Tracked::new();
        let mut dec = Decoder::new(&alloc, Config::new(0));
        assert_eq!(dec.root(|_| Ok(())), Err(DecodeError::MaxRecursionDepthReached));
    }

    #[test]
    fn test_rollback_releases_reservations() {
        let alloc = Tracked::new();
        let mut dec = Decoder::new(&alloc, Config::default());
        dec.reserve_array::<u64>(4).unwrap();
        dec.reserve_one::<u32>().unwrap();
        dec.reserve_array::<()>(1000).unwrap();
        assert_eq!(alloc.outstanding(), 36);

        dec.rollback();
        assert_eq!(alloc.outstanding(), 0);
    }

    #[test]
    fn test_reserve_overflow() {
        let alloc = Tracked::new();
        let mut dec = Decoder::new(&alloc, Config::default());
        assert_eq!(
            dec.reserve_array::<u64>(usize::MAX),
            Err(DecodeError::OutOfMemory(AllocError::Overflow))
        );
        assert_eq!(alloc.outstanding(), 0);
    }
}
