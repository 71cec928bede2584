//! Cross-check canonical encodings against the `borsh` reference implementation.
//!
//! A test driver on the other side of a C ABI encodes a known value, then calls
//! [roundtrip_test_case] with the id of the case that value belongs to. The harness decodes the
//! bytes with `borsh`, compares the result against the case's expected value, and hands back the
//! reference encoding of that value so the driver can decode it in turn. Both directions must
//! agree byte for byte.
//!
//! Buffers returned through [roundtrip_test_case] are owned by this library and must be handed
//! back to [roundtrip_free].

use core::ptr;
use thiserror::Error;
use tracing::{debug, warn};

pub mod cases;

/// Reasons a case is rejected.
#[derive(Error, Debug)]
pub enum Error {
    #[error("unknown case: {0}")]
    UnknownCase(u8),
    #[error("input does not decode: {0}")]
    Decode(std::io::Error),
    #[error("decoded value differs from case {0}")]
    Mismatch(u8),
    #[error("reference encoding failed: {0}")]
    Encode(std::io::Error),
}

/// Runs case `id` against `input` and returns the reference encoding of the case's value.
pub fn run(id: u8, input: &[u8]) -> Result<Vec<u8>, Error> {
    debug!(id, len = input.len(), "running case");
    cases::run(id, input)
}

/// Runs case `id` against the `input_len` bytes at `input`.
///
/// On success `*output` points at a buffer of `*output_len` bytes that the caller must release
/// with [roundtrip_free]. On any failure `*output` is null and `*output_len` is zero.
///
/// # Safety
///
/// `input` must be valid for reads of `input_len` bytes unless `input_len` is zero. `output` and
/// `output_len` must be valid for writes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn roundtrip_test_case(
    id: u8,
    input: *const u8,
    input_len: usize,
    output: *mut *const u8,
    output_len: *mut usize,
) {
    let input = if input_len == 0 || input.is_null() {
        &[][..]
    } else {
        unsafe { core::slice::from_raw_parts(input, input_len) }
    };
    let (ptr, len) = match run(id, input) {
        Ok(encoded) => {
            let encoded = encoded.into_boxed_slice();
            let len = encoded.len();
            (Box::into_raw(encoded) as *const u8, len)
        }
        Err(err) => {
            warn!(id, ?err, "case rejected");
            (ptr::null(), 0)
        }
    };
    unsafe {
        *output = ptr;
        *output_len = len;
    }
}

/// Releases a buffer returned by [roundtrip_test_case]. Null pointers are ignored.
///
/// # Safety
///
/// `ptr` and `len` must be exactly as returned by one call to [roundtrip_test_case], and the
/// buffer must not be released twice.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn roundtrip_free(ptr: *const u8, len: usize) {
    if ptr.is_null() {
        return;
    }
    let slice = ptr::slice_from_raw_parts_mut(ptr as *mut u8, len);
    drop(unsafe { Box::from_raw(slice) });
}
