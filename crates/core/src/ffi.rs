//! C FFI bindings for native miners

use core::slice;

use crate::cascade::hash;
use crate::params::{INPUT_SIZE, OUTPUT_SIZE};
use crate::work::{Work, regen_hash};

/// Success
pub const XEVAN_OK: i32 = 0;
/// Null pointer or input length other than 80
pub const XEVAN_INVALID_ARGUMENT: i32 = -1;
/// The cascade failed (engine fault or template unavailable)
pub const XEVAN_FAILURE: i32 = -2;

/// Compute the Xevan digest of an 80-byte header
/// - input: pointer to `len` bytes
/// - output: pointer to a 32-byte buffer for the result
/// - len: must be 80
///
/// On any error the output buffer is left untouched.
#[unsafe(no_mangle)]
pub extern "C" fn xevan_hash(input: *const u8, output: *mut u8, len: u32) -> i32 {
    if input.is_null() || output.is_null() || len as usize != INPUT_SIZE {
        return XEVAN_INVALID_ARGUMENT;
    }

    let input_slice = unsafe { slice::from_raw_parts(input, INPUT_SIZE) };
    match hash(input_slice) {
        Ok(digest) => {
            let output_slice = unsafe { slice::from_raw_parts_mut(output, OUTPUT_SIZE) };
            output_slice.copy_from_slice(&digest);
            XEVAN_OK
        }
        Err(e) => {
            log::error!("xevan_hash failed: {}", e);
            XEVAN_FAILURE
        }
    }
}

/// Recompute `work->hash` from `work->data`
#[unsafe(no_mangle)]
pub extern "C" fn xevan_regenhash(work: *mut Work) -> i32 {
    if work.is_null() {
        return XEVAN_INVALID_ARGUMENT;
    }

    let work = unsafe { &mut *work };
    match regen_hash(work) {
        Ok(()) => XEVAN_OK,
        Err(e) => {
            log::error!("xevan_regenhash failed: {}", e);
            XEVAN_FAILURE
        }
    }
}
