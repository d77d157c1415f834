//! Memory handed across the C ABI.
//!
//! A region is a boxed byte slice of exactly `capacity` bytes, so the host
//! frees it by passing back the pointer together with the same capacity.

use std::ptr::{self, NonNull};

/// An owned block of bytes that is freed when dropped, unless ownership
/// has been passed to the host with [`Region::into_raw`].
#[derive(Debug)]
pub struct Region {
    bytes: Box<[u8]>,
}

impl Region {
    pub fn zeroed(capacity: usize) -> Self {
        Self {
            bytes: vec![0; capacity].into_boxed_slice(),
        }
    }

    /// Reclaims a region previously returned by [`Region::into_raw`].
    ///
    /// # Safety
    /// `ptr` must come from `into_raw` on a region of exactly `capacity`
    /// bytes and must not be used afterwards.
    pub unsafe fn from_raw(ptr: NonNull<u8>, capacity: usize) -> Self {
        let slice = ptr::slice_from_raw_parts_mut(ptr.as_ptr(), capacity);
        Self {
            bytes: unsafe { Box::from_raw(slice) },
        }
    }

    /// Hands the bytes to the caller, who must release them later.
    pub fn into_raw(self) -> *mut u8 {
        Box::into_raw(self.bytes).cast()
    }

    pub fn capacity(&self) -> usize {
        self.bytes.len()
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.bytes
    }
}
