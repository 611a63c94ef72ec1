// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Handle for register blocks that live at fixed addresses.

use core::ops::Deref;
use core::ptr::NonNull;

/// A pointer to a statically placed register block.
///
/// Wraps the raw address of a peripheral so that drivers can hold it by
/// value and dereference it without writing `unsafe` at every access.
#[derive(Debug)]
pub struct StaticRef<T> {
    ptr: NonNull<T>,
}

impl<T> StaticRef<T> {
    /// Create a new `StaticRef` from a raw pointer.
    ///
    /// ## Safety
    ///
    /// - `ptr` must be aligned, non-null, and dereferencable as `T`.
    /// - `*ptr` must stay valid for the rest of the program.
    pub const unsafe fn new(ptr: *const T) -> StaticRef<T> {
        // SAFETY: the caller promises `ptr` is non-null.
        StaticRef {
            ptr: unsafe { NonNull::new_unchecked(ptr.cast_mut()) },
        }
    }

    /// The address this reference points at.
    pub const fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr().cast_const()
    }
}

impl<T> Clone for StaticRef<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for StaticRef<T> {}

impl<T> Deref for StaticRef<T> {
    type Target = T;

    fn deref(&self) -> &T {
        // SAFETY: `ptr` is aligned and dereferencable for the program
        // duration, as promised by the caller of `StaticRef::new`.
        unsafe { self.ptr.as_ref() }
    }
}

#[cfg(test)]
mod tests {
    use super::StaticRef;
    use core::ptr::addr_of;

    static WORD: u32 = 0x1234_5678;

    #[test]
    fn deref_reads_target() {
        let r = unsafe { StaticRef::new(addr_of!(WORD)) };
        assert_eq!(*r, 0x1234_5678);
        assert_eq!(r.as_ptr(), addr_of!(WORD));
    }

    #[test]
    fn copies_share_address() {
        let r = unsafe { StaticRef::new(0x2_0000 as *const u32) };
        let copy = r;
        assert_eq!(copy.as_ptr(), r.as_ptr());
        assert_eq!(r.as_ptr() as usize, 0x2_0000);
    }
}
