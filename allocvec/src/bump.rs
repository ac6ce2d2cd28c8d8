//! Arena-backed storage strategy, enabled by the `bumpalo` crate feature.
//!
//! # Examples
//!
//! ```
//! # #[cfg(feature = "bumpalo")] {
//! use allocvec::prelude::*;
//! use allocvec::bump::BumpAlloc;
//!
//! let arena = bumpalo::Bump::new();
//! let mut v = Vector::new_in(BumpAlloc::new(&arena));
//! for i in 0..20 {
//!     v.push_back(i);
//! }
//! assert_eq!(v.capacity(), 32);
//! drop(v);    // Destroys the elements.
//! drop(arena); // Releases the storage.
//! # }
//! ```
use crate::allocator::{AllocError, Allocator};

use core::alloc::Layout;
use core::ptr::NonNull;

/// Places blocks in a [`bumpalo::Bump`] arena.
///
/// Blocks are never returned to the arena individually; a container that grows leaves its old
/// blocks behind until the arena itself is dropped or reset.
#[derive(Clone, Copy, Debug)]
pub struct BumpAlloc<'a>(&'a bumpalo::Bump);

impl<'a> BumpAlloc<'a> {
    /// A strategy allocating from `arena`.
    pub fn new(arena: &'a bumpalo::Bump) -> Self {
        BumpAlloc(arena)
    }

    /// The arena this strategy allocates from.
    pub fn arena(&self) -> &'a bumpalo::Bump {
        self.0
    }
}

unsafe impl<'a> Allocator for BumpAlloc<'a> {
    #[inline]
    fn allocate(&mut self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        self.0.try_alloc_layout(layout).map_err(|_| AllocError)
    }

    #[inline]
    unsafe fn deallocate(&mut self, _ptr: NonNull<u8>, _layout: Layout) {}
}
