//! Slot arithmetic shared by the vector and its owning iterator.

use crate::allocator::{AllocError, Allocator};
use core::alloc::Layout;
use core::ptr::NonNull;

#[inline(never)]
#[cold]
pub(crate) fn capacity_overflow() -> ! {
    panic!("capacity overflow")
}

/// Largest number of `T` slots a single block may hold.
#[inline(always)]
pub(crate) const fn max_slots<T>() -> usize {
    let size = core::mem::size_of::<T>();
    if size == 0 {
        isize::MAX as usize
    } else {
        isize::MAX as usize / size
    }
}

/// Whether `capacity` slots of `T` occupy an actual block. Zero-sized types and empty
/// capacities run on a dangling pointer and never reach the allocator.
#[inline(always)]
pub(crate) const fn holds_block<T>(capacity: usize) -> bool {
    capacity != 0 && core::mem::size_of::<T>() != 0
}

#[inline]
pub(crate) fn slots_layout<T>(capacity: usize) -> Layout {
    if capacity > max_slots::<T>() {
        capacity_overflow()
    }
    Layout::array::<T>(capacity).unwrap_or_else(|_| capacity_overflow())
}

/// Acquires storage for `capacity` slots from `alloc`.
#[inline]
pub(crate) fn allocate_slots<T, A: Allocator>(
    alloc: &mut A,
    capacity: usize,
) -> Result<NonNull<T>, AllocError> {
    let layout = slots_layout::<T>(capacity);
    if !holds_block::<T>(capacity) {
        return Ok(NonNull::dangling());
    }
    alloc.allocate(layout).map(NonNull::cast)
}

/// Returns the block behind `ptr` to `alloc`. A no-op when no block is held.
///
/// # Safety
///
/// `ptr` and `capacity` must describe storage obtained from [`allocate_slots`] on `alloc` (or a
/// clone of it), and no element may be live in it.
#[inline]
pub(crate) unsafe fn release_slots<T, A: Allocator>(alloc: &mut A, ptr: NonNull<T>, capacity: usize) {
    if holds_block::<T>(capacity) {
        alloc.deallocate(ptr.cast(), slots_layout::<T>(capacity));
    }
}
