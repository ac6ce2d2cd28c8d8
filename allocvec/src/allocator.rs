#![warn(missing_docs)]

//! Allocator strategies: the customization point through which a
//! [`Vector`](crate::Vector) acquires storage and starts or ends the lifetime of its elements.
//!
//! A strategy has four jobs:
//!
//! 1. [`allocate`][`Allocator::allocate`] a raw block big enough for some number of slots.
//! 2. [`deallocate`][`Allocator::deallocate`] a block it previously handed out.
//! 3. [`construct`][`Allocator::construct`] an element in a raw slot.
//! 4. [`destroy`][`Allocator::destroy`] an element, leaving its slot raw again.
//!
//! Moving an element from one slot to another (for example when the container grows) is a
//! bitwise copy and calls neither `construct` nor `destroy`: no element starts or ends its life.
//!
//! # Examples
//!
//! The default strategy is [`Global`]:
//!
//! ```
//! use allocvec::prelude::*;
//!
//! let mut v: Vector<u32, Global> = Vector::new_in(Global);
//! v.push_back(7);
//! assert_eq!(&v[..], &[7]);
//! ```

use core::alloc::Layout;
use core::ptr::NonNull;

/// The strategy could not provide a block for the requested layout.
///
/// # Examples
///
/// ```
/// use allocvec::allocator::AllocError;
/// assert_eq!(AllocError.to_string(), "memory allocation failed");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("memory allocation failed")]
pub struct AllocError;

/// A storage strategy for [`Vector`](crate::Vector).
///
/// # Examples
///
/// A strategy that refuses blocks above a size limit, and otherwise forwards to [`Global`]:
///
/// ```
/// use allocvec::prelude::*;
/// use allocvec::allocator::AllocError;
/// use core::alloc::Layout;
/// use core::ptr::NonNull;
///
/// struct Capped(usize);
///
/// unsafe impl Allocator for Capped {
///     fn allocate(&mut self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
///         if layout.size() > self.0 {
///             return Err(AllocError);
///         }
///         Global.allocate(layout)
///     }
///
///     unsafe fn deallocate(&mut self, ptr: NonNull<u8>, layout: Layout) {
///         Global.deallocate(ptr, layout)
///     }
/// }
///
/// let mut v: Vector<u64, Capped> = Vector::new_in(Capped(64));
/// assert!(v.reserve(8).is_ok());
/// assert!(v.reserve(9).is_err());
/// ```
///
/// # Safety
///
/// An implementor must guarantee:
///  * a block returned by `allocate(layout)` is valid for reads and writes of `layout.size()`
///    bytes, aligned to `layout.align()`, and stays valid until it is passed to `deallocate`
///    (or the strategy itself is dropped, for arena-like strategies that release in bulk).
///  * blocks handed out by `allocate` never overlap while they are live.
///  * `construct` leaves a fully initialized `T` in the slot, and `destroy` runs `T`'s
///    destructor exactly once, if they are overridden.
///
/// Callers (the container) guarantee that `allocate` is never asked for a zero-sized layout, and
/// that `deallocate` receives the same layout the block was allocated with.
pub unsafe trait Allocator {
    /// Acquires a raw, uninitialized block for `layout`.
    fn allocate(&mut self, layout: Layout) -> Result<NonNull<u8>, AllocError>;

    /// Releases a block previously returned by [`allocate`][`Allocator::allocate`].
    ///
    /// # Safety
    ///
    /// `ptr` must have come from `allocate` on this strategy (or a clone of it) with the same
    /// `layout`, and must not be used again afterwards.
    unsafe fn deallocate(&mut self, ptr: NonNull<u8>, layout: Layout);

    /// Begins the lifetime of an element in a raw slot.
    ///
    /// # Safety
    ///
    /// `slot` must be valid for writes and hold no live value.
    #[inline]
    unsafe fn construct<T>(&mut self, slot: NonNull<T>, value: T) {
        slot.as_ptr().write(value)
    }

    /// Ends the lifetime of the element in `slot`. The slot is raw afterwards.
    ///
    /// Only elements dropped inside the container come through here. Values moved out of it
    /// (`pop`, `remove`, the owned iterator) are handed to the caller as they are and are not
    /// reported to the strategy.
    ///
    /// # Safety
    ///
    /// `slot` must hold a live value, which must not be used again.
    #[inline]
    unsafe fn destroy<T>(&mut self, slot: NonNull<T>) {
        core::ptr::drop_in_place(slot.as_ptr())
    }
}

/// The process-wide global allocator.
///
/// # Examples
///
/// ```
/// use allocvec::prelude::*;
///
/// let v: Vector<String> = vector!["a".to_string(), "b".to_string()];
/// let _: &Global = v.allocator();
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Global;

unsafe impl Allocator for Global {
    #[inline]
    fn allocate(&mut self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        debug_assert!(layout.size() != 0);
        // Safety: the caller never asks for a zero-sized layout.
        NonNull::new(unsafe { alloc::alloc::alloc(layout) }).ok_or(AllocError)
    }

    #[inline]
    unsafe fn deallocate(&mut self, ptr: NonNull<u8>, layout: Layout) {
        alloc::alloc::dealloc(ptr.as_ptr(), layout)
    }
}
