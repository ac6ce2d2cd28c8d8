#![warn(missing_docs)]

//! A contiguous growable array whose storage and element lifetimes go through an
//! [`Allocator`] strategy.
//!
//! # Examples
//!
//! ```
//! use allocvec::prelude::*;
//!
//! let mut v: Vector<i32> = Vector::new();
//! v.push_back(1);
//! v.push_back(3);
//! v.insert(1, 2).unwrap();
//! assert_eq!(&v[..], &[1, 2, 3]);
//! assert_eq!(v.capacity(), 16);
//!
//! v.erase(0);
//! assert_eq!(&v[..], &[2, 3]);
//! v.shrink_to_fit();
//! assert_eq!(v.capacity(), 2);
//! ```
//!
//! # Iterator invalidation
//!
//! Anything that may reallocate or shift elements takes `&mut self`, so it cannot run while an
//! iterator or reference into the vector is alive:
//!
//! ```compile_fail
//! use allocvec::prelude::*;
//!
//! let mut v: Vector<i32> = vector![1, 2, 3];
//! for x in v.iter() {
//!     v.push_back(*x);
//! }
//! ```
//!
//! # Comparison
//!
//! Vectors do not implement the comparison traits. Compare their contents as
//! slices instead:
//!
//! ```compile_fail
//! use allocvec::prelude::*;
//!
//! let a: Vector<i32> = vector![1, 2];
//! let b: Vector<i32> = vector![1, 2];
//! assert!(a == b);
//! ```
//!
//! ```
//! use allocvec::prelude::*;
//!
//! let a: Vector<i32> = vector![1, 2];
//! let b: Vector<i32> = vector![1, 2];
//! assert_eq!(&a[..], &b[..]);
//! ```

use crate::allocator::{Allocator, Global};
use crate::error::VectorError;
use crate::into_iter::IntoIter;
use crate::raw::{self, capacity_overflow};
use alloc::alloc::handle_alloc_error;
use core::marker::PhantomData;
use core::mem::{self, ManuallyDrop};
use core::ptr::{self, NonNull};

#[inline(never)]
#[cold]
fn empty_vector(op: &str) -> ! {
    panic!("{} called on an empty vector", op)
}

#[inline(never)]
#[cold]
fn position_out_of_bounds(op: &str, pos: usize, len: usize) -> ! {
    panic!("{} position {} is out of bounds for length {}", op, pos, len)
}

/// A contiguous growable array with a pluggable allocator strategy.
///
/// Slots `[0, len)` hold live elements, slots `[len, capacity)` are raw storage. Storage is
/// obtained from, and returned to, the strategy `A`; element lifetimes begin and end through
/// [`Allocator::construct`] and [`Allocator::destroy`].
///
/// A vector can be sent to or shared with another thread exactly when its elements and its
/// strategy can:
///
/// ```
/// use allocvec::Vector;
/// let v: Vector<String> = Vector::from_elem(2, "x".to_string());
/// let handle = std::thread::spawn(move || v.len());
/// assert_eq!(handle.join().unwrap(), 2);
/// ```
///
/// ```compile_fail
/// use allocvec::Vector;
/// use std::rc::Rc;
/// let v: Vector<Rc<u8>> = Vector::from_elem(2, Rc::new(1));
/// std::thread::spawn(move || v.len());
/// ```
///
/// ```text
/// Vector
/// +-----+-----+----------+-------+
/// | ptr | len | capacity | alloc |
/// +-----+-----+----------+-------+
///    |
///    v
///    +------+------+------+------+------+-----+------+
///    | live | live | live | raw  | raw  | ... | raw  |
///    +------+------+------+------+------+-----+------+
///    |<------ len ------->|
///    |<----------------- capacity ----------------->|
/// ```
pub struct Vector<T, A: Allocator = Global> {
    // Dangling whenever no block is held, see `raw::holds_block`.
    ptr: NonNull<T>,
    len: usize,
    capacity: usize,
    alloc: A,
    _owns: PhantomData<T>,
}

// Safety: the vector owns its elements and its strategy outright, and `&Vector` only hands out
// `&T` and `&A`. There is no internal synchronization; sharing follows `T` and `A`.
unsafe impl<T: Send, A: Allocator + Send> Send for Vector<T, A> {}
unsafe impl<T: Sync, A: Allocator + Sync> Sync for Vector<T, A> {}

impl<T> Vector<T, Global> {
    /// Creates an empty vector. Does not allocate.
    ///
    /// # Examples
    ///
    /// ```
    /// use allocvec::Vector;
    /// let v: Vector<String> = Vector::new();
    /// assert_eq!((v.len(), v.capacity()), (0, 0));
    /// ```
    #[inline]
    pub const fn new() -> Self {
        Vector {
            ptr: NonNull::dangling(),
            len: 0,
            capacity: 0,
            alloc: Global,
            _owns: PhantomData,
        }
    }

    /// Creates a vector of `len` clones of `value`, with capacity exactly `len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use allocvec::Vector;
    /// let v = Vector::from_elem(3, "ab".to_string());
    /// assert_eq!(&v[..], &["ab", "ab", "ab"]);
    /// assert_eq!(v.capacity(), 3);
    /// ```
    pub fn from_elem(len: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::from_elem_in(len, value, Global)
    }

    /// Creates a vector of `len` default values, with capacity exactly `len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use allocvec::Vector;
    /// let v: Vector<u8> = Vector::with_len(4);
    /// assert_eq!(&v[..], &[0, 0, 0, 0]);
    /// ```
    pub fn with_len(len: usize) -> Self
    where
        T: Default,
    {
        Self::with_len_in(len, Global)
    }

    /// Creates a vector holding clones of `src`, with capacity exactly `src.len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use allocvec::Vector;
    /// let words = ["a", "b", "c", "d"];
    /// let v = Vector::from_slice(&words[1..3]);
    /// assert_eq!(&v[..], &["b", "c"]);
    /// assert_eq!(v.capacity(), 2);
    /// ```
    pub fn from_slice(src: &[T]) -> Self
    where
        T: Clone,
    {
        Self::from_slice_in(src, Global)
    }
}

impl<T, A: Allocator> Vector<T, A> {
    /// Capacity of the first block a growing vector allocates.
    pub const INITIAL_CAPACITY: usize = 16;

    /// Factor by which a full vector multiplies its capacity when it grows.
    pub const GROWTH_FACTOR: usize = 2;

    /// Creates an empty vector that will allocate through `alloc`. Does not allocate.
    ///
    /// # Examples
    ///
    /// ```
    /// use allocvec::prelude::*;
    /// let v: Vector<u32, Global> = Vector::new_in(Global);
    /// assert!(v.is_empty());
    /// ```
    #[inline]
    pub const fn new_in(alloc: A) -> Self {
        Vector {
            ptr: NonNull::dangling(),
            len: 0,
            capacity: 0,
            alloc,
            _owns: PhantomData,
        }
    }

    /// [`Vector::from_elem`], allocating through `alloc`.
    pub fn from_elem_in(len: usize, value: T, alloc: A) -> Self
    where
        T: Clone,
    {
        let mut v = Self::new_in(alloc);
        v.reallocate(len);
        for _ in 0..len {
            // Safety: capacity is exactly `len`.
            unsafe { v.construct_at_end(value.clone()) };
        }
        v
    }

    /// [`Vector::with_len`], allocating through `alloc`.
    pub fn with_len_in(len: usize, alloc: A) -> Self
    where
        T: Default,
    {
        let mut v = Self::new_in(alloc);
        v.resize_with(len, T::default);
        v
    }

    /// [`Vector::from_slice`], allocating through `alloc`.
    pub fn from_slice_in(src: &[T], alloc: A) -> Self
    where
        T: Clone,
    {
        let mut v = Self::new_in(alloc);
        v.reallocate(src.len());
        for elem in src {
            // Safety: capacity is exactly `src.len()`.
            unsafe { v.construct_at_end(elem.clone()) };
        }
        v
    }

    /// Moves the contents out, leaving `self` empty with no storage.
    ///
    /// Neither the elements nor the storage are touched: the returned vector owns the original
    /// block. `self` keeps a clone of the strategy.
    ///
    /// # Examples
    ///
    /// ```
    /// use allocvec::prelude::*;
    /// let mut a: Vector<i32> = vector![1, 2, 3];
    /// let ptr = a.as_ptr();
    /// let b = a.take();
    /// assert_eq!(b.as_ptr(), ptr);
    /// assert_eq!(&b[..], &[1, 2, 3]);
    /// assert_eq!((a.len(), a.capacity()), (0, 0));
    /// ```
    pub fn take(&mut self) -> Self
    where
        A: Clone,
    {
        let empty = Self::new_in(self.alloc.clone());
        mem::replace(self, empty)
    }

    /// Move-assigns `source` into `self`.
    ///
    /// Destroys the elements of `self` and releases its storage, then adopts the storage,
    /// length, capacity and strategy of `source`. `source` is left empty with no storage,
    /// holding the strategy `self` had before.
    ///
    /// # Examples
    ///
    /// ```
    /// use allocvec::prelude::*;
    /// let mut dst: Vector<&str> = vector!["old"];
    /// let mut src: Vector<&str> = vector!["new", "values"];
    /// dst.move_from(&mut src);
    /// assert_eq!(&dst[..], &["new", "values"]);
    /// assert_eq!((src.len(), src.capacity()), (0, 0));
    /// ```
    pub fn move_from(&mut self, source: &mut Self) {
        self.clear_and_release();
        mem::swap(self, source);
    }

    /// The strategy this vector allocates through.
    #[inline]
    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Number of live elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether there are no live elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of slots allocated, live or not.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Largest capacity this element type supports.
    ///
    /// # Examples
    ///
    /// ```
    /// use allocvec::Vector;
    /// let v: Vector<u32> = Vector::new();
    /// assert_eq!(v.max_size(), isize::MAX as usize / 4);
    /// ```
    #[inline]
    pub fn max_size(&self) -> usize {
        raw::max_slots::<T>()
    }

    /// The live elements as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // Safety: [0, len) are live, and `ptr` is dangling-but-aligned when len is 0.
        unsafe { core::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    /// The live elements as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // Safety: as in `as_slice`, and `&mut self` is unique.
        unsafe { core::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }

    /// Address of the first slot. Dangling (non-null but not dereferenceable) when nothing is
    /// allocated.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    /// Mutable address of the first slot. Dangling when nothing is allocated.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Bounds-checked access.
    ///
    /// # Examples
    ///
    /// ```
    /// use allocvec::prelude::*;
    /// use allocvec::VectorError;
    /// let v: Vector<char> = vector!['x', 'y'];
    /// assert_eq!(v.at(1), Ok(&'y'));
    /// assert_eq!(v.at(2), Err(VectorError::OutOfRange { index: 2, len: 2 }));
    /// ```
    #[inline]
    pub fn at(&self, index: usize) -> Result<&T, VectorError> {
        let len = self.len;
        self.as_slice()
            .get(index)
            .ok_or(VectorError::OutOfRange { index, len })
    }

    /// Bounds-checked mutable access.
    #[inline]
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, VectorError> {
        let len = self.len;
        self.as_mut_slice()
            .get_mut(index)
            .ok_or(VectorError::OutOfRange { index, len })
    }

    /// The first element.
    ///
    /// # Panics
    ///
    /// Panics if the vector is empty.
    #[inline]
    pub fn front(&self) -> &T {
        self.as_slice()
            .first()
            .unwrap_or_else(|| empty_vector("front"))
    }

    /// The first element, mutably.
    ///
    /// # Panics
    ///
    /// Panics if the vector is empty.
    #[inline]
    pub fn front_mut(&mut self) -> &mut T {
        self.as_mut_slice()
            .first_mut()
            .unwrap_or_else(|| empty_vector("front_mut"))
    }

    /// The last element.
    ///
    /// # Panics
    ///
    /// Panics if the vector is empty.
    #[inline]
    pub fn back(&self) -> &T {
        self.as_slice()
            .last()
            .unwrap_or_else(|| empty_vector("back"))
    }

    /// The last element, mutably.
    ///
    /// # Panics
    ///
    /// Panics if the vector is empty.
    #[inline]
    pub fn back_mut(&mut self) -> &mut T {
        self.as_mut_slice()
            .last_mut()
            .unwrap_or_else(|| empty_vector("back_mut"))
    }

    /// Ensures the capacity is at least `new_capacity` elements in total.
    ///
    /// Does nothing if the capacity already suffices. Otherwise reallocates to exactly
    /// `new_capacity` slots. On error the vector is left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use allocvec::prelude::*;
    /// use allocvec::VectorError;
    /// let mut v: Vector<u64> = vector![1, 2];
    /// v.reserve(10).unwrap();
    /// assert_eq!(v.capacity(), 10);
    /// v.reserve(4).unwrap();
    /// assert_eq!(v.capacity(), 10);
    ///
    /// let max = v.max_size();
    /// assert_eq!(
    ///     v.reserve(max + 1),
    ///     Err(VectorError::LengthError { requested: max + 1, max }),
    /// );
    /// assert_eq!(&v[..], &[1, 2]);
    /// ```
    pub fn reserve(&mut self, new_capacity: usize) -> Result<(), VectorError> {
        if new_capacity <= self.capacity {
            return Ok(());
        }
        let max = self.max_size();
        if new_capacity > max {
            return Err(VectorError::LengthError {
                requested: new_capacity,
                max,
            });
        }
        self.try_reallocate(new_capacity).map_err(|err| {
            log::debug!("reserve({}) failed: {}", new_capacity, err);
            err.into()
        })
    }

    /// Reallocates so that the capacity equals the length.
    ///
    /// Releases the storage entirely when the vector is empty.
    pub fn shrink_to_fit(&mut self) {
        if self.capacity != self.len {
            self.reallocate(self.len);
        }
    }

    /// Resizes to `new_len` elements, filling new slots with `T::default()`.
    ///
    /// The storage is always reallocated to exactly `new_len` slots: surplus elements are
    /// destroyed first when shrinking.
    ///
    /// # Examples
    ///
    /// ```
    /// use allocvec::prelude::*;
    /// let mut v: Vector<i32> = vector![1, 2, 3, 4, 5];
    /// v.resize(3);
    /// assert_eq!((&v[..], v.capacity()), (&[1, 2, 3][..], 3));
    /// v.resize(5);
    /// assert_eq!((&v[..], v.capacity()), (&[1, 2, 3, 0, 0][..], 5));
    /// ```
    pub fn resize(&mut self, new_len: usize)
    where
        T: Default,
    {
        self.resize_with(new_len, T::default)
    }

    /// Resizes to `new_len` elements, filling new slots with the results of `f`.
    ///
    /// Capacity ends up exactly `new_len`, as with [`Vector::resize`].
    pub fn resize_with(&mut self, new_len: usize, mut f: impl FnMut() -> T) {
        self.truncate(new_len);
        if self.capacity != new_len {
            self.reallocate(new_len);
        }
        while self.len < new_len {
            let value = f();
            // Safety: capacity is exactly `new_len`.
            unsafe { self.construct_at_end(value) };
        }
    }

    /// Destroys every element past `new_len`. Capacity is unchanged. Does nothing if
    /// `new_len >= len`.
    pub fn truncate(&mut self, new_len: usize) {
        if new_len >= self.len {
            return;
        }
        // Shorten first: a panicking destructor leaks the rest rather than exposing them.
        let old_len = mem::replace(&mut self.len, new_len);
        for i in new_len..old_len {
            unsafe {
                let slot = self.slot(i);
                self.alloc.destroy(slot);
            }
        }
    }

    /// Destroys every element. Capacity is unchanged.
    #[inline]
    pub fn clear(&mut self) {
        self.truncate(0)
    }

    /// Appends `value`, growing the storage if it is full.
    ///
    /// # Examples
    ///
    /// ```
    /// use allocvec::Vector;
    /// let mut v = Vector::new();
    /// for i in 0..17 {
    ///     v.push_back(i);
    /// }
    /// assert_eq!(v.len(), 17);
    /// assert_eq!(v.capacity(), 32);
    /// ```
    #[inline]
    pub fn push_back(&mut self, value: T) {
        self.grow_if_full();
        // Safety: `grow_if_full` left a spare slot.
        unsafe { self.construct_at_end(value) };
    }

    /// Appends the value produced by `f`, growing the storage first if it is full. Returns a
    /// reference to the new element.
    ///
    /// # Examples
    ///
    /// ```
    /// use allocvec::Vector;
    /// let mut v: Vector<String> = Vector::new();
    /// v.emplace_back(|| "hi".repeat(2)).push('!');
    /// assert_eq!(&v[..], &["hihi!"]);
    /// ```
    #[inline]
    pub fn emplace_back(&mut self, f: impl FnOnce() -> T) -> &mut T {
        self.grow_if_full();
        let value = f();
        // Safety: `grow_if_full` left a spare slot.
        unsafe { self.construct_at_end(value) };
        self.back_mut()
    }

    /// Destroys the last element.
    ///
    /// # Panics
    ///
    /// Panics if the vector is empty.
    #[inline]
    pub fn pop_back(&mut self) {
        if self.len == 0 {
            empty_vector("pop_back")
        }
        self.len -= 1;
        unsafe {
            let slot = self.slot(self.len);
            self.alloc.destroy(slot);
        }
    }

    /// Moves the last element out, or returns `None` if the vector is empty.
    ///
    /// The value is handed over, not destroyed: the strategy's
    /// [`destroy`][Allocator::destroy] is not called for it.
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        // Safety: the slot was live and is now past the end.
        Some(unsafe { ptr::read(self.slot(self.len).as_ptr()) })
    }

    /// Inserts `value` at position `pos`, shifting everything from `pos` onwards one slot to the
    /// right. Returns `pos`.
    ///
    /// `pos == len()` appends. Fails with [`VectorError::OutOfRange`] if `pos > len()`, in which
    /// case the vector is untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use allocvec::prelude::*;
    /// let mut v: Vector<i32> = vector![1, 2, 3];
    /// assert_eq!(v.insert(1, 99), Ok(1));
    /// assert_eq!(&v[..], &[1, 99, 2, 3]);
    /// assert!(v.insert(5, 0).is_err());
    /// ```
    #[inline]
    pub fn insert(&mut self, pos: usize, value: T) -> Result<usize, VectorError> {
        self.emplace(pos, || value)
    }

    /// Inserts the value produced by `f` at position `pos`, constructing it directly in its final
    /// slot. Returns `pos`.
    ///
    /// `f` runs before any element is shifted, so a panic in `f` leaves the vector as it was
    /// (apart from possibly larger capacity). Fails with [`VectorError::OutOfRange`] if
    /// `pos > len()`, without calling `f`.
    pub fn emplace(&mut self, pos: usize, f: impl FnOnce() -> T) -> Result<usize, VectorError> {
        let len = self.len;
        if pos > len {
            return Err(VectorError::OutOfRange { index: pos, len });
        }
        if pos == len {
            self.emplace_back(f);
            return Ok(pos);
        }
        self.grow_if_full();
        let value = f();
        // While the hole exists, only the prefix before `pos` is counted as live.
        self.len = pos;
        unsafe {
            let slot = self.slot(pos);
            ptr::copy(slot.as_ptr(), slot.as_ptr().add(1), len - pos);
            self.alloc.construct(slot, value);
        }
        self.len = len + 1;
        Ok(pos)
    }

    /// Destroys the element at `pos`, shifting everything after it one slot to the left. Returns
    /// `pos`, which now indexes the following element (or equals `len()` if the last element was
    /// erased).
    ///
    /// # Panics
    ///
    /// Panics if `pos >= len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use allocvec::prelude::*;
    /// let mut v: Vector<i32> = vector![1, 2, 3, 4, 5];
    /// assert_eq!(v.erase(1), 1);
    /// assert_eq!(&v[..], &[1, 3, 4, 5]);
    /// ```
    pub fn erase(&mut self, pos: usize) -> usize {
        let len = self.len;
        if pos >= len {
            position_out_of_bounds("erase", pos, len)
        }
        // While the hole exists, only the prefix before `pos` is counted as live.
        self.len = pos;
        unsafe {
            let slot = self.slot(pos);
            self.alloc.destroy(slot);
            ptr::copy(slot.as_ptr().add(1), slot.as_ptr(), len - pos - 1);
        }
        self.len = len - 1;
        pos
    }

    /// Moves the element at `pos` out, shifting everything after it one slot to the left. As with
    /// [`Vector::pop`], the strategy does not see the value leave.
    ///
    /// # Panics
    ///
    /// Panics if `pos >= len()`.
    pub fn remove(&mut self, pos: usize) -> T {
        let len = self.len;
        if pos >= len {
            position_out_of_bounds("remove", pos, len)
        }
        unsafe {
            let slot = self.slot(pos);
            let value = ptr::read(slot.as_ptr());
            ptr::copy(slot.as_ptr().add(1), slot.as_ptr(), len - pos - 1);
            self.len = len - 1;
            value
        }
    }

    /// Exchanges storage, length, capacity and strategy with `other`. No element moves.
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other)
    }

    /// Splits into raw parts without running the destructor.
    pub(crate) fn into_raw_parts(self) -> (NonNull<T>, usize, usize, A) {
        let me = ManuallyDrop::new(self);
        // Safety: `me` is never dropped, so `alloc` is read out exactly once.
        let alloc = unsafe { ptr::read(&me.alloc) };
        (me.ptr, me.len, me.capacity, alloc)
    }

    /// # Safety
    ///
    /// `index` must be below `capacity`.
    #[inline(always)]
    unsafe fn slot(&self, index: usize) -> NonNull<T> {
        NonNull::new_unchecked(self.ptr.as_ptr().add(index))
    }

    /// # Safety
    ///
    /// There must be a spare slot: `len < capacity`.
    #[inline(always)]
    unsafe fn construct_at_end(&mut self, value: T) {
        debug_assert!(self.len < self.capacity);
        let slot = self.slot(self.len);
        self.alloc.construct(slot, value);
        self.len += 1;
    }

    #[inline(always)]
    fn grow_if_full(&mut self) {
        if self.len == self.capacity {
            self.grow();
        }
    }

    #[inline(never)]
    #[cold]
    fn grow(&mut self) {
        let new_capacity = if self.capacity == 0 {
            Self::INITIAL_CAPACITY
        } else {
            self.capacity
                .checked_mul(Self::GROWTH_FACTOR)
                .unwrap_or_else(|| capacity_overflow())
        };
        if new_capacity > self.max_size() {
            capacity_overflow()
        }
        self.reallocate(new_capacity);
    }

    /// Moves the live elements into a fresh block of exactly `new_capacity` slots and releases
    /// the old one. Aborts through `handle_alloc_error` if the strategy refuses.
    fn reallocate(&mut self, new_capacity: usize) {
        if self.try_reallocate(new_capacity).is_err() {
            handle_alloc_error(raw::slots_layout::<T>(new_capacity))
        }
    }

    /// The new block is acquired before anything else is touched, so an error leaves the vector
    /// exactly as it was.
    fn try_reallocate(&mut self, new_capacity: usize) -> Result<(), crate::allocator::AllocError> {
        debug_assert!(new_capacity >= self.len);
        let new_ptr = raw::allocate_slots::<T, A>(&mut self.alloc, new_capacity)?;
        log::trace!(
            "relocating {} elements: capacity {} -> {}",
            self.len,
            self.capacity,
            new_capacity
        );
        unsafe {
            // Safety: distinct blocks (or both dangling with nothing to copy).
            ptr::copy_nonoverlapping(self.ptr.as_ptr(), new_ptr.as_ptr(), self.len);
            let old_ptr = mem::replace(&mut self.ptr, new_ptr);
            let old_capacity = mem::replace(&mut self.capacity, new_capacity);
            // Safety: every live element was relocated above.
            raw::release_slots::<T, A>(&mut self.alloc, old_ptr, old_capacity);
        }
        Ok(())
    }

    fn clear_and_release(&mut self) {
        self.clear();
        let ptr = mem::replace(&mut self.ptr, NonNull::dangling());
        let capacity = mem::replace(&mut self.capacity, 0);
        // Safety: no element is live any more.
        unsafe { raw::release_slots::<T, A>(&mut self.alloc, ptr, capacity) };
    }
}

impl<T, A: Allocator> Drop for Vector<T, A> {
    fn drop(&mut self) {
        self.clear_and_release();
    }
}

/// Clones the elements into a block with the same capacity as the source.
///
/// # Examples
///
/// ```
/// use allocvec::prelude::*;
/// let mut a: Vector<i32> = vector![1, 2];
/// a.reserve(10).unwrap();
/// let b = a.clone();
/// assert_eq!(b.capacity(), 10);
/// a[0] = 7;
/// assert_eq!(&b[..], &[1, 2]);
/// ```
impl<T: Clone, A: Allocator + Clone> Clone for Vector<T, A> {
    fn clone(&self) -> Self {
        let mut v = Self::new_in(self.alloc.clone());
        v.clone_elements_from(self);
        v
    }

    /// Copy-assignment: destroys the current elements, releases the storage and clones
    /// `source` into a block of `source.capacity()` slots. The strategy of `self` is kept.
    fn clone_from(&mut self, source: &Self) {
        self.clear_and_release();
        self.clone_elements_from(source);
    }
}

impl<T: Clone, A: Allocator> Vector<T, A> {
    fn clone_elements_from(&mut self, source: &Self) {
        debug_assert!(self.capacity == 0);
        self.reallocate(source.capacity);
        for elem in source.as_slice() {
            // Safety: capacity matches the source, which holds at most that many elements.
            unsafe { self.construct_at_end(elem.clone()) };
        }
    }
}

impl<T, A: Allocator> core::ops::Deref for Vector<T, A> {
    type Target = [T];
    #[inline]
    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, A: Allocator> core::ops::DerefMut for Vector<T, A> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, A: Allocator> AsRef<[T]> for Vector<T, A> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, A: Allocator> AsMut<[T]> for Vector<T, A> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T: core::fmt::Debug, A: Allocator> core::fmt::Debug for Vector<T, A> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl<T, A: Allocator + Default> Default for Vector<T, A> {
    fn default() -> Self {
        Self::new_in(A::default())
    }
}

/// Moves the array's elements in, with capacity exactly `N`.
///
/// # Examples
///
/// ```
/// use allocvec::Vector;
/// let v = Vector::from([String::from("a"), String::from("b")]);
/// assert_eq!(&v[..], &["a", "b"]);
/// assert_eq!(v.capacity(), 2);
/// ```
impl<T, const N: usize> From<[T; N]> for Vector<T, Global> {
    fn from(array: [T; N]) -> Self {
        let mut v = Vector::new();
        v.reallocate(N);
        for elem in array {
            // Safety: capacity is exactly N.
            unsafe { v.construct_at_end(elem) };
        }
        v
    }
}

impl<T: Clone> From<&[T]> for Vector<T, Global> {
    fn from(src: &[T]) -> Self {
        Vector::from_slice(src)
    }
}

impl<T, A: Allocator> Extend<T> for Vector<T, A> {
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        for elem in iter {
            self.push_back(elem);
        }
    }
}

impl<T> FromIterator<T> for Vector<T, Global> {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut v = Vector::new();
        v.extend(iter);
        v
    }
}

impl<'a, T, A: Allocator> IntoIterator for &'a Vector<T, A> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'a, T, A: Allocator> IntoIterator for &'a mut Vector<T, A> {
    type Item = &'a mut T;
    type IntoIter = core::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_slice().iter_mut()
    }
}

impl<T, A: Allocator> IntoIterator for Vector<T, A> {
    type Item = T;
    type IntoIter = IntoIter<T, A>;

    fn into_iter(self) -> IntoIter<T, A> {
        let (ptr, len, capacity, alloc) = self.into_raw_parts();
        // Safety: the parts come straight from a vector that is no longer dropped.
        unsafe { IntoIter::from_raw_parts(ptr, len, capacity, alloc) }
    }
}
