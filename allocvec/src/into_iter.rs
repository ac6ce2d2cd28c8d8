//! By-value iteration over a [`Vector`](crate::Vector).

use crate::allocator::{Allocator, Global};
use crate::raw;
use core::marker::PhantomData;
use core::ptr::NonNull;

/// Iterates over the elements of a vector by value.
///
/// Yielded elements are moved out without going through the strategy. Elements not yet yielded
/// are destroyed through the strategy when the iterator is dropped, and then the storage is
/// returned to it.
///
/// # Examples
///
/// ```
/// use allocvec::prelude::*;
/// let v: Vector<String> = vector!["a".to_string(), "b".to_string(), "c".to_string()];
/// let mut iter = v.into_iter();
/// assert_eq!(iter.next().as_deref(), Some("a"));
/// assert_eq!(iter.next_back().as_deref(), Some("c"));
/// assert_eq!(iter.len(), 1);
/// drop(iter); // Destroys "b" and releases the storage.
/// ```
pub struct IntoIter<T, A: Allocator = Global> {
    buf: NonNull<T>,
    capacity: usize,
    // Live elements are exactly `[start, end)`.
    start: usize,
    end: usize,
    alloc: A,
    marker: PhantomData<T>,
}

// Safety: as for `Vector`, the iterator owns the remaining elements and the strategy.
unsafe impl<T: Send, A: Allocator + Send> Send for IntoIter<T, A> {}
unsafe impl<T: Sync, A: Allocator + Sync> Sync for IntoIter<T, A> {}

impl<T, A: Allocator> IntoIter<T, A> {
    /// # Safety
    ///
    /// The parts must describe a vector's storage whose first `len` slots are live, and which
    /// nothing else will drop or release.
    pub(crate) unsafe fn from_raw_parts(buf: NonNull<T>, len: usize, capacity: usize, alloc: A) -> Self {
        IntoIter {
            buf,
            capacity,
            start: 0,
            end: len,
            alloc,
            marker: PhantomData,
        }
    }

    /// The elements not yet yielded.
    ///
    /// # Examples
    ///
    /// ```
    /// use allocvec::prelude::*;
    /// let mut iter = Vector::from([1, 2, 3]).into_iter();
    /// iter.next();
    /// assert_eq!(iter.as_slice(), &[2, 3]);
    /// ```
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        unsafe { core::slice::from_raw_parts(self.buf.as_ptr().add(self.start), self.end - self.start) }
    }

    /// The strategy the storage will be returned to.
    #[inline]
    pub fn allocator(&self) -> &A {
        &self.alloc
    }
}

impl<T, A: Allocator> Iterator for IntoIter<T, A> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        if self.start < self.end {
            let t = unsafe { self.buf.as_ptr().add(self.start).read() };
            self.start += 1;
            Some(t)
        } else {
            None
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.end - self.start;
        (len, Some(len))
    }

    #[inline]
    fn count(self) -> usize {
        self.end - self.start
    }
}

impl<T, A: Allocator> DoubleEndedIterator for IntoIter<T, A> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        if self.start < self.end {
            self.end -= 1;
            Some(unsafe { self.buf.as_ptr().add(self.end).read() })
        } else {
            None
        }
    }
}

impl<T, A: Allocator> ExactSizeIterator for IntoIter<T, A> {
    #[inline]
    fn len(&self) -> usize {
        self.end - self.start
    }
}

impl<T, A: Allocator> core::iter::FusedIterator for IntoIter<T, A> {}

impl<T: core::fmt::Debug, A: Allocator> core::fmt::Debug for IntoIter<T, A> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

impl<T, A: Allocator> Drop for IntoIter<T, A> {
    fn drop(&mut self) {
        while self.start < self.end {
            let slot = unsafe { NonNull::new_unchecked(self.buf.as_ptr().add(self.start)) };
            self.start += 1;
            unsafe { self.alloc.destroy(slot) };
        }
        unsafe {
            // Safety: every element has been yielded or destroyed.
            raw::release_slots::<T, A>(&mut self.alloc, self.buf, self.capacity);
        }
    }
}
