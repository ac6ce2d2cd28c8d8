//! A strategy that counts what a vector asks of it.

use allocvec::allocator::{AllocError, Allocator, Global};
use core::alloc::Layout;
use core::ptr::NonNull;
use std::cell::Cell;
use std::rc::Rc;

/// Totals observed by a [`CountingAllocator`] and all of its clones.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    /// Blocks handed out.
    pub allocations: usize,
    /// Blocks returned.
    pub deallocations: usize,
    /// Allocation requests refused because of the byte limit.
    pub refusals: usize,
    /// Bytes currently handed out.
    pub live_bytes: usize,
    /// Element lifetimes begun.
    pub constructs: usize,
    /// Element lifetimes ended.
    pub destroys: usize,
}

impl Stats {
    /// Blocks handed out and not yet returned.
    pub fn live_blocks(&self) -> usize {
        self.allocations - self.deallocations
    }

    /// Elements constructed and not yet destroyed.
    pub fn live_elements(&self) -> usize {
        self.constructs - self.destroys
    }
}

/// Forwards to [`Global`], counting every call. Clones share their counters, so a vector, its
/// clones and the test that built them all see the same [`Stats`].
///
/// # Examples
///
/// ```
/// use allocvec::Vector;
/// use allocvec_example::CountingAllocator;
///
/// let counter = CountingAllocator::new();
/// let mut v = Vector::new_in(counter.clone());
/// for i in 0..17u32 {
///     v.push_back(i);
/// }
/// assert_eq!(counter.stats().allocations, 2);
/// assert_eq!(counter.stats().live_bytes, 32 * 4);
/// drop(v);
/// assert_eq!(counter.stats().live_blocks(), 0);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CountingAllocator {
    stats: Rc<Cell<Stats>>,
    limit: Option<usize>,
}

impl CountingAllocator {
    /// A counter without a byte limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// A counter that refuses any request that would take the live bytes above `limit`.
    pub fn with_limit(limit: usize) -> Self {
        CountingAllocator {
            stats: Rc::default(),
            limit: Some(limit),
        }
    }

    /// A snapshot of the shared counters.
    pub fn stats(&self) -> Stats {
        self.stats.get()
    }

    fn update(&self, f: impl FnOnce(&mut Stats)) {
        let mut stats = self.stats.get();
        f(&mut stats);
        self.stats.set(stats);
    }
}

unsafe impl Allocator for CountingAllocator {
    fn allocate(&mut self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        let live = self.stats().live_bytes;
        if let Some(limit) = self.limit {
            if live.saturating_add(layout.size()) > limit {
                self.update(|s| s.refusals += 1);
                return Err(AllocError);
            }
        }
        let ptr = Global.allocate(layout)?;
        self.update(|s| {
            s.allocations += 1;
            s.live_bytes += layout.size();
        });
        Ok(ptr)
    }

    unsafe fn deallocate(&mut self, ptr: NonNull<u8>, layout: Layout) {
        self.update(|s| {
            s.deallocations += 1;
            s.live_bytes -= layout.size();
        });
        Global.deallocate(ptr, layout)
    }

    unsafe fn construct<T>(&mut self, slot: NonNull<T>, value: T) {
        self.update(|s| s.constructs += 1);
        slot.as_ptr().write(value)
    }

    unsafe fn destroy<T>(&mut self, slot: NonNull<T>) {
        self.update(|s| s.destroys += 1);
        core::ptr::drop_in_place(slot.as_ptr())
    }
}
