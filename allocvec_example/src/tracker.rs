//! Element values that report their own lifetimes.

use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug, Default)]
struct Counts {
    created: Cell<usize>,
    cloned: Cell<usize>,
    dropped: Cell<usize>,
    // Clones still allowed before `clone` panics; `None` means unlimited.
    clone_budget: Cell<Option<usize>>,
}

/// Hands out [`Tracked`] values and counts how many are alive.
///
/// # Examples
///
/// ```
/// use allocvec::prelude::*;
/// use allocvec_example::Tracker;
///
/// let tracker = Tracker::new();
/// let v = Vector::from_elem(3, tracker.make(7));
/// assert_eq!(tracker.live(), 3);
/// assert_eq!(tracker.cloned(), 3);
/// drop(v);
/// assert_eq!(tracker.live(), 0);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Tracker(Rc<Counts>);

impl Tracker {
    /// A tracker with nothing alive and unlimited clones.
    pub fn new() -> Self {
        Self::default()
    }

    /// A new tracked value.
    pub fn make(&self, id: u32) -> Tracked {
        self.0.created.set(self.0.created.get() + 1);
        Tracked {
            id,
            tracker: self.clone(),
        }
    }

    /// After `n` more successful clones of any value from this tracker, cloning panics.
    pub fn fail_clone_after(&self, n: usize) {
        self.0.clone_budget.set(Some(n));
    }

    /// Values created (including clones) and not yet dropped.
    pub fn live(&self) -> usize {
        self.0.created.get() - self.0.dropped.get()
    }

    /// Values produced by `clone`.
    pub fn cloned(&self) -> usize {
        self.0.cloned.get()
    }

    /// Values dropped.
    pub fn dropped(&self) -> usize {
        self.0.dropped.get()
    }
}

/// A value whose creation, cloning and dropping is counted by its [`Tracker`].
///
/// Dropping more values than were created (a double drop) panics.
#[derive(Debug)]
pub struct Tracked {
    /// Identifies the value in assertions.
    pub id: u32,
    tracker: Tracker,
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        let counts = &self.tracker.0;
        if let Some(budget) = counts.clone_budget.get() {
            if budget == 0 {
                panic!("clone budget exhausted while cloning {}", self.id);
            }
            counts.clone_budget.set(Some(budget - 1));
        }
        counts.cloned.set(counts.cloned.get() + 1);
        self.tracker.make(self.id)
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        let counts = &self.tracker.0;
        assert!(
            counts.dropped.get() < counts.created.get(),
            "value {} dropped more often than created",
            self.id
        );
        counts.dropped.set(counts.dropped.get() + 1);
    }
}
