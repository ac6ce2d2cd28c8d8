//! Example allocator strategies and element types for `allocvec`, and the tests that use them to
//! check what a vector does with its storage and its elements.
//!
//! * [`CountingAllocator`] forwards to the global allocator and counts every call.
//! * [`Tracker`] hands out [`Tracked`] values that count their own clones and drops.
//! * [`init_logging`] sends the crate's `log` output to a `tracing` subscriber.

pub mod counting;
pub mod logging;
pub mod tracker;

pub use counting::{CountingAllocator, Stats};
pub use logging::init_logging;
pub use tracker::{Tracked, Tracker};

#[cfg(test)]
mod tests {
    use super::*;
    use allocvec::allocator::AllocError;
    use allocvec::bump::BumpAlloc;
    use allocvec::prelude::*;
    use std::panic::{catch_unwind, AssertUnwindSafe};

    fn ids<A: Allocator>(v: &Vector<Tracked, A>) -> Vec<u32> {
        v.iter().map(|t| t.id).collect()
    }

    fn tracked_vector(
        tracker: &Tracker,
        counter: &CountingAllocator,
        n: u32,
    ) -> Vector<Tracked, CountingAllocator> {
        let mut v = Vector::new_in(counter.clone());
        for id in 0..n {
            v.push_back(tracker.make(id));
        }
        v
    }

    #[test]
    fn growth_releases_every_block() {
        init_logging();
        let counter = CountingAllocator::new();
        let mut v = Vector::new_in(counter.clone());
        for i in 0..100u64 {
            v.push_back(i);
        }
        let stats = counter.stats();
        // 16, 32, 64 and 128 slots, only the last still held.
        assert_eq!((stats.allocations, stats.deallocations), (4, 3));
        assert_eq!(stats.live_bytes, 128 * 8);
        drop(v);
        let stats = counter.stats();
        assert_eq!(stats.live_blocks(), 0);
        assert_eq!(stats.live_bytes, 0);
        assert_eq!((stats.constructs, stats.destroys), (100, 100));
    }

    #[test]
    fn relocation_constructs_nothing() {
        let tracker = Tracker::new();
        let counter = CountingAllocator::new();
        let v = tracked_vector(&tracker, &counter, 17);
        assert_eq!(v.capacity(), 32);
        assert_eq!(counter.stats().constructs, 17);
        assert_eq!(tracker.cloned(), 0);
        assert_eq!(tracker.live(), 17);
    }

    #[test]
    fn take_and_move_from_transfer_storage() {
        let tracker = Tracker::new();
        let counter = CountingAllocator::new();
        let mut v = Vector::from_elem_in(4, tracker.make(1), counter.clone());
        assert_eq!(tracker.live(), 4);
        assert_eq!(counter.stats().constructs, 4);

        let mut w = v.take();
        let mut x = Vector::new_in(counter.clone());
        x.move_from(&mut w);

        let stats = counter.stats();
        assert_eq!((stats.constructs, stats.allocations), (4, 1));
        assert_eq!((v.len(), v.capacity(), w.len(), w.capacity()), (0, 0, 0, 0));
        assert_eq!(x.len(), 4);
        assert_eq!(tracker.cloned(), 4);

        drop(x);
        assert_eq!(tracker.live(), 0);
        assert_eq!(counter.stats().destroys, 4);
        assert_eq!(counter.stats().live_blocks(), 0);
    }

    #[test]
    fn move_from_destroys_the_old_contents() {
        let tracker = Tracker::new();
        let counter = CountingAllocator::new();
        let mut dst = tracked_vector(&tracker, &counter, 3);
        let mut src = tracked_vector(&tracker, &counter, 2);
        dst.move_from(&mut src);
        assert_eq!(ids(&dst), [0, 1]);
        assert_eq!(tracker.live(), 2);
        assert_eq!(counter.stats().live_blocks(), 1);
    }

    #[test]
    fn swap_exchanges_strategies() {
        let left_counter = CountingAllocator::new();
        let right_counter = CountingAllocator::new();
        let mut a = Vector::from_slice_in(&[1u32, 2, 3], left_counter.clone());
        let mut b = Vector::from_slice_in(&[7u32], right_counter.clone());
        a.swap(&mut b);
        assert_eq!((&a[..], &b[..]), (&[7][..], &[1, 2, 3][..]));

        drop(a);
        let right = right_counter.stats();
        assert_eq!((right.live_blocks(), right.destroys), (0, 1));
        assert_eq!(left_counter.stats().live_blocks(), 1);

        drop(b);
        let left = left_counter.stats();
        assert_eq!((left.live_blocks(), left.destroys), (0, 3));
    }

    #[test]
    fn move_from_hands_the_old_strategy_to_the_source() {
        let dst_counter = CountingAllocator::new();
        let src_counter = CountingAllocator::new();
        let mut dst = Vector::from_slice_in(&[1u32, 2, 3], dst_counter.clone());
        let mut src = Vector::from_slice_in(&[8u32, 9], src_counter.clone());
        dst.move_from(&mut src);

        // The old contents went back through the destination's own strategy.
        let old = dst_counter.stats();
        assert_eq!((old.destroys, old.live_blocks()), (3, 0));
        assert_eq!(&dst[..], &[8, 9]);

        // The emptied source now allocates through the destination's former strategy.
        src.push_back(5);
        assert_eq!(dst_counter.stats().allocations, 2);
        assert_eq!(src_counter.stats().allocations, 1);

        drop(dst);
        let adopted = src_counter.stats();
        assert_eq!((adopted.destroys, adopted.live_blocks()), (2, 0));
        drop(src);
        assert_eq!(dst_counter.stats().live_blocks(), 0);
    }

    #[test]
    fn moved_out_values_bypass_the_strategy() {
        let tracker = Tracker::new();
        let counter = CountingAllocator::new();
        let mut v = tracked_vector(&tracker, &counter, 4);
        let last = v.pop().unwrap();
        let first = v.remove(0);
        assert_eq!((first.id, last.id), (0, 3));
        let stats = counter.stats();
        assert_eq!(stats.destroys, 0);
        assert_eq!(stats.live_elements(), v.len() + 2);

        let mut iter = v.into_iter();
        let second = iter.next().unwrap();
        assert_eq!(second.id, 1);
        drop(iter);
        // Only the element still inside the iterator went through `destroy`.
        let stats = counter.stats();
        assert_eq!((stats.destroys, stats.live_blocks()), (1, 0));
        assert_eq!(tracker.live(), 3);
    }

    #[test]
    fn erase_destroys_exactly_one() {
        let tracker = Tracker::new();
        let counter = CountingAllocator::new();
        let mut v = tracked_vector(&tracker, &counter, 5);
        assert_eq!(v.erase(2), 2);
        assert_eq!(ids(&v), [0, 1, 3, 4]);
        assert_eq!(counter.stats().destroys, 1);
        assert_eq!(tracker.live(), 4);
        assert_eq!(v.capacity(), 16);
    }

    #[test]
    fn insert_constructs_exactly_one() {
        let tracker = Tracker::new();
        let counter = CountingAllocator::new();
        let mut v = tracked_vector(&tracker, &counter, 3);
        assert_eq!(v.insert(1, tracker.make(9)), Ok(1));
        assert_eq!(ids(&v), [0, 9, 1, 2]);
        assert_eq!(counter.stats().constructs, 4);
        assert_eq!(counter.stats().destroys, 0);

        let err = v.insert(7, tracker.make(8)).unwrap_err();
        assert_eq!(err, VectorError::OutOfRange { index: 7, len: 4 });
        assert_eq!(ids(&v), [0, 9, 1, 2]);
        // The rejected value was dropped, never constructed in the vector.
        assert_eq!(counter.stats().constructs, 4);
        assert_eq!(tracker.live(), 4);
    }

    #[test]
    fn resize_reallocates_to_the_exact_length() {
        let counter = CountingAllocator::new();
        let mut v = Vector::from_elem_in(5, 1u32, counter.clone());
        v.resize(3);
        assert_eq!((&v[..], v.capacity()), (&[1, 1, 1][..], 3));
        assert_eq!(counter.stats().destroys, 2);
        v.resize(7);
        assert_eq!((&v[..], v.capacity()), (&[1, 1, 1, 0, 0, 0, 0][..], 7));
        let stats = counter.stats();
        assert_eq!((stats.constructs, stats.allocations), (9, 3));
        assert_eq!(stats.live_bytes, 7 * 4);
    }

    #[test]
    fn clone_preserves_capacity_and_counts_constructs() {
        let counter = CountingAllocator::new();
        let mut a = Vector::from_slice_in(&[1u16, 2, 3], counter.clone());
        a.reserve(10).unwrap();
        let b = a.clone();
        assert_eq!(b.capacity(), 10);
        assert_eq!(&b[..], &[1, 2, 3]);
        let stats = counter.stats();
        assert_eq!(stats.constructs, 6);
        assert_eq!(stats.live_bytes, 2 * 10 * 2);
    }

    #[test]
    fn clone_from_keeps_the_destination_strategy() {
        let source_counter = CountingAllocator::new();
        let dest_counter = CountingAllocator::new();
        let a = Vector::from_slice_in(&[1u8, 2], source_counter.clone());
        let mut c = Vector::from_elem_in(5, 0u8, dest_counter.clone());
        c.clone_from(&a);
        assert_eq!(&c[..], &[1, 2]);
        assert_eq!(c.capacity(), 2);

        let dest = dest_counter.stats();
        assert_eq!((dest.allocations, dest.deallocations), (2, 1));
        assert_eq!((dest.constructs, dest.destroys), (7, 5));
        assert_eq!(source_counter.stats().allocations, 1);
    }

    #[test]
    fn refused_reserve_leaves_the_vector_unchanged() {
        init_logging();
        let counter = CountingAllocator::with_limit(96);
        let mut v = Vector::new_in(counter.clone());
        for i in 0..3u32 {
            v.push_back(i);
        }
        let ptr = v.as_ptr();
        assert_eq!(v.reserve(17), Err(VectorError::AllocFailed(AllocError)));
        assert_eq!((&v[..], v.capacity(), v.as_ptr()), (&[0, 1, 2][..], 16, ptr));
        assert_eq!(counter.stats().refusals, 1);

        let max = v.max_size();
        assert_eq!(
            v.reserve(max + 1),
            Err(VectorError::LengthError { requested: max + 1, max })
        );
        // Rejected before the strategy is asked.
        assert_eq!(counter.stats().refusals, 1);

        v.shrink_to_fit();
        assert_eq!(v.capacity(), 3);
        assert_eq!(counter.stats().live_bytes, 12);
    }

    #[test]
    fn panicking_clone_during_fill_leaks_nothing() {
        let tracker = Tracker::new();
        let counter = CountingAllocator::new();
        tracker.fail_clone_after(2);
        let value = tracker.make(9);
        let result = catch_unwind(AssertUnwindSafe(|| {
            Vector::from_elem_in(5, value, counter.clone())
        }));
        assert!(result.is_err());
        assert_eq!(tracker.live(), 0);
        let stats = counter.stats();
        assert_eq!((stats.constructs, stats.destroys), (2, 2));
        assert_eq!(stats.live_blocks(), 0);
    }

    #[test]
    fn panicking_clone_of_vector_leaks_nothing() {
        let tracker = Tracker::new();
        let counter = CountingAllocator::new();
        let v = tracked_vector(&tracker, &counter, 5);
        tracker.fail_clone_after(2);
        let result = catch_unwind(AssertUnwindSafe(|| v.clone()));
        assert!(result.is_err());

        // The partial copy was torn down; the source is intact.
        assert_eq!(ids(&v), [0, 1, 2, 3, 4]);
        assert_eq!(tracker.live(), 5);
        let stats = counter.stats();
        assert_eq!((stats.constructs, stats.destroys), (7, 2));
        assert_eq!(stats.live_blocks(), 1);

        drop(v);
        assert_eq!(tracker.live(), 0);
        assert_eq!(counter.stats().live_blocks(), 0);
    }

    #[test]
    fn panicking_fill_keeps_the_constructed_prefix() {
        let tracker = Tracker::new();
        let counter = CountingAllocator::new();
        let mut v = Vector::from_elem_in(2, tracker.make(0), counter.clone());
        let mut calls = 0;
        let result = catch_unwind(AssertUnwindSafe(|| {
            v.resize_with(6, || {
                calls += 1;
                if calls == 3 {
                    panic!("no more values");
                }
                tracker.make(calls)
            })
        }));
        assert!(result.is_err());
        assert_eq!(ids(&v), [0, 0, 1, 2]);
        assert_eq!(v.capacity(), 6);
        drop(v);
        assert_eq!(tracker.live(), 0);
    }

    #[test]
    fn panicking_emplace_leaves_elements_in_place() {
        let tracker = Tracker::new();
        let counter = CountingAllocator::new();
        let mut v = tracked_vector(&tracker, &counter, 3);
        let result = catch_unwind(AssertUnwindSafe(|| {
            v.emplace(1, || -> Tracked { panic!("no value") })
        }));
        assert!(result.is_err());
        assert_eq!(ids(&v), [0, 1, 2]);
        assert_eq!(tracker.live(), 3);
    }

    #[test]
    fn bump_arena_holds_storage_and_elements_still_drop() {
        let bump = bumpalo::Bump::new();
        let tracker = Tracker::new();
        let mut v = Vector::new_in(BumpAlloc::new(&bump));
        for id in 0..40 {
            v.push_back(tracker.make(id));
        }
        assert_eq!(v.capacity(), 64);
        assert!(bump.allocated_bytes() >= 64 * core::mem::size_of::<Tracked>());
        assert_eq!(v[39].id, 39);
        drop(v);
        assert_eq!(tracker.live(), 0);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        #[derive(Clone, Debug)]
        enum Op {
            Push(u32),
            Pop,
            Insert(usize, u32),
            Erase(usize),
            Reserve(usize),
            Resize(usize),
            ShrinkToFit,
            Clear,
        }

        fn op_strategy() -> impl Strategy<Value = Op> {
            prop_oneof![
                4 => any::<u32>().prop_map(Op::Push),
                1 => Just(Op::Pop),
                2 => (any::<usize>(), any::<u32>()).prop_map(|(p, x)| Op::Insert(p, x)),
                2 => any::<usize>().prop_map(Op::Erase),
                1 => (0usize..200).prop_map(Op::Reserve),
                1 => (0usize..100).prop_map(Op::Resize),
                1 => Just(Op::ShrinkToFit),
                1 => Just(Op::Clear),
            ]
        }

        proptest! {
            #[test]
            fn strategy_sees_exactly_the_live_state(
                ops in prop::collection::vec(op_strategy(), 0..80),
            ) {
                let counter = CountingAllocator::new();
                let mut v = Vector::new_in(counter.clone());
                // Popped values leave by move, so the strategy never sees them destroyed.
                let mut moved_out = 0;
                for op in ops {
                    match op {
                        Op::Push(x) => v.push_back(x),
                        Op::Pop => {
                            if v.pop().is_some() {
                                moved_out += 1;
                            }
                        }
                        Op::Insert(p, x) => {
                            let pos = p % (v.len() + 1);
                            prop_assert_eq!(v.insert(pos, x), Ok(pos));
                        }
                        Op::Erase(p) => {
                            if !v.is_empty() {
                                let pos = p % v.len();
                                prop_assert_eq!(v.erase(pos), pos);
                            }
                        }
                        Op::Reserve(n) => {
                            prop_assert_eq!(v.reserve(n), Ok(()));
                            prop_assert!(v.capacity() >= n);
                        }
                        Op::Resize(n) => {
                            v.resize(n);
                            prop_assert_eq!(v.capacity(), n);
                        }
                        Op::ShrinkToFit => v.shrink_to_fit(),
                        Op::Clear => v.clear(),
                    }
                    let stats = counter.stats();
                    prop_assert!(v.len() <= v.capacity());
                    prop_assert_eq!(stats.live_elements(), v.len() + moved_out);
                    prop_assert_eq!(stats.live_bytes, v.capacity() * 4);
                    prop_assert_eq!(stats.live_blocks(), (v.capacity() > 0) as usize);
                }
                drop(v);
                let stats = counter.stats();
                prop_assert_eq!(stats.live_elements(), moved_out);
                prop_assert_eq!(stats.live_blocks(), 0);
            }
        }
    }
}
