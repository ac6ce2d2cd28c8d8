//! # `allocvec`
//! A contiguous growable array with explicit control over its allocator.
//!
//! 1. [Summary](#summary)
//! 1. [Examples](#examples)
//! 1. [Growth and capacity](#growth-and-capacity)
//! 1. [Allocator strategies](#allocator-strategies)
//! 1. [Failure behavior](#failure-behavior)
//! 1. [Feature flags](#feature-flags)
//!
//! # Summary
//!
//! [`Vector<T, A>`][crate::vector::Vector] stores its elements in one heap block, tracks how
//! many of the block's slots hold live elements (`len`) and how many exist (`capacity`), and
//! routes every allocation, deallocation, construction and destruction through an
//! [`Allocator`][crate::allocator::Allocator] strategy `A`. The default strategy,
//! [`Global`][crate::allocator::Global], uses the global allocator.
//!
//! If you want a growable array whose storage comes from somewhere you control (an arena, a
//! counting allocator in a test, a capped budget) and whose capacity follows a fixed, easy to
//! predict policy, then `allocvec` is the library for you.
//!
//! # Examples
//!
//! ```
//! use allocvec::prelude::*;
//!
//! let mut v: Vector<&str> = vector!["b", "d"];
//! v.insert(0, "a").unwrap();
//! v.insert(2, "c").unwrap();
//! v.push_back("e");
//! assert_eq!(&v[..], &["a", "b", "c", "d", "e"]);
//!
//! // Checked access reports errors instead of panicking:
//! assert_eq!(v.at(4), Ok(&"e"));
//! assert_eq!(v.at(5), Err(VectorError::OutOfRange { index: 5, len: 5 }));
//!
//! // The vector derefs to a slice, so the usual slice API is available:
//! assert!(v.iter().rev().eq(["e", "d", "c", "b", "a"].iter()));
//! assert_eq!(v.binary_search(&"c"), Ok(2));
//! ```
//!
//! # Growth and capacity
//!
//! | Operation                       | Resulting capacity                                     |
//! |---------------------------------|--------------------------------------------------------|
//! | `new()`, `vector![]`            | 0, nothing allocated                                   |
//! | `from_elem(n, _)`, `with_len(n)`| exactly `n`                                            |
//! | `vector![a, b, c]`, `from_slice`| exactly the number of elements                         |
//! | `clone()`                       | the capacity of the source                             |
//! | push/insert/emplace when full   | 16 if it was 0, otherwise doubled                      |
//! | `reserve(n)`                    | unchanged if `n <= capacity()`, otherwise exactly `n`  |
//! | `shrink_to_fit()`               | exactly `len()`                                        |
//! | `resize(n)`                     | exactly `n`                                            |
//! | `clear()`, `truncate(n)`        | unchanged                                              |
//!
//! ```
//! use allocvec::Vector;
//! let mut v = Vector::new();
//! for i in 0..17 {
//!     v.push_back(i);
//! }
//! assert_eq!((v.len(), v.capacity()), (17, 32));
//! ```
//!
//! # Allocator strategies
//!
//! A strategy implements [`Allocator`][crate::allocator::Allocator]. Moving elements between
//! blocks never goes through the strategy, since a Rust move is a plain bitwise copy; only the
//! start and end of each element's lifetime do.
//!
//! # Failure behavior
//!
//! * Checked operations return [`VectorError`][crate::error::VectorError]: `at`/`at_mut` and
//!   `insert`/`emplace` with a bad position, and `reserve` past
//!   [`max_size`][crate::vector::Vector::max_size] or when the strategy refuses the block.
//!   Failed checked operations leave the vector untouched.
//! * Programming errors panic: `erase`/`remove` at or past the end, `front`/`back`/`pop_back`
//!   on an empty vector, and capacity arithmetic overflowing.
//! * Allocation failure on any other path is reported through `handle_alloc_error`, as the
//!   standard collections do.
//!
//! Reallocation acquires the new block before it touches anything, and relocating elements
//! cannot fail, so `reserve`, `shrink_to_fit` and growth leave the vector unchanged when they
//! fail. Filling operations (`resize`, `from_elem`, `clone`) keep every element constructed
//! before a panicking `Default`/`Clone` call live and counted.
//!
//! # Feature flags
//!
//! * `bumpalo`. Enables [`BumpAlloc`][crate::bump::BumpAlloc], a strategy that places storage
//!   in a `bumpalo::Bump` arena. Adds a dependency on `bumpalo`.
//!
//! Reallocations are reported through the `log` facade at `trace` level.

#![cfg_attr(not(test), no_std)]
extern crate alloc;

pub mod allocator;
#[cfg(feature = "bumpalo")]
pub mod bump;
pub mod error;
pub mod into_iter;
mod macros;
pub mod prelude;
mod raw;
pub mod vector;

pub use allocator::{Allocator, Global};
pub use error::VectorError;
pub use into_iter::IntoIter;
pub use vector::Vector;
