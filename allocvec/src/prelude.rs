//! Single module with almost all `allocvec` exports
//!
//! # Examples
//!
//! Import all into current scope:
//!
//! ```
//! use allocvec::prelude::*;
//! let v: Vector<u8> = vector![1, 2];
//! assert_eq!(v.len(), 2);
//! ```
//!
//! Import all, named:
//!
//! ```
//! use allocvec::prelude as av;
//! let v: av::Vector<u8, av::Global> = av::Vector::new_in(av::Global);
//! assert!(v.is_empty());
//! ```

pub use crate::allocator::{Allocator, Global};
#[cfg(feature = "bumpalo")]
pub use crate::bump::BumpAlloc;
pub use crate::error::VectorError;
pub use crate::into_iter::IntoIter;
pub use crate::vector;
pub use crate::vector::Vector;
