//! # rvector - A Growable Array Over Hand-Managed Storage
//!
//! This crate provides [`Vector`], a contiguous, dynamically resizable
//! sequence built directly on an owned block of uninitialized memory
//! obtained from `posix_memalign(3)`.
//!
//! ## Overview
//!
//! The container is split in two layers:
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────┐
//!   │ Vector<T>          element lifecycle: construct, drop,       │
//!   │                    relocate, grow, insert, erase             │
//!   │   ┌──────────────────────────────────────────────────────┐   │
//!   │   │ RawStorage<T>  address space only: allocate, slot,   │   │
//!   │   │                offset, swap, release                 │   │
//!   │   └──────────────────────────────────────────────────────┘   │
//!   └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`RawStorage`] never constructs or drops an element. [`Vector`] owns
//! exactly one block plus a live count, and keeps `len <= capacity`
//! after every call.
//!
//! ## Crate Structure
//!
//! ```text
//!   rvector
//!   ├── align      - Word rounding (align!) and slot alignment
//!   ├── error      - StorageError
//!   ├── raw        - RawStorage, the uninitialized block
//!   └── vector     - Vector and its owning iterator
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use rvector::{Vector, vector};
//!
//! let mut numbers = vector![1, 2, 3];
//!
//! numbers.insert(1, 99);
//! assert_eq!(numbers, [1, 99, 2, 3]);
//!
//! assert_eq!(numbers.erase(1), 99);
//! assert_eq!(numbers, [1, 2, 3]);
//!
//! let mut grown = Vector::new();
//! for i in 0..5 {
//!     grown.push_back(i);
//! }
//! assert_eq!(grown.capacity(), 8);
//! ```
//!
//! ## Growth
//!
//! An insertion into a full block allocates a block of twice the
//! capacity (one slot when empty), so capacities run `1, 2, 4, 8, ...`
//! and `n` pushes relocate `O(n)` elements in total. [`Vector::reserve`]
//! and [`Vector::resize`] allocate exactly what was asked for.
//!
//! ```text
//!   push into a full block:
//!
//!   old  ┌───┬───┬───┬───┐
//!        │ a │ b │ c │ d │
//!        └───┴───┴───┴───┘
//!          │   │   │   │    bitwise move, never a clone
//!          ▼   ▼   ▼   ▼
//!   new  ┌───┬───┬───┬───┬───┬───┬───┬───┐
//!        │ a │ b │ c │ d │ e │   │   │   │
//!        └───┴───┴───┴───┴───┴───┴───┴───┘
//! ```
//!
//! Every reallocation moves the elements, so no reference survives it;
//! the borrow checker enforces this.
//!
//! ## Failure
//!
//! - **Resource exhaustion** is reported by the `try_*` methods as a
//!   [`StorageError`], leaving the sequence as it was. The plain methods
//!   panic on capacity overflow and call
//!   [`handle_alloc_error`](std::alloc::handle_alloc_error) when memory
//!   runs out.
//! - **Caller misuse** (an out-of-range position) panics.
//!
//! ## Limitations
//!
//! - **No internal synchronization**: `Vector<T>` is `Send`/`Sync` when
//!   `T` is, and follows the usual borrowing rules.
//! - **Unix-only**: storage comes from `libc`.
//! - **No small-size optimization**: elements always live in the block.

pub mod align;
pub mod error;
pub mod raw;
pub mod vector;

pub use error::{Result, StorageError};
pub use raw::RawStorage;
pub use vector::{GROWTH_FACTOR, IntoIter, MIN_NON_ZERO_CAP, Vector};

/// Builds a [`Vector`] with exactly as many slots as elements.
///
/// ```rust
/// use rvector::vector;
///
/// let listed = vector![1, 2, 3];
/// assert_eq!(listed.capacity(), 3);
///
/// let repeated = vector![0u8; 4];
/// assert_eq!(repeated, [0, 0, 0, 0]);
/// ```
#[macro_export]
macro_rules! vector {
  () => {
    $crate::Vector::new()
  };
  ($elem:expr; $n:expr) => {
    $crate::Vector::from_elem($elem, $n)
  };
  ($($x:expr),+ $(,)?) => {
    $crate::Vector::from([$($x),+])
  };
}
