//! Errors raised while acquiring storage.

use std::alloc::{Layout, handle_alloc_error};

use thiserror::Error;

/// Result type for fallible storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Resource exhaustion while reserving slots.
///
/// Caller misuse (out-of-range positions) is never reported here; those
/// are panics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum StorageError {
  /// The byte size of the requested region does not fit in `isize`.
  #[error("capacity overflow: {capacity} slots cannot be addressed")]
  CapacityOverflow {
    /// Number of slots requested.
    capacity: usize,
  },

  /// The system refused to hand out the region.
  #[error("out of memory: failed to allocate {bytes} bytes for {capacity} slots")]
  OutOfMemory {
    /// Number of slots requested.
    capacity: usize,
    /// Bytes requested from the system.
    bytes: usize,
    /// Alignment requested from the system.
    align: usize,
  },
}

impl StorageError {
  /// Diverges the way the infallible operations report failure.
  ///
  /// Overflow panics; out-of-memory goes through
  /// [`handle_alloc_error`], which aborts by default.
  #[cold]
  pub fn raise(self) -> ! {
    match self {
      Self::CapacityOverflow { .. } => panic!("{self}"),
      Self::OutOfMemory { bytes, align, .. } => match Layout::from_size_align(bytes, align) {
        Ok(layout) => handle_alloc_error(layout),
        Err(_) => panic!("{self}"),
      },
    }
  }
}
