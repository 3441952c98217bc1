//! Raw storage block: an owned, fixed-size region of uninitialized slots.

use std::{
  marker::PhantomData,
  mem::{self, MaybeUninit},
  ptr::{self, NonNull},
};

use libc::c_void;

use crate::{
  align,
  align::slot_align,
  error::{Result, StorageError},
};

/// Uninitialized address space for `capacity` slots of `T`.
///
/// The block never constructs or drops elements; it only hands out slot
/// addresses. Whoever owns the block tracks which slots are live and must
/// drop them before the block goes away.
///
/// ```text
///   RawStorage<T>
///   ┌──────────┬──────────┐
///   │  buffer  │ capacity │
///   └────┬─────┴──────────┘
///        ▼
///   ┌────────┬────────┬────────┬────────┐
///   │ uninit │ uninit │ uninit │ uninit │   capacity = 4
///   └────────┴────────┴────────┴────────┘
///   ▲                                   ▲
///   offset(0)                     offset(4) (one past the end)
/// ```
///
/// A block is moved or swapped, never cloned: two blocks never own the
/// same region.
pub struct RawStorage<T> {
  buffer: NonNull<T>,
  capacity: usize,
  _owns: PhantomData<T>,
}

// SAFETY: the block exclusively owns its region, like `Box<[MaybeUninit<T>]>`.
unsafe impl<T: Send> Send for RawStorage<T> {}
// SAFETY: shared access only hands out shared slot references.
unsafe impl<T: Sync> Sync for RawStorage<T> {}

impl<T> RawStorage<T> {
  /// An empty block. Owns nothing.
  pub const fn new() -> Self {
    Self {
      buffer: NonNull::dangling(),
      capacity: 0,
      _owns: PhantomData,
    }
  }

  /// Reserves address space for `capacity` slots.
  ///
  /// A zero capacity, or a zero-sized `T`, performs no allocation and
  /// cannot fail.
  pub fn allocate(capacity: usize) -> Result<Self> {
    let size = mem::size_of::<T>();

    if capacity == 0 || size == 0 {
      return Ok(Self {
        buffer: NonNull::dangling(),
        capacity,
        _owns: PhantomData,
      });
    }

    let bytes = Self::region_bytes(capacity)?;
    let align = slot_align::<T>();

    let mut address: *mut c_void = ptr::null_mut();
    // SAFETY: `align` is a power of two and a multiple of the pointer size.
    let status = unsafe { libc::posix_memalign(&mut address, align, bytes) };

    let buffer = match NonNull::new(address.cast::<T>()) {
      Some(buffer) if status == 0 => buffer,
      _ => {
        log::trace!("allocation of {bytes} bytes for {capacity} slots failed (status = {status})");
        return Err(StorageError::OutOfMemory {
          capacity,
          bytes,
          align,
        });
      }
    };

    log::trace!("allocated {bytes} bytes for {capacity} slots, address = {buffer:?}");

    Ok(Self {
      buffer,
      capacity,
      _owns: PhantomData,
    })
  }

  /// Bytes requested for `capacity` slots, rounded up to a whole word.
  fn region_bytes(capacity: usize) -> Result<usize> {
    // Leave room for the word rounding.
    let limit = isize::MAX as usize - (mem::size_of::<usize>() - 1);
    let bytes = mem::size_of::<T>()
      .checked_mul(capacity)
      .filter(|bytes| *bytes <= limit)
      .ok_or(StorageError::CapacityOverflow { capacity })?;

    Ok(align!(bytes))
  }

  /// Number of slots, not bytes.
  pub const fn capacity(&self) -> usize {
    self.capacity
  }

  /// Whether the block holds a region obtained from the system.
  pub const fn is_allocated(&self) -> bool {
    self.capacity != 0 && mem::size_of::<T>() != 0
  }

  pub const fn as_ptr(&self) -> *const T {
    self.buffer.as_ptr()
  }

  pub const fn as_mut_ptr(&mut self) -> *mut T {
    self.buffer.as_ptr()
  }

  /// Address of slot `index`.
  ///
  /// `index == capacity` yields the one-past-the-end address, which may be
  /// compared against but never dereferenced.
  ///
  /// # Panics
  ///
  /// If `index > capacity`.
  pub fn offset(
    &self,
    index: usize,
  ) -> *mut T {
    assert!(
      index <= self.capacity,
      "slot offset {index} out of range for capacity {}",
      self.capacity
    );

    // SAFETY: at most one past the end of the region.
    unsafe { self.buffer.as_ptr().add(index) }
  }

  /// Memory of slot `index`. Says nothing about whether the slot is live.
  ///
  /// # Panics
  ///
  /// If `index >= capacity`.
  pub fn slot(
    &self,
    index: usize,
  ) -> &MaybeUninit<T> {
    self.check_slot(index);

    // SAFETY: in bounds, and `MaybeUninit<T>` has the layout of `T`.
    unsafe { &*self.offset(index).cast::<MaybeUninit<T>>() }
  }

  /// Mutable memory of slot `index`. Says nothing about whether the slot is live.
  ///
  /// # Panics
  ///
  /// If `index >= capacity`.
  pub fn slot_mut(
    &mut self,
    index: usize,
  ) -> &mut MaybeUninit<T> {
    self.check_slot(index);

    // SAFETY: in bounds, and `&mut self` guarantees exclusive access.
    unsafe { &mut *self.offset(index).cast::<MaybeUninit<T>>() }
  }

  /// Exchanges regions with `other`.
  pub fn swap(
    &mut self,
    other: &mut Self,
  ) {
    mem::swap(self, other);
  }

  /// Transfers the region out, leaving this block empty.
  pub fn take(&mut self) -> Self {
    mem::replace(self, Self::new())
  }

  fn check_slot(
    &self,
    index: usize,
  ) {
    assert!(
      index < self.capacity,
      "slot index {index} out of range for capacity {}",
      self.capacity
    );
  }
}

impl<T> Default for RawStorage<T> {
  fn default() -> Self {
    Self::new()
  }
}

impl<T> Drop for RawStorage<T> {
  fn drop(&mut self) {
    if !self.is_allocated() {
      return;
    }

    log::trace!("released {} slots, address = {:?}", self.capacity, self.buffer);

    // SAFETY: the region came from `posix_memalign` and is owned by this block.
    unsafe { libc::free(self.buffer.as_ptr().cast::<c_void>()) };
  }
}
