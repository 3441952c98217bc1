//! Dynamic sequence: a growable array on top of [`RawStorage`].

use std::{
  cmp, fmt,
  hash::{Hash, Hasher},
  iter::FusedIterator,
  mem,
  ops::{Deref, DerefMut, Index, IndexMut},
  ptr,
  slice::{self, SliceIndex},
};

use crate::{
  error::{Result, StorageError},
  raw::RawStorage,
};

/// Capacity of the first allocation made by a growing insertion.
pub const MIN_NON_ZERO_CAP: usize = 1;

/// Factor applied to a full block's capacity on a growing insertion.
pub const GROWTH_FACTOR: usize = 2;

/// A contiguous growable array owning exactly one [`RawStorage`].
///
/// Slots `[0, len)` hold live elements; slots `[len, capacity)` are
/// uninitialized and never read.
///
/// ```text
///   Vector<T>
///   ┌──────────────────────┬──────┐
///   │ data: RawStorage<T>  │ size │ = 2
///   └──────────┬───────────┴──────┘
///              ▼
///   ┌────────┬────────┬────────┬────────┐
///   │  'a'   │  'b'   │ uninit │ uninit │   capacity = 4
///   └────────┴────────┴────────┴────────┘
/// ```
///
/// Any operation that allocates a new block moves every element, so the
/// borrow checker rejects references held across it.
pub struct Vector<T> {
  data: RawStorage<T>,
  size: usize,
}

impl<T> Vector<T> {
  /// An empty sequence. Does not allocate.
  pub const fn new() -> Self {
    Self {
      data: RawStorage::new(),
      size: 0,
    }
  }

  /// An empty sequence with room for exactly `capacity` elements.
  pub fn with_capacity(capacity: usize) -> Self {
    Self::try_with_capacity(capacity).unwrap_or_else(|err| err.raise())
  }

  pub fn try_with_capacity(capacity: usize) -> Result<Self> {
    Ok(Self {
      data: RawStorage::allocate(capacity)?,
      size: 0,
    })
  }

  /// Number of live elements.
  pub const fn len(&self) -> usize {
    self.size
  }

  /// Alias of [`len`](Self::len).
  pub const fn size(&self) -> usize {
    self.size
  }

  pub const fn is_empty(&self) -> bool {
    self.size == 0
  }

  /// Number of slots in the owned block.
  pub const fn capacity(&self) -> usize {
    self.data.capacity()
  }

  pub const fn as_ptr(&self) -> *const T {
    self.data.as_ptr()
  }

  pub const fn as_mut_ptr(&mut self) -> *mut T {
    self.data.as_mut_ptr()
  }

  /// The live range `[0, len)`.
  pub fn as_slice(&self) -> &[T] {
    // SAFETY: the first `size` slots are live and the pointer is aligned.
    unsafe { slice::from_raw_parts(self.data.as_ptr(), self.size) }
  }

  pub fn as_mut_slice(&mut self) -> &mut [T] {
    // SAFETY: as above, and `&mut self` is exclusive.
    unsafe { slice::from_raw_parts_mut(self.data.as_mut_ptr(), self.size) }
  }

  pub fn iter(&self) -> slice::Iter<'_, T> {
    self.as_slice().iter()
  }

  pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
    self.as_mut_slice().iter_mut()
  }

  /// Exchanges contents with `other` in constant time.
  pub fn swap(
    &mut self,
    other: &mut Self,
  ) {
    self.data.swap(&mut other.data);
    mem::swap(&mut self.size, &mut other.size);
  }

  /// Makes room for at least `capacity` elements in total.
  ///
  /// Does nothing when the block is already large enough; otherwise the
  /// new block holds exactly `capacity` slots.
  pub fn reserve(
    &mut self,
    capacity: usize,
  ) {
    self.try_reserve(capacity).unwrap_or_else(|err| err.raise())
  }

  /// Fallible [`reserve`](Self::reserve). On error the sequence is untouched.
  pub fn try_reserve(
    &mut self,
    capacity: usize,
  ) -> Result<()> {
    if capacity <= self.capacity() {
      return Ok(());
    }

    let mut fresh = RawStorage::allocate(capacity)?;
    // SAFETY: `fresh` has at least `size` slots and is a distinct region.
    unsafe { relocate(self.data.as_ptr(), fresh.as_mut_ptr(), self.size) };
    self.replace_block(fresh);

    Ok(())
  }

  /// Appends `value`, doubling the capacity when the block is full.
  pub fn push_back(
    &mut self,
    value: T,
  ) {
    self.try_push_back(value).unwrap_or_else(|err| err.raise())
  }

  pub fn try_push_back(
    &mut self,
    value: T,
  ) -> Result<()> {
    self.try_emplace_back_with(|| value).map(|_| ())
  }

  /// Appends the element built by `make` and returns it.
  pub fn emplace_back_with<F>(
    &mut self,
    make: F,
  ) -> &mut T
  where
    F: FnOnce() -> T,
  {
    let end = self.size;
    self.emplace_with(end, make)
  }

  pub fn try_emplace_back_with<F>(
    &mut self,
    make: F,
  ) -> Result<&mut T>
  where
    F: FnOnce() -> T,
  {
    let end = self.size;
    self.try_emplace_with(end, make)
  }

  /// Removes the last element. `None` on an empty sequence.
  pub fn pop_back(&mut self) -> Option<T> {
    if self.size == 0 {
      return None;
    }

    self.size -= 1;
    // SAFETY: the slot was live and is now outside the live range.
    Some(unsafe { ptr::read(self.data.offset(self.size)) })
  }

  /// Inserts `value` at `pos`, shifting `[pos, len)` one slot right.
  ///
  /// # Panics
  ///
  /// If `pos > len`.
  pub fn insert(
    &mut self,
    pos: usize,
    value: T,
  ) -> &mut T {
    self.emplace_with(pos, || value)
  }

  pub fn try_insert(
    &mut self,
    pos: usize,
    value: T,
  ) -> Result<&mut T> {
    self.try_emplace_with(pos, || value)
  }

  /// Builds an element with `make` directly at `pos` and returns it.
  ///
  /// With spare capacity the tail is shifted in place. Otherwise a block
  /// of twice the capacity (or [`MIN_NON_ZERO_CAP`] when empty) is
  /// allocated, the element is built at `pos` in it, and the old prefix
  /// and suffix are relocated around it.
  ///
  /// # Panics
  ///
  /// If `pos > len`.
  pub fn emplace_with<F>(
    &mut self,
    pos: usize,
    make: F,
  ) -> &mut T
  where
    F: FnOnce() -> T,
  {
    match self.try_emplace_with(pos, make) {
      Ok(element) => element,
      Err(err) => err.raise(),
    }
  }

  /// Fallible [`emplace_with`](Self::emplace_with). On error `make` is
  /// never called and the sequence is untouched.
  pub fn try_emplace_with<F>(
    &mut self,
    pos: usize,
    make: F,
  ) -> Result<&mut T>
  where
    F: FnOnce() -> T,
  {
    assert!(
      pos <= self.size,
      "insertion index (is {pos}) should be <= len (is {})",
      self.size
    );

    if self.capacity() > self.size {
      self.emplace_in_place(pos, make);
    } else {
      self.emplace_realloc(pos, make)?;
    }

    Ok(&mut self.as_mut_slice()[pos])
  }

  /// Removes and returns the element at `pos`, shifting the tail left.
  ///
  /// # Panics
  ///
  /// If `pos >= len`.
  pub fn erase(
    &mut self,
    pos: usize,
  ) -> T {
    assert!(
      pos < self.size,
      "removal index (is {pos}) should be < len (is {})",
      self.size
    );

    // SAFETY: `pos` is live; after the read its slot is refilled by the
    // shift, and the vacated last slot leaves the live range.
    unsafe {
      let slot = self.data.offset(pos);
      let value = ptr::read(slot);
      ptr::copy(slot.add(1), slot, self.size - pos - 1);
      self.size -= 1;
      value
    }
  }

  /// Drops every element past `len`. Never reallocates.
  pub fn truncate(
    &mut self,
    len: usize,
  ) {
    if len >= self.size {
      return;
    }

    let tail = ptr::slice_from_raw_parts_mut(self.data.offset(len), self.size - len);
    // Shrink first so a panicking destructor cannot expose dropped slots.
    self.size = len;
    // SAFETY: the tail was live and is no longer reachable.
    unsafe { ptr::drop_in_place(tail) };
  }

  pub fn clear(&mut self) {
    self.truncate(0);
  }

  fn emplace_in_place<F>(
    &mut self,
    pos: usize,
    make: F,
  ) where
    F: FnOnce() -> T,
  {
    let value = make();

    // SAFETY: there is a spare slot at `size`, so shifting `[pos, size)`
    // right by one stays inside the block.
    unsafe {
      let slot = self.data.offset(pos);
      if pos < self.size {
        ptr::copy(slot, slot.add(1), self.size - pos);
      }
      ptr::write(slot, value);
    }
    self.size += 1;
  }

  fn emplace_realloc<F>(
    &mut self,
    pos: usize,
    make: F,
  ) -> Result<()>
  where
    F: FnOnce() -> T,
  {
    let mut fresh = RawStorage::allocate(self.grown_capacity()?)?;
    fresh.slot_mut(pos).write(make());

    // SAFETY: `fresh` holds at least `size + 1` slots; prefix and suffix
    // land on either side of the new element.
    unsafe {
      relocate(self.data.as_ptr(), fresh.as_mut_ptr(), pos);
      relocate(self.data.offset(pos), fresh.offset(pos + 1), self.size - pos);
    }
    self.replace_block(fresh);
    self.size += 1;

    Ok(())
  }

  fn grown_capacity(&self) -> Result<usize> {
    match self.capacity() {
      0 => Ok(MIN_NON_ZERO_CAP),
      capacity => capacity
        .checked_mul(GROWTH_FACTOR)
        .ok_or(StorageError::CapacityOverflow { capacity }),
    }
  }

  /// Installs a block whose first `size` slots already hold the
  /// relocated elements. The old block is released without dropping them.
  fn replace_block(
    &mut self,
    mut fresh: RawStorage<T>,
  ) {
    log::debug!(
      "relocated {} elements, capacity {} -> {}",
      self.size,
      self.capacity(),
      fresh.capacity()
    );
    self.data.swap(&mut fresh);
  }

  /// Appends into a spare slot. Panics if there is none.
  fn push_within_capacity(
    &mut self,
    value: T,
  ) {
    self.data.slot_mut(self.size).write(value);
    self.size += 1;
  }
}

impl<T: Default> Vector<T> {
  /// `len` default-constructed elements in a block of exactly `len` slots.
  pub fn with_len(len: usize) -> Self {
    Self::try_with_len(len).unwrap_or_else(|err| err.raise())
  }

  pub fn try_with_len(len: usize) -> Result<Self> {
    let mut sequence = Self::try_with_capacity(len)?;
    for _ in 0..len {
      sequence.push_within_capacity(T::default());
    }

    Ok(sequence)
  }

  /// Shrinks by dropping the tail, or grows to exactly `len` slots and
  /// fills the new range with default values.
  pub fn resize(
    &mut self,
    len: usize,
  ) {
    self.try_resize(len).unwrap_or_else(|err| err.raise())
  }

  pub fn try_resize(
    &mut self,
    len: usize,
  ) -> Result<()> {
    if len < self.size {
      self.truncate(len);
      return Ok(());
    }

    self.try_reserve(len)?;
    while self.size < len {
      self.push_within_capacity(T::default());
    }

    Ok(())
  }
}

impl<T: Clone> Vector<T> {
  /// `len` clones of `value`.
  pub fn from_elem(
    value: T,
    len: usize,
  ) -> Self {
    let mut sequence = Self::with_capacity(len);
    for _ in 0..len {
      sequence.push_within_capacity(value.clone());
    }

    sequence
  }

  /// Deep copy into a block of exactly `len` slots.
  pub fn try_clone(&self) -> Result<Self> {
    let mut copy = Self::try_with_capacity(self.size)?;
    for element in self {
      copy.push_within_capacity(element.clone());
    }

    Ok(copy)
  }
}

/// Moves `count` elements from `src` to `dst` bitwise.
///
/// A Rust move cannot fail, so relocation always moves and never clones.
/// Afterwards the source slots are logically uninitialized.
///
/// # Safety
///
/// `src` must hold `count` live elements, `dst` must have room for
/// `count` elements, and the two ranges must not overlap.
unsafe fn relocate<T>(
  src: *const T,
  dst: *mut T,
  count: usize,
) {
  unsafe { ptr::copy_nonoverlapping(src, dst, count) };
}

impl<T> Drop for Vector<T> {
  fn drop(&mut self) {
    // SAFETY: exactly the live range; the block releases itself afterwards.
    unsafe { ptr::drop_in_place(self.as_mut_slice()) };
  }
}

impl<T> Default for Vector<T> {
  fn default() -> Self {
    Self::new()
  }
}

impl<T: Clone> Clone for Vector<T> {
  fn clone(&self) -> Self {
    self.try_clone().unwrap_or_else(|err| err.raise())
  }

  /// Copy-assignment.
  ///
  /// When `source` does not fit, a full copy is built and swapped in, so
  /// a panicking clone leaves `self` unchanged. Otherwise the existing
  /// block is reused: the common prefix is assigned element-wise, then
  /// the tail is cloned in or dropped. A panic on that path keeps `len`
  /// equal to the number of live elements, but the contents are mixed.
  fn clone_from(
    &mut self,
    source: &Self,
  ) {
    if source.size > self.capacity() {
      let mut copy = source.clone();
      self.swap(&mut copy);
      return;
    }

    let common = cmp::min(self.size, source.size);
    for (target, element) in self.as_mut_slice()[..common].iter_mut().zip(&source[..common]) {
      target.clone_from(element);
    }

    if source.size > common {
      for element in &source[common..] {
        self.push_within_capacity(element.clone());
      }
    } else {
      self.truncate(source.size);
    }
  }
}

impl<T> Deref for Vector<T> {
  type Target = [T];

  fn deref(&self) -> &[T] {
    self.as_slice()
  }
}

impl<T> DerefMut for Vector<T> {
  fn deref_mut(&mut self) -> &mut [T] {
    self.as_mut_slice()
  }
}

impl<T, I: SliceIndex<[T]>> Index<I> for Vector<T> {
  type Output = I::Output;

  fn index(
    &self,
    index: I,
  ) -> &Self::Output {
    Index::index(self.as_slice(), index)
  }
}

impl<T, I: SliceIndex<[T]>> IndexMut<I> for Vector<T> {
  fn index_mut(
    &mut self,
    index: I,
  ) -> &mut Self::Output {
    IndexMut::index_mut(self.as_mut_slice(), index)
  }
}

impl<T: fmt::Debug> fmt::Debug for Vector<T> {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    f.debug_list().entries(self.iter()).finish()
  }
}

impl<T: PartialEq<U>, U> PartialEq<Vector<U>> for Vector<T> {
  fn eq(
    &self,
    other: &Vector<U>,
  ) -> bool {
    self.as_slice() == other.as_slice()
  }
}

impl<T: PartialEq<U>, U> PartialEq<[U]> for Vector<T> {
  fn eq(
    &self,
    other: &[U],
  ) -> bool {
    self.as_slice() == other
  }
}

impl<T: PartialEq<U>, U, const N: usize> PartialEq<[U; N]> for Vector<T> {
  fn eq(
    &self,
    other: &[U; N],
  ) -> bool {
    self.as_slice() == other.as_slice()
  }
}

impl<T: Eq> Eq for Vector<T> {}

impl<T: Hash> Hash for Vector<T> {
  fn hash<H: Hasher>(
    &self,
    state: &mut H,
  ) {
    self.as_slice().hash(state);
  }
}

impl<T, const N: usize> From<[T; N]> for Vector<T> {
  fn from(array: [T; N]) -> Self {
    let mut sequence = Self::with_capacity(N);
    for element in array {
      sequence.push_within_capacity(element);
    }

    sequence
  }
}

impl<T> FromIterator<T> for Vector<T> {
  fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
    let mut sequence = Self::new();
    sequence.extend(iter);
    sequence
  }
}

impl<T> Extend<T> for Vector<T> {
  fn extend<I: IntoIterator<Item = T>>(
    &mut self,
    iter: I,
  ) {
    let iter = iter.into_iter();
    let (lower, _) = iter.size_hint();

    // Grow geometrically so repeated small extends stay amortized.
    if lower > self.capacity() - self.size {
      let wanted = self.size.saturating_add(lower);
      let grown = self.grown_capacity().unwrap_or(wanted);
      self.reserve(cmp::max(wanted, grown));
    }

    for element in iter {
      self.push_back(element);
    }
  }
}

impl<'a, T> IntoIterator for &'a Vector<T> {
  type Item = &'a T;
  type IntoIter = slice::Iter<'a, T>;

  fn into_iter(self) -> Self::IntoIter {
    self.iter()
  }
}

impl<'a, T> IntoIterator for &'a mut Vector<T> {
  type Item = &'a mut T;
  type IntoIter = slice::IterMut<'a, T>;

  fn into_iter(self) -> Self::IntoIter {
    self.iter_mut()
  }
}

impl<T> IntoIterator for Vector<T> {
  type Item = T;
  type IntoIter = IntoIter<T>;

  fn into_iter(mut self) -> Self::IntoIter {
    let data = self.data.take();
    let end = mem::replace(&mut self.size, 0);

    IntoIter { data, start: 0, end }
  }
}

/// Owning iterator over a [`Vector`]. Elements not yielded are dropped
/// with the iterator.
pub struct IntoIter<T> {
  data: RawStorage<T>,
  start: usize,
  end: usize,
}

impl<T> IntoIter<T> {
  /// Elements not yet yielded.
  pub fn as_slice(&self) -> &[T] {
    // SAFETY: `[start, end)` is live.
    unsafe { slice::from_raw_parts(self.data.offset(self.start), self.end - self.start) }
  }
}

impl<T> Iterator for IntoIter<T> {
  type Item = T;

  fn next(&mut self) -> Option<T> {
    if self.start == self.end {
      return None;
    }

    // SAFETY: `start` is live and leaves the live range.
    let element = unsafe { ptr::read(self.data.offset(self.start)) };
    self.start += 1;
    Some(element)
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    let remaining = self.end - self.start;
    (remaining, Some(remaining))
  }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
  fn next_back(&mut self) -> Option<T> {
    if self.start == self.end {
      return None;
    }

    self.end -= 1;
    // SAFETY: `end` was live and leaves the live range.
    Some(unsafe { ptr::read(self.data.offset(self.end)) })
  }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
  fn drop(&mut self) {
    let remaining = ptr::slice_from_raw_parts_mut(self.data.offset(self.start), self.end - self.start);
    // SAFETY: only the elements never yielded are still live.
    unsafe { ptr::drop_in_place(remaining) };
  }
}

#[cfg(test)]
mod tests {
  use std::{
    cell::Cell,
    panic::{self, AssertUnwindSafe},
  };

  use super::*;
  use crate::vector;

  thread_local! {
    static CONSTRUCTED: Cell<usize> = const { Cell::new(0) };
    static DROPPED: Cell<usize> = const { Cell::new(0) };
    static CLONES: Cell<usize> = const { Cell::new(0) };
    static PANIC_ON_CLONE: Cell<Option<usize>> = const { Cell::new(None) };
  }

  /// Element that records its lifecycle in thread-local counters.
  #[derive(Debug, PartialEq)]
  struct Probe(u32);

  impl Probe {
    fn new(value: u32) -> Self {
      CONSTRUCTED.with(|c| c.set(c.get() + 1));
      Self(value)
    }

    fn live() -> usize {
      CONSTRUCTED.with(Cell::get) - DROPPED.with(Cell::get)
    }

    fn clones() -> usize {
      CLONES.with(Cell::get)
    }

    /// The `nth` clone from now panics.
    fn panic_on_clone(nth: usize) {
      PANIC_ON_CLONE.with(|p| p.set(Some(Self::clones() + nth)));
    }
  }

  impl Default for Probe {
    fn default() -> Self {
      Self::new(0)
    }
  }

  impl Clone for Probe {
    fn clone(&self) -> Self {
      let count = CLONES.with(|c| {
        c.set(c.get() + 1);
        c.get()
      });
      if PANIC_ON_CLONE.with(Cell::get) == Some(count) {
        panic!("clone {count} failed");
      }
      Self::new(self.0)
    }
  }

  impl Drop for Probe {
    fn drop(&mut self) {
      DROPPED.with(|d| d.set(d.get() + 1));
    }
  }

  fn values(elements: &[Probe]) -> Vec<u32> {
    elements.iter().map(|probe| probe.0).collect()
  }

  fn probes(values: &[u32]) -> Vector<Probe> {
    let mut sequence = Vector::with_capacity(values.len());
    for &value in values {
      sequence.push_back(Probe::new(value));
    }
    sequence
  }

  fn quiet<R>(f: impl FnOnce() -> R) -> std::thread::Result<R> {
    panic::catch_unwind(AssertUnwindSafe(f))
  }

  #[test]
  fn test_new_is_empty() {
    let sequence = Vector::<i32>::new();

    assert_eq!(sequence.len(), 0);
    assert_eq!(sequence.capacity(), 0);
    assert!(sequence.is_empty());
    assert_eq!(sequence.as_slice(), &[] as &[i32]);
  }

  #[test]
  fn test_with_len_default_constructs() {
    let sequence = Vector::<i32>::with_len(3);

    assert_eq!(sequence, [0, 0, 0]);
    assert_eq!(sequence.size(), 3);
    assert_eq!(sequence.capacity(), 3);
  }

  #[test]
  fn test_push_back_growth_doubles() {
    let mut sequence = Vector::new();
    let mut capacities = Vec::new();

    for i in 0..9 {
      sequence.push_back(i);
      capacities.push(sequence.capacity());
    }

    assert_eq!(capacities, [1, 2, 4, 4, 8, 8, 8, 8, 16]);
    assert_eq!(sequence, [0, 1, 2, 3, 4, 5, 6, 7, 8]);
  }

  #[test]
  fn test_push_within_capacity_keeps_block() {
    let mut sequence = Vector::with_capacity(8);
    let address = sequence.as_ptr();

    for i in 0..8u64 {
      sequence.push_back(i);
    }

    assert_eq!(sequence.as_ptr(), address);
    assert_eq!(sequence.capacity(), 8);
  }

  #[test]
  fn test_reserve_smaller_is_noop() {
    let mut sequence = vector![1, 2, 3];
    sequence.reserve(10);
    let address = sequence.as_ptr();
    let first = &sequence[0] as *const i32;

    sequence.reserve(4);
    sequence.reserve(10);

    assert_eq!(sequence.capacity(), 10);
    assert_eq!(sequence.as_ptr(), address);
    assert_eq!(&sequence[0] as *const i32, first);
  }

  #[test]
  fn test_reserve_is_exact() {
    let mut sequence = vector![1, 2, 3];
    sequence.reserve(7);

    assert_eq!(sequence.capacity(), 7);
    assert_eq!(sequence, [1, 2, 3]);
  }

  #[test]
  fn test_try_reserve_overflow_leaves_sequence() {
    let mut sequence = vector![1u64, 2];

    let result = sequence.try_reserve(usize::MAX);

    assert_eq!(result, Err(StorageError::CapacityOverflow { capacity: usize::MAX }));
    assert_eq!(sequence, [1, 2]);
    assert_eq!(sequence.capacity(), 2);
  }

  #[test]
  fn test_reserve_moves_without_cloning() {
    let mut sequence = probes(&[1, 2, 3]);
    let clones = Probe::clones();
    Probe::panic_on_clone(1);

    sequence.reserve(4);

    assert_eq!(Probe::clones(), clones);
    assert_eq!(values(&sequence), [1, 2, 3]);
    assert_eq!(Probe::live(), 3);
  }

  #[test]
  fn test_insert_then_erase() {
    let mut sequence = vector![1, 2, 3];
    sequence.reserve(8);

    sequence.insert(1, 99);
    assert_eq!(sequence, [1, 99, 2, 3]);
    assert_eq!(sequence.len(), 4);

    assert_eq!(sequence.erase(1), 99);
    assert_eq!(sequence, [1, 2, 3]);
    assert_eq!(sequence.len(), 3);
  }

  #[test]
  fn test_insert_into_full_block() {
    let mut sequence = vector![1, 2, 3];
    assert_eq!(sequence.capacity(), 3);

    sequence.insert(1, 99);

    assert_eq!(sequence, [1, 99, 2, 3]);
    assert_eq!(sequence.capacity(), 6);
  }

  #[test]
  fn test_insert_at_both_ends() {
    let mut sequence = Vector::new();

    sequence.insert(0, 'b');
    sequence.insert(1, 'c');
    sequence.insert(0, 'a');
    sequence.insert(3, 'd');

    assert_eq!(sequence, ['a', 'b', 'c', 'd']);
  }

  #[test]
  fn test_insert_returns_new_element() {
    let mut sequence = vector![10, 20];

    *sequence.insert(1, 14) += 1;
    *sequence.emplace_back_with(|| 29) += 1;

    assert_eq!(sequence, [10, 15, 20, 30]);
  }

  #[test]
  #[should_panic(expected = "insertion index (is 4) should be <= len (is 3)")]
  fn test_insert_out_of_range_panics() {
    let mut sequence = vector![1, 2, 3];
    sequence.insert(4, 0);
  }

  #[test]
  #[should_panic(expected = "removal index (is 3) should be < len (is 3)")]
  fn test_erase_out_of_range_panics() {
    let mut sequence = vector![1, 2, 3];
    sequence.erase(3);
  }

  #[test]
  #[should_panic(expected = "index out of bounds")]
  fn test_index_out_of_range_panics() {
    let sequence = vector![1, 2, 3];
    let _ = sequence[3];
  }

  #[test]
  fn test_panicking_constructor_leaves_sequence() {
    let mut spare = vector![1, 2];
    spare.reserve(4);
    let mut full = vector![1, 2];

    for sequence in [&mut spare, &mut full] {
      let capacity = sequence.capacity();
      let result = quiet(|| {
        sequence.emplace_with(0, || panic!("constructor failed"));
      });

      assert!(result.is_err());
      assert_eq!(*sequence, [1, 2]);
      assert_eq!(sequence.capacity(), capacity);
    }
  }

  #[test]
  fn test_erase_drops_nothing_else() {
    let mut sequence = probes(&[1, 2, 3, 4]);

    let removed = sequence.erase(1);
    assert_eq!(removed.0, 2);
    assert_eq!(Probe::live(), 4);

    drop(removed);
    assert_eq!(Probe::live(), 3);
    assert_eq!(values(&sequence), [1, 3, 4]);
  }

  #[test]
  fn test_pop_back() {
    let mut sequence = vector![1, 2];

    assert_eq!(sequence.pop_back(), Some(2));
    assert_eq!(sequence.pop_back(), Some(1));
    assert_eq!(sequence.pop_back(), None);
    assert_eq!(sequence.len(), 0);
    assert_eq!(sequence.capacity(), 2);
  }

  #[test]
  fn test_resize_tracks_live_elements() {
    let mut sequence = probes(&[7, 8]);

    sequence.resize(5);
    assert_eq!(sequence.len(), 5);
    assert_eq!(sequence.capacity(), 5);
    assert_eq!(values(&sequence), [7, 8, 0, 0, 0]);
    assert_eq!(Probe::live(), 5);

    sequence.resize(1);
    assert_eq!(values(&sequence), [7]);
    assert_eq!(sequence.capacity(), 5);
    assert_eq!(Probe::live(), 1);

    drop(sequence);
    assert_eq!(Probe::live(), 0);
  }

  #[test]
  fn test_clone_is_deep() {
    let original = vector![String::from("a"), String::from("b")];
    let mut copy = original.clone();

    copy[0].push('!');

    assert_eq!(original, ["a", "b"]);
    assert_eq!(copy, ["a!", "b"]);
    assert_eq!(copy.capacity(), 2);
    assert_ne!(copy.as_ptr(), original.as_ptr());
  }

  #[test]
  fn test_clone_from_reuses_block() {
    let mut target = probes(&[1, 2, 3, 4]);
    let address = target.as_ptr();

    target.clone_from(&probes(&[5, 6]));
    assert_eq!(values(&target), [5, 6]);
    assert_eq!(target.as_ptr(), address);

    target.clone_from(&probes(&[7, 8, 9]));
    assert_eq!(values(&target), [7, 8, 9]);
    assert_eq!(target.as_ptr(), address);
    assert_eq!(target.capacity(), 4);
    assert_eq!(Probe::live(), 3);
  }

  #[test]
  fn test_clone_from_grows_when_too_small() {
    let mut target = probes(&[1]);
    let source = probes(&[2, 3, 4]);

    target.clone_from(&source);

    assert_eq!(target, source);
    assert_eq!(target.capacity(), 3);
    assert_eq!(Probe::live(), 6);
  }

  #[test]
  fn test_clone_from_panic_keeps_target() {
    let mut target = probes(&[1, 2]);
    let source = probes(&[3, 4, 5]);
    Probe::panic_on_clone(3);

    let result = quiet(|| target.clone_from(&source));

    assert!(result.is_err());
    assert_eq!(values(&target), [1, 2]);
    assert_eq!(Probe::live(), 5);
  }

  #[test]
  fn test_clone_from_panic_on_reuse_path_stays_consistent() {
    let mut target = probes(&[1]);
    target.reserve(4);
    let source = probes(&[3, 4, 5]);
    // Prefix assignment, one tail clone, then the failing one.
    Probe::panic_on_clone(3);

    let result = quiet(|| target.clone_from(&source));

    assert!(result.is_err());
    assert_eq!(values(&target), [3, 4]);
    assert_eq!(Probe::live(), 5);

    drop(target);
    drop(source);
    assert_eq!(Probe::live(), 0);
  }

  #[test]
  fn test_take_leaves_source_empty() {
    let mut source = vector![1, 2, 3];
    let address = source.as_ptr();

    let moved = mem::take(&mut source);

    assert_eq!(moved, [1, 2, 3]);
    assert_eq!(moved.as_ptr(), address);
    assert!(source.is_empty());
    assert_eq!(source.capacity(), 0);
  }

  #[test]
  fn test_swap() {
    let mut first = vector![1, 2, 3];
    let mut second = Vector::with_capacity(10);
    second.push_back(9);

    first.swap(&mut second);

    assert_eq!(first, [9]);
    assert_eq!(first.capacity(), 10);
    assert_eq!(second, [1, 2, 3]);
    assert_eq!(second.capacity(), 3);
  }

  #[test]
  fn test_into_iter_drops_rest() {
    let sequence = probes(&[1, 2, 3, 4]);
    let mut iter = sequence.into_iter();

    assert_eq!(iter.next().map(|probe| probe.0), Some(1));
    assert_eq!(iter.next_back().map(|probe| probe.0), Some(4));
    assert_eq!(values(iter.as_slice()), [2, 3]);
    assert_eq!(iter.len(), 2);

    drop(iter);
    assert_eq!(Probe::live(), 0);
  }

  #[test]
  fn test_clear_keeps_capacity() {
    let mut sequence = probes(&[1, 2, 3]);

    sequence.clear();

    assert!(sequence.is_empty());
    assert_eq!(sequence.capacity(), 3);
    assert_eq!(Probe::live(), 0);
  }

  #[test]
  fn test_zero_sized_elements() {
    let mut sequence = Vector::new();
    for _ in 0..5 {
      sequence.push_back(());
    }
    sequence.insert(2, ());

    assert_eq!(sequence.len(), 6);
    assert_eq!(sequence.capacity(), 8);
    sequence.erase(0);
    assert_eq!(sequence.len(), 5);
  }

  #[test]
  fn test_extend_one_at_a_time_doubles() {
    let mut sequence = Vector::new();
    let mut capacities = Vec::new();

    for i in 0..16 {
      sequence.extend([i]);
      capacities.push(sequence.capacity());
    }

    assert_eq!(capacities, [1, 2, 4, 4, 8, 8, 8, 8, 16, 16, 16, 16, 16, 16, 16, 16]);
    assert_eq!(sequence.len(), 16);
  }

  #[test]
  fn test_extend_beyond_doubling_takes_exact_room() {
    let mut sequence = vector![1, 2];

    sequence.extend(3..=9);
    assert_eq!(sequence.capacity(), 9);

    sequence.extend([10]);
    assert_eq!(sequence.capacity(), 18);
    assert_eq!(sequence, [1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
  }

  #[test]
  fn test_collect_extend_and_debug() {
    let mut sequence: Vector<i32> = (1..=3).collect();
    sequence.extend([4, 5]);

    assert_eq!(format!("{sequence:?}"), "[1, 2, 3, 4, 5]");
    assert_eq!(sequence.iter().sum::<i32>(), 15);

    for element in &mut sequence {
      *element *= 2;
    }
    assert_eq!(sequence, [2, 4, 6, 8, 10]);
    assert_eq!(sequence.into_iter().rev().collect::<Vec<_>>(), [10, 8, 6, 4, 2]);
  }

  #[test]
  fn test_from_elem() {
    let sequence = vector![String::from("x"); 3];

    assert_eq!(sequence, ["x", "x", "x"]);
    assert_eq!(sequence.capacity(), 3);
  }
}
