/// Rounds a byte count up to the next multiple of the machine word size.
///
/// # Examples
///
/// ```rust
/// use rvector::align;
///
/// match std::mem::size_of::<usize>() {
///     8 => assert_eq!(align!(13), 16), // 64 bit machine.
///     4 => assert_eq!(align!(11), 12), // 32 bit machine.
///     _ => {},
/// };
/// ```
#[macro_export]
macro_rules! align {
  ($value:expr) => {
    ($value + ::core::mem::size_of::<usize>() - 1) & !(::core::mem::size_of::<usize>() - 1)
  };
}

/// Alignment used when acquiring a region for slots of `T`.
///
/// `posix_memalign` only accepts powers of two that are also multiples of
/// the pointer size, so small alignments are raised to a full word.
pub const fn slot_align<T>() -> usize {
  let align = core::mem::align_of::<T>();
  let word = core::mem::size_of::<usize>();

  if align > word { align } else { word }
}
