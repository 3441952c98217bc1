use rvector::{Vector, vector};

/// Prints where the live range sits and how much room is left.
fn print_state<T>(
  label: &str,
  sequence: &Vector<T>,
) {
  println!(
    "[{}] len = {}, capacity = {}, address = {:?}",
    label,
    sequence.len(),
    sequence.capacity(),
    sequence.as_ptr(),
  );
}

/// Prints one relocation: the block the elements left and the one they
/// landed in. The library reports the same step through `log::debug!`,
/// which stays silent unless the program installs a logger.
fn print_relocation<T>(
  old_capacity: usize,
  old_address: *const T,
  sequence: &Vector<T>,
) {
  println!(
    "    relocated {} elements, capacity {} -> {}, address {:?} -> {:?}, bytes = {}",
    sequence.len() - 1,
    old_capacity,
    sequence.capacity(),
    old_address,
    sequence.as_ptr(),
    sequence.capacity() * std::mem::size_of::<T>(),
  );
}

fn main() {
  // --------------------------------------------------------------------
  // 1) Push into an empty sequence and watch the capacity double.
  //    The address only changes when the block is full.
  // --------------------------------------------------------------------
  let mut numbers = Vector::new();
  print_state("empty", &numbers);

  for i in 0..9u64 {
    let before = numbers.as_ptr();
    let old_capacity = numbers.capacity();
    numbers.push_back(i);

    print_state(&format!("push {i}"), &numbers);
    if numbers.capacity() != old_capacity {
      print_relocation(old_capacity, before, &numbers);
    }
  }

  // --------------------------------------------------------------------
  // 2) Reserve ahead of time. Later pushes never reallocate.
  // --------------------------------------------------------------------
  let mut reserved = Vector::with_capacity(4);
  print_state("with_capacity(4)", &reserved);

  for word in ["alpha", "beta", "gamma", "delta"] {
    reserved.push_back(word.to_string());
  }
  print_state("after 4 pushes", &reserved);

  // --------------------------------------------------------------------
  // 3) Insert and erase in the middle.
  // --------------------------------------------------------------------
  let mut small = vector![1, 2, 3];
  println!("\n[3] start = {small:?}");

  small.insert(1, 99);
  println!("[3] insert(1, 99) = {small:?}");

  let removed = small.erase(1);
  println!("[3] erase(1) removed {removed}, left {small:?}");

  // --------------------------------------------------------------------
  // 4) Copy-assign into a sequence that already has room: the block is
  //    reused.
  // --------------------------------------------------------------------
  let mut target = Vector::with_capacity(8);
  target.push_back(0);
  let before = target.as_ptr();

  target.clone_from(&small);
  println!(
    "\n[4] clone_from kept block? {}",
    if target.as_ptr() == before { "Yes" } else { "No" }
  );
  print_state("target", &target);

  // --------------------------------------------------------------------
  // 5) Fallible growth reports the failure instead of aborting.
  // --------------------------------------------------------------------
  match numbers.try_reserve(usize::MAX) {
    Ok(()) => println!("\n[5] reserved usize::MAX slots?"),
    Err(err) => println!("\n[5] try_reserve(usize::MAX) failed: {err}"),
  }
  print_state("unchanged", &numbers);
}
