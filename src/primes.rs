//! Prime sizing helpers for the bucket array.
//!
//! Bucket counts are kept prime so that `hash % len` does not fold keys
//! sharing a common factor with the length into the same few buckets.
//! Trial division is plenty for table-sized inputs.

/// Returns whether `n` is prime.
pub fn is_prime(n: usize) -> bool {
    if n == 2 || n == 3 {
        return true;
    }
    if n < 2 || n % 2 == 0 {
        return false;
    }
    let mut i = 3usize;
    // `i <= n / i` is `i * i <= n` without the overflow.
    while i <= n / i {
        if n % i == 0 {
            return false;
        }
        i += 2;
    }
    true
}

/// Returns the first prime reached by scanning odd numbers upward from `n`.
///
/// Even inputs are bumped to the next odd number first, so the result is
/// always an odd prime `>= n` (`next_prime(2) == 3`).
///
/// # Panics
/// Panics if the scan would overflow `usize`, which cannot happen for any
/// length a `Vec` can actually allocate.
pub fn next_prime(n: usize) -> usize {
    let mut candidate = if n % 2 == 0 { n.checked_add(1) } else { Some(n) };
    loop {
        let c = candidate.expect("next_prime: candidate overflowed usize");
        if is_prime(c) {
            return c;
        }
        candidate = c.checked_add(2);
    }
}
