//! Wrap-around index arithmetic.

/// Maps an unbounded 1-based logical index onto `1..=total`.
///
/// Computes `((index - 1) mod total) + 1` with a floored modulo, so zero and
/// negative indices wrap backwards from the end.
///
/// # Panics
///
/// Panics if `total` is zero. Callers reject empty sources before indexing.
pub fn normalize_index(index: i128, total: usize) -> usize {
    assert!(total > 0, "normalize_index requires at least one record");
    let total = total as i128;
    // rem_euclid result lies in 0..total, which fits back into usize.
    ((index - 1).rem_euclid(total) + 1) as usize
}
