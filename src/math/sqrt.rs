//! Deterministic integer square root.

/// Upper bound on Newton iterations.  Starting from a power of two at or
/// above the root, the iteration converges for every `u128` well inside it.
const MAX_ITERATIONS: u32 = 128;

/// Returns `floor(sqrt(n))`.
///
/// Newton's method on unsigned integers, seeded with `2^ceil(bits/2)`,
/// which is never below the true root; the sequence then decreases
/// monotonically to the floor root.
///
/// ```
/// use hydra_swap::math::isqrt;
///
/// assert_eq!(isqrt(40_000), 200);
/// assert_eq!(isqrt(99), 9);
/// assert_eq!(isqrt(u128::MAX), u64::MAX as u128);
/// ```
#[must_use]
pub const fn isqrt(n: u128) -> u128 {
    if n < 2 {
        return n;
    }
    let bits = 128 - n.leading_zeros();
    let mut x: u128 = 1 << bits.div_ceil(2);
    let mut i = 0;
    while i < MAX_ITERATIONS {
        let y = (x + n / x) >> 1;
        if y >= x {
            break;
        }
        x = y;
        i += 1;
    }
    x
}
