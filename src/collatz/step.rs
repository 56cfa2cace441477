/*!
 * Collatz Step Function
 */

use crate::core::types::ChainLength;

/// Collatz successor of `n`: n/2 if even, 3n+1 if odd
///
/// Wraps on overflow in release builds; walkers use [`checked_step`].
#[inline(always)]
pub const fn step(n: u64) -> u64 {
    if n & 1 == 0 {
        n >> 1
    } else {
        3 * n + 1
    }
}

/// Collatz successor of `n`, or `None` if 3n+1 does not fit in a `u64`
///
/// # Performance
/// Hot path - called once per walker step
#[inline(always)]
pub const fn checked_step(n: u64) -> Option<u64> {
    if n & 1 == 0 {
        return Some(n >> 1);
    }
    match n.checked_mul(3) {
        Some(tripled) => tripled.checked_add(1),
        None => None,
    }
}

/// True for 1, 2, 4, 8, ...
#[inline(always)]
pub const fn is_power_of_two(n: u64) -> bool {
    n != 0 && n & (n - 1) == 0
}

/// Remaining chain length of a power of two (its base-2 logarithm)
///
/// Only meaningful when `is_power_of_two(n)`.
#[inline(always)]
pub const fn power_of_two_exponent(n: u64) -> ChainLength {
    n.trailing_zeros()
}
