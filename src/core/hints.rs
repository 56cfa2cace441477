/*!
 * Branch Hints
 * Branch prediction hints for the chain walker hot loop
 */

/// Hint that `b` is almost always true
///
/// # Performance
/// Memo consultations in the walker loop take the "claim and continue" path
/// far more often than the prune or failure paths.
///
/// On nightly (`nightly` feature) this lowers to `llvm.expect`. On stable it
/// returns the value unchanged.
#[inline(always)]
#[must_use]
pub fn likely(b: bool) -> bool {
    #[cfg(feature = "nightly")]
    {
        core::intrinsics::likely(b)
    }
    #[cfg(not(feature = "nightly"))]
    {
        b
    }
}

/// Hint that `b` is almost always false
///
/// Used for the cycle-invariant and overflow checks, which never fire on
/// healthy runs.
#[inline(always)]
#[must_use]
pub fn unlikely(b: bool) -> bool {
    #[cfg(feature = "nightly")]
    {
        core::intrinsics::unlikely(b)
    }
    #[cfg(not(feature = "nightly"))]
    {
        b
    }
}
