//! Bloom filter variants.
//!
//! All three filters address their storage through the same position
//! derivation in [`crate::hash`] and differ only in what they store:
//!
//! - [`FixedFilter`]: one bit per position, add and check only.
//! - [`CountingFilter`]: one saturating counter per position, adds remove.
//! - [`ScalableFilter`]: a growing sequence of fixed filters with tightening
//!   per-slice error targets.

pub mod counting;
pub mod fixed;
pub mod scalable;
pub mod sizing;

pub use counting::CountingFilter;
pub use fixed::FixedFilter;
pub use scalable::{ScalableFilter, TIGHTENING_RATIO};

use crate::error::{Error, Result};

/// Approximate membership testing shared by every filter variant.
pub trait Filter {
    /// Record `data` as a member.
    fn add(&mut self, data: &[u8]);

    /// Check if `data` may be a member (can have false positives).
    fn check(&self, data: &[u8]) -> bool;

    /// Estimated probability that `check` returns true for a non-member.
    fn false_positive_rate(&self) -> f64;
}

/// Analytic false positive estimate for `n` insertions into `m` slots with
/// `k` positions per element:
///
/// p = (1 - e^(-kn/m))^k
pub fn estimate_false_positive_rate(k: u32, m: usize, n: u64) -> f64 {
    if n == 0 || m == 0 {
        return 0.0;
    }

    let k = k as f64;
    let n = n as f64;
    let m = m as f64;

    let exp = (-k * n / m).exp();
    (1.0 - exp).powf(k).clamp(0.0, 1.0)
}

/// Reject the `(k, m)` shapes no filter can be built with.
pub(crate) fn validate_dimensions(num_hashes: u32, num_bits: usize) -> Result<()> {
    if num_hashes == 0 {
        return Err(Error::invalid_argument("num_hashes must be > 0"));
    }
    if num_bits == 0 {
        return Err(Error::invalid_argument("num_bits must be > 0"));
    }
    Ok(())
}
