//! Parameter guidance for choosing `(k, m)`.
//!
//! These are the textbook formulas. Nothing in the filters tunes itself with
//! them except the scalable filter, which derives each slice's fill threshold
//! from [`capacity_for_rate`].

use super::estimate_false_positive_rate;

/// Smallest bit array we hand out from the sizing helpers.
pub const MIN_NUM_BITS: usize = 64;

/// Largest hash count the sizing helpers will suggest.
pub const MAX_NUM_HASHES: u32 = 30;

/// Optimal number of bits for `expected_items` at `fp_rate`:
/// m = -n * ln(p) / (ln(2)^2)
pub fn optimal_num_bits(expected_items: usize, fp_rate: f64) -> usize {
    if expected_items == 0 {
        return MIN_NUM_BITS;
    }
    let n = expected_items as f64;
    let p = fp_rate.clamp(0.0001, 0.9999);

    let num_bits = (-n * p.ln() / (2.0_f64.ln().powi(2))).ceil() as usize;
    num_bits.max(MIN_NUM_BITS)
}

/// Optimal number of hash functions: k = (m/n) * ln(2)
pub fn optimal_num_hashes(num_bits: usize, expected_items: usize) -> u32 {
    if expected_items == 0 {
        return 1;
    }

    let k = ((num_bits as f64 / expected_items as f64) * 2.0_f64.ln()).round() as u32;
    k.clamp(1, MAX_NUM_HASHES)
}

/// Largest insertion count `n` for which the analytic rate of a `(k, m)`
/// filter stays at or below `fp_rate`. Never less than 1.
///
/// Solves (1 - e^(-kn/m))^k = p for n = -(m/k) * ln(1 - p^(1/k)).
pub fn capacity_for_rate(num_hashes: u32, num_bits: usize, fp_rate: f64) -> u64 {
    if num_hashes == 0 || num_bits == 0 {
        return 1;
    }
    let k = num_hashes as f64;
    let m = num_bits as f64;
    let p = fp_rate.clamp(f64::MIN_POSITIVE, 1.0);

    let bound = -(m / k) * (1.0 - p.powf(1.0 / k)).ln();
    let mut n = if bound.is_finite() { bound.floor() as u64 } else { u64::MAX };

    // floor() can land one past the boundary through rounding
    while n > 1 && estimate_false_positive_rate(num_hashes, num_bits, n) > fp_rate {
        n -= 1;
    }
    n.max(1)
}
