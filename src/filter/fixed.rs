//! Fixed-size Bloom filter.
//!
//! A space-efficient probabilistic data structure used to test whether an element
//! is a member of a set. False positive matches are possible, but false negatives are not.

use crate::error::Result;
use crate::filter::{estimate_false_positive_rate, sizing, validate_dimensions, Filter};
use crate::hash::{positions, BaseHasher, Xxh3Hasher};

/// FixedFilter provides probabilistic set membership testing over `m` bits.
///
/// Bits are only ever set, never cleared, so an element that was added is
/// always reported as present.
///
/// # Example
/// ```
/// use bloomkit::filter::FixedFilter;
///
/// let mut filter = FixedFilter::new(3, 100).unwrap();
/// filter.add(b"Hello");
///
/// assert!(filter.check(b"Hello"));
/// // "Jello" might return true (false positive) or false
/// ```
#[derive(Debug, Clone)]
pub struct FixedFilter<H = Xxh3Hasher> {
    /// Bit array, packed eight bits per byte
    bits: Vec<u8>,
    /// Number of hash functions to use
    num_hashes: u32,
    /// Number of bits in the filter
    num_bits: usize,
    /// Number of add calls, used only for rate estimation
    inserted: u64,
    hasher: H,
}

impl FixedFilter {
    /// Create a new FixedFilter with `num_hashes` positions per element over
    /// `num_bits` bits.
    ///
    /// # Errors
    /// Returns `InvalidArgument` if either dimension is zero.
    pub fn new(num_hashes: u32, num_bits: usize) -> Result<Self> {
        Self::with_hasher(num_hashes, num_bits, Xxh3Hasher::default())
    }

    /// Create a FixedFilter sized for `expected_items` at `fp_rate`.
    ///
    /// # Arguments
    /// * `expected_items` - Expected number of items to be inserted
    /// * `fp_rate` - Desired false positive rate (e.g., 0.01 for 1%)
    pub fn with_rate(expected_items: usize, fp_rate: f64) -> Result<Self> {
        let num_bits = sizing::optimal_num_bits(expected_items, fp_rate);
        let num_hashes = sizing::optimal_num_hashes(num_bits, expected_items);
        Self::new(num_hashes, num_bits)
    }
}

impl<H: BaseHasher> FixedFilter<H> {
    /// Create a FixedFilter that derives positions with `hasher`.
    pub fn with_hasher(num_hashes: u32, num_bits: usize, hasher: H) -> Result<Self> {
        validate_dimensions(num_hashes, num_bits)?;
        Ok(Self::from_parts(num_hashes, num_bits, hasher))
    }

    /// Build without validation; callers guarantee both dimensions are non-zero.
    pub(crate) fn from_parts(num_hashes: u32, num_bits: usize, hasher: H) -> Self {
        let num_bytes = num_bits.div_ceil(8);

        Self {
            bits: vec![0u8; num_bytes],
            num_hashes,
            num_bits,
            inserted: 0,
            hasher,
        }
    }

    /// Set every bit addressed by `data`.
    pub fn add(&mut self, data: &[u8]) {
        for pos in positions(&self.hasher, data, self.num_hashes, self.num_bits) {
            self.set_bit(pos);
        }
        self.inserted += 1;
    }

    /// Check if `data` may have been added.
    ///
    /// Returns `false` only if `data` was definitely never added.
    pub fn check(&self, data: &[u8]) -> bool {
        positions(&self.hasher, data, self.num_hashes, self.num_bits)
            .all(|pos| self.is_bit_set(pos))
    }

    /// Estimated false positive rate for the current fill.
    ///
    /// p = (1 - e^(-kn/m))^k, where n counts every add call.
    pub fn false_positive_rate(&self) -> f64 {
        estimate_false_positive_rate(self.num_hashes, self.num_bits, self.inserted)
    }

    fn set_bit(&mut self, pos: usize) {
        self.bits[pos / 8] |= 1 << (pos % 8);
    }

    fn is_bit_set(&self, pos: usize) -> bool {
        (self.bits[pos / 8] & (1 << (pos % 8))) != 0
    }

    /// Get the size of the bit array in bytes.
    pub fn size(&self) -> usize {
        self.bits.len()
    }

    /// Get the number of hash functions used.
    pub fn num_hashes(&self) -> u32 {
        self.num_hashes
    }

    /// Get the number of bits in the filter.
    pub fn num_bits(&self) -> usize {
        self.num_bits
    }

    /// Number of add calls so far.
    pub fn inserted_count(&self) -> u64 {
        self.inserted
    }

    /// Fraction of bits currently set.
    pub fn fill_ratio(&self) -> f64 {
        let set: usize = self.bits.iter().map(|b| b.count_ones() as usize).sum();
        set as f64 / self.num_bits as f64
    }

    /// The base hasher in use.
    pub fn hasher(&self) -> &H {
        &self.hasher
    }
}

impl<H: BaseHasher> Filter for FixedFilter<H> {
    fn add(&mut self, data: &[u8]) {
        FixedFilter::add(self, data)
    }

    fn check(&self, data: &[u8]) -> bool {
        FixedFilter::check(self, data)
    }

    fn false_positive_rate(&self) -> f64 {
        FixedFilter::false_positive_rate(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::FnvHasher;

    #[test]
    fn test_fixed_filter_basic() {
        let mut filter = FixedFilter::new(3, 100).unwrap();

        filter.add(b"Hello");

        assert!(filter.check(b"Hello"));
        assert!(!filter.check(b"Jello"));
    }

    #[test]
    fn test_fixed_filter_rejects_zero_dimensions() {
        assert!(FixedFilter::new(0, 100).is_err());
        assert!(FixedFilter::new(3, 0).is_err());
    }

    #[test]
    fn test_fixed_filter_no_false_negatives() {
        let mut filter = FixedFilter::with_rate(1000, 0.01).unwrap();

        let keys: Vec<Vec<u8>> = (0..1000)
            .map(|i| format!("key{}", i).into_bytes())
            .collect();

        for key in &keys {
            filter.add(key);
        }

        // All added keys should be found (no false negatives)
        for key in &keys {
            assert!(
                filter.check(key),
                "False negative detected for key: {:?}",
                String::from_utf8_lossy(key)
            );
        }
    }

    #[test]
    fn test_fixed_filter_false_positive_rate() {
        let num_keys = 10000;
        let target_fp_rate = 0.01;

        let mut filter = FixedFilter::with_rate(num_keys, target_fp_rate).unwrap();

        for i in 0..num_keys {
            let key = format!("key{}", i);
            filter.add(key.as_bytes());
        }

        let test_keys = 10000;
        let mut false_positives = 0;

        for i in num_keys..(num_keys + test_keys) {
            let key = format!("key{}", i);
            if filter.check(key.as_bytes()) {
                false_positives += 1;
            }
        }

        let actual_fp_rate = false_positives as f64 / test_keys as f64;

        println!("Target FP rate: {:.4}", target_fp_rate);
        println!("Actual FP rate: {:.4}", actual_fp_rate);
        println!("Estimated FP rate: {:.4}", filter.false_positive_rate());

        // Allow some margin (2x the target rate) due to randomness
        assert!(
            actual_fp_rate < target_fp_rate * 2.0,
            "False positive rate too high: {:.4} (expected < {:.4})",
            actual_fp_rate,
            target_fp_rate * 2.0
        );
        assert!(filter.false_positive_rate() < 0.02);
    }

    #[test]
    fn test_fixed_filter_empty() {
        let filter = FixedFilter::new(3, 64).unwrap();

        // Empty filter should return false for any key
        assert!(!filter.check(b"key1"));
        assert!(!filter.check(b""));
        assert_eq!(filter.false_positive_rate(), 0.0);
        assert_eq!(filter.fill_ratio(), 0.0);
    }

    #[test]
    fn test_fixed_filter_accessors() {
        let mut filter = FixedFilter::new(4, 1001).unwrap();

        assert_eq!(filter.size(), 126);
        assert_eq!(filter.num_hashes(), 4);
        assert_eq!(filter.num_bits(), 1001);

        filter.add(b"a");
        filter.add(b"a");
        assert_eq!(filter.inserted_count(), 2);
        assert!(filter.fill_ratio() > 0.0);
        assert!(filter.fill_ratio() <= 4.0 / 1001.0);
    }

    #[test]
    fn test_fixed_filter_rate_grows_with_fill() {
        let mut filter = FixedFilter::new(4, 1000).unwrap();
        let mut last = filter.false_positive_rate();

        for i in 0..200 {
            filter.add(format!("item{}", i).as_bytes());
            let rate = filter.false_positive_rate();
            assert!(rate >= last);
            last = rate;
        }
        assert!(last > 0.0 && last < 1.0);
    }

    #[test]
    fn test_fixed_filter_with_fnv_hasher() {
        let mut filter = FixedFilter::with_hasher(3, 256, FnvHasher).unwrap();

        filter.add(b"alpha");
        filter.add(b"beta");

        assert!(filter.check(b"alpha"));
        assert!(filter.check(b"beta"));
    }

    #[test]
    fn test_fixed_filter_single_bit() {
        let mut filter = FixedFilter::new(2, 1).unwrap();
        assert!(!filter.check(b"x"));

        filter.add(b"x");
        // Every element maps to bit 0
        assert!(filter.check(b"anything"));
        assert_eq!(filter.false_positive_rate(), estimate_false_positive_rate(2, 1, 1));
    }
}
