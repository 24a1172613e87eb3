//! Counting Bloom filter.
//!
//! Same addressing as [`FixedFilter`](super::FixedFilter), but each position
//! holds a small saturating counter instead of a bit, which makes removal
//! possible.
//!
//! # Limitations
//!
//! Removal is only safe for elements that were actually added. Two elements
//! whose position sets overlap share counters, so removing one (or removing
//! something that was never added) can drop a shared counter to zero and
//! produce a false negative for the other. Removal does not guard against
//! this.
//!
//! Saturation has the same effect: once a counter sits at [`COUNTER_MAX`],
//! further adds are not counted, so removing enough of the elements that share
//! it can drop it to zero while others that use it are still present.

use crate::error::Result;
use crate::filter::{estimate_false_positive_rate, sizing, validate_dimensions, Filter};
use crate::hash::{positions, BaseHasher, Xxh3Hasher};

/// Saturation ceiling for every counter.
pub const COUNTER_MAX: u8 = u8::MAX;

/// Bloom filter over `m` saturating counters with add, remove and check.
///
/// # Example
/// ```
/// use bloomkit::filter::CountingFilter;
///
/// let mut filter = CountingFilter::new(3, 100).unwrap();
/// filter.add(b"Hello");
/// assert!(filter.check(b"Hello"));
///
/// filter.remove(b"Hello");
/// assert!(!filter.check(b"Hello"));
/// ```
#[derive(Debug, Clone)]
pub struct CountingFilter<H = Xxh3Hasher> {
    /// One counter per position, each in `[0, COUNTER_MAX]`
    counters: Vec<u8>,
    num_hashes: u32,
    num_bits: usize,
    /// Cumulative add calls; removals never decrement it
    inserted: u64,
    hasher: H,
}

impl CountingFilter {
    /// Create a new CountingFilter with `num_hashes` positions per element
    /// over `num_bits` counters.
    ///
    /// # Errors
    /// Returns `InvalidArgument` if either dimension is zero.
    pub fn new(num_hashes: u32, num_bits: usize) -> Result<Self> {
        Self::with_hasher(num_hashes, num_bits, Xxh3Hasher::default())
    }

    /// Create a CountingFilter sized for `expected_items` at `fp_rate`.
    pub fn with_rate(expected_items: usize, fp_rate: f64) -> Result<Self> {
        let num_bits = sizing::optimal_num_bits(expected_items, fp_rate);
        let num_hashes = sizing::optimal_num_hashes(num_bits, expected_items);
        Self::new(num_hashes, num_bits)
    }
}

impl<H: BaseHasher> CountingFilter<H> {
    /// Create a CountingFilter that derives positions with `hasher`.
    pub fn with_hasher(num_hashes: u32, num_bits: usize, hasher: H) -> Result<Self> {
        validate_dimensions(num_hashes, num_bits)?;

        Ok(Self {
            counters: vec![0u8; num_bits],
            num_hashes,
            num_bits,
            inserted: 0,
            hasher,
        })
    }

    /// Increment every counter addressed by `data`, clamping at `COUNTER_MAX`.
    pub fn add(&mut self, data: &[u8]) {
        for pos in positions(&self.hasher, data, self.num_hashes, self.num_bits) {
            let counter = &mut self.counters[pos];
            if *counter < COUNTER_MAX {
                *counter += 1;
            } else {
                log::trace!("counter {} saturated at {}", pos, COUNTER_MAX);
            }
        }
        self.inserted += 1;
    }

    /// Decrement every counter addressed by `data`, never below zero.
    ///
    /// Removing something that was never added is not an error, but it may
    /// clear counters that other elements still rely on.
    pub fn remove(&mut self, data: &[u8]) {
        for pos in positions(&self.hasher, data, self.num_hashes, self.num_bits) {
            let counter = &mut self.counters[pos];
            if *counter > 0 {
                *counter -= 1;
            }
        }
    }

    /// Check if `data` may be present: every addressed counter is non-zero.
    pub fn check(&self, data: &[u8]) -> bool {
        positions(&self.hasher, data, self.num_hashes, self.num_bits)
            .all(|pos| self.counters[pos] > 0)
    }

    /// Upper-bound false positive estimate based on cumulative adds.
    ///
    /// Removals are not subtracted: the live cardinality cannot be recovered
    /// from the counters alone.
    pub fn false_positive_rate(&self) -> f64 {
        estimate_false_positive_rate(self.num_hashes, self.num_bits, self.inserted)
    }

    /// Get the number of hash functions used.
    pub fn num_hashes(&self) -> u32 {
        self.num_hashes
    }

    /// Get the number of counters in the filter.
    pub fn num_bits(&self) -> usize {
        self.num_bits
    }

    /// Get the size of the counter array in bytes.
    pub fn size(&self) -> usize {
        self.counters.len()
    }

    /// Number of add calls so far.
    pub fn inserted_count(&self) -> u64 {
        self.inserted
    }

    /// Fraction of counters that are non-zero.
    pub fn fill_ratio(&self) -> f64 {
        let set = self.counters.iter().filter(|&&c| c > 0).count();
        set as f64 / self.num_bits as f64
    }

    /// Number of counters currently pinned at `COUNTER_MAX`.
    pub fn saturated_count(&self) -> usize {
        self.counters.iter().filter(|&&c| c == COUNTER_MAX).count()
    }

    /// The base hasher in use.
    pub fn hasher(&self) -> &H {
        &self.hasher
    }
}

impl<H: BaseHasher> Filter for CountingFilter<H> {
    fn add(&mut self, data: &[u8]) {
        CountingFilter::add(self, data)
    }

    fn check(&self, data: &[u8]) -> bool {
        CountingFilter::check(self, data)
    }

    fn false_positive_rate(&self) -> f64 {
        CountingFilter::false_positive_rate(self)
    }
}
