//! Scalable Bloom filter.
//!
//! A scalable filter is an append-only sequence of [`FixedFilter`] slices.
//! Slice `i` has roughly `m_0 * growth_factor^i` bits and a target error of
//! `initial_error_rate * TIGHTENING_RATIO^i`, so the union stays bounded while
//! the structure absorbs an unbounded number of insertions.
//!
//! The state is implied by the number of slices:
//!
//! - **Empty**: no slices yet. The first add creates slice 0.
//! - **Growing**: fewer than `max_slices` slices. Adds go to the last slice and
//!   a new one is appended once the last slice has reached its fill threshold.
//! - **Saturated**: `max_slices` slices. The last slice absorbs every further
//!   add and its error rises past its target. This is reported through
//!   [`ScalableFilter::false_positive_rate`], never as an error.

use crate::config::ScalableOptions;
use crate::error::Result;
use crate::filter::{sizing, FixedFilter, Filter};
use crate::hash::{BaseHasher, Xxh3Hasher};

/// Factor applied to the target error of each successive slice.
pub const TIGHTENING_RATIO: f64 = 0.9;

/// One fixed filter in the sequence, with the error target it was sized for.
#[derive(Debug, Clone)]
struct Slice<H> {
    filter: FixedFilter<H>,
    target_error: f64,
    /// Insertions the slice takes before its analytic rate passes `target_error`
    capacity: u64,
}

impl<H: BaseHasher> Slice<H> {
    fn new(num_hashes: u32, num_bits: usize, target_error: f64, hasher: H) -> Self {
        Self {
            filter: FixedFilter::from_parts(num_hashes, num_bits, hasher),
            target_error,
            capacity: sizing::capacity_for_rate(num_hashes, num_bits, target_error),
        }
    }

    fn is_full(&self) -> bool {
        self.filter.inserted_count() >= self.capacity
            || self.filter.false_positive_rate() >= self.target_error
    }
}

/// Bloom filter that grows by appending slices as it fills.
///
/// # Example
/// ```
/// use bloomkit::filter::ScalableFilter;
///
/// let mut filter = ScalableFilter::new(3, 20, 4.0, 10, 0.01).unwrap();
/// for i in 0..1000u32 {
///     filter.add(&i.to_le_bytes());
/// }
///
/// assert!(filter.check(&7u32.to_le_bytes()));
/// assert!(filter.num_slices() > 1);
/// ```
#[derive(Debug, Clone)]
pub struct ScalableFilter<H = Xxh3Hasher> {
    options: ScalableOptions,
    /// Creation order; never shrinks
    slices: Vec<Slice<H>>,
    hasher: H,
}

impl ScalableFilter {
    /// Create a scalable filter.
    ///
    /// # Arguments
    /// * `num_hashes` - Hash-function count shared by every slice
    /// * `initial_size` - Bit-array size of the first slice
    /// * `growth_factor` - Size multiplier between consecutive slices (> 1)
    /// * `max_slices` - Upper bound on the number of slices
    /// * `initial_error_rate` - Target false positive rate of the first slice, in (0, 1)
    ///
    /// # Errors
    /// Returns `InvalidArgument` if any argument is out of range.
    pub fn new(
        num_hashes: u32,
        initial_size: usize,
        growth_factor: f64,
        max_slices: usize,
        initial_error_rate: f64,
    ) -> Result<Self> {
        Self::with_options(ScalableOptions {
            num_hashes,
            initial_size,
            growth_factor,
            max_slices,
            initial_error_rate,
        })
    }

    /// Create a scalable filter from validated options.
    pub fn with_options(options: ScalableOptions) -> Result<Self> {
        Self::with_options_and_hasher(options, Xxh3Hasher::default())
    }
}

impl<H: BaseHasher + Clone> ScalableFilter<H> {
    /// Create a scalable filter whose slices derive positions with `hasher`.
    pub fn with_options_and_hasher(options: ScalableOptions, hasher: H) -> Result<Self> {
        options.validate()?;

        Ok(Self {
            options,
            slices: Vec::new(),
            hasher,
        })
    }

    /// Add `data` to the filter.
    ///
    /// Elements that already check as present are skipped so repeated adds
    /// do not inflate the fill. Otherwise the element goes to the last slice,
    /// after appending a fresh slice if the last one is full and the slice
    /// limit allows it.
    pub fn add(&mut self, data: &[u8]) {
        if self.check(data) {
            return;
        }

        if self.needs_slice() {
            self.push_slice();
        }

        if let Some(slice) = self.slices.last_mut() {
            slice.filter.add(data);
        }
    }

    /// Check if `data` may have been added to any slice.
    pub fn check(&self, data: &[u8]) -> bool {
        // Newest slices hold the most elements
        self.slices.iter().rev().any(|slice| slice.filter.check(data))
    }

    /// Probability that at least one slice reports a false positive:
    ///
    /// 1 - Π (1 - p_i)
    pub fn false_positive_rate(&self) -> f64 {
        let miss: f64 = self
            .slices
            .iter()
            .map(|slice| 1.0 - slice.filter.false_positive_rate())
            .product();
        (1.0 - miss).clamp(0.0, 1.0)
    }

    fn needs_slice(&self) -> bool {
        match self.slices.last() {
            None => true,
            Some(last) => last.is_full() && self.slices.len() < self.options.max_slices,
        }
    }

    fn push_slice(&mut self) {
        let index = self.slices.len();
        let (num_bits, target_error) = match self.slices.last() {
            None => (self.options.initial_size, self.options.initial_error_rate),
            Some(prev) => (
                grow(prev.filter.num_bits(), self.options.growth_factor),
                prev.target_error * TIGHTENING_RATIO,
            ),
        };

        let slice = Slice::new(
            self.options.num_hashes,
            num_bits,
            target_error,
            self.hasher.clone(),
        );
        log::debug!(
            "Appending slice {}: {} bits, target error {:.6}, capacity {}",
            index,
            num_bits,
            target_error,
            slice.capacity
        );
        self.slices.push(slice);

        if self.slices.len() == self.options.max_slices {
            log::info!(
                "Scalable filter reached {} slices, further adds go to the last slice",
                self.options.max_slices
            );
        }
    }

    /// Number of slices created so far.
    pub fn num_slices(&self) -> usize {
        self.slices.len()
    }

    /// True until the first add.
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    /// True once `max_slices` slices exist.
    pub fn is_saturated(&self) -> bool {
        self.slices.len() >= self.options.max_slices
    }

    /// Number of elements actually inserted into slices. Adds skipped as
    /// already present are not counted.
    pub fn inserted_count(&self) -> u64 {
        self.slices.iter().map(|slice| slice.filter.inserted_count()).sum()
    }

    /// Total bits across all slices.
    pub fn num_bits(&self) -> usize {
        self.slices.iter().map(|slice| slice.filter.num_bits()).sum()
    }

    /// Hash-function count shared by every slice.
    pub fn num_hashes(&self) -> u32 {
        self.options.num_hashes
    }

    /// The options this filter was built with.
    pub fn options(&self) -> &ScalableOptions {
        &self.options
    }

    /// The slice at `index`, in creation order.
    pub fn slice(&self, index: usize) -> Option<&FixedFilter<H>> {
        self.slices.get(index).map(|slice| &slice.filter)
    }

    /// Target error the slice at `index` was sized for.
    pub fn slice_target_error(&self, index: usize) -> Option<f64> {
        self.slices.get(index).map(|slice| slice.target_error)
    }
}

impl<H: BaseHasher + Clone> Filter for ScalableFilter<H> {
    fn add(&mut self, data: &[u8]) {
        ScalableFilter::add(self, data)
    }

    fn check(&self, data: &[u8]) -> bool {
        ScalableFilter::check(self, data)
    }

    fn false_positive_rate(&self) -> f64 {
        ScalableFilter::false_positive_rate(self)
    }
}

/// Next slice size: `ceil(m * growth_factor)`, strictly larger than `m`.
fn grow(num_bits: usize, growth_factor: f64) -> usize {
    let next = (num_bits as f64 * growth_factor).ceil() as usize;
    next.max(num_bits.saturating_add(1))
}
