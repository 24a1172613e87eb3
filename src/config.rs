//! Configuration options for scalable filters.

use serde::{Deserialize, Serialize};

/// Configuration for a [`ScalableFilter`](crate::filter::ScalableFilter).
///
/// Options can be built in code with the chainable setters or loaded from a
/// JSON document with [`ScalableOptions::from_json`]. Missing JSON fields fall
/// back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScalableOptions {
    /// Hash-function count shared by every slice.
    /// Default: 3
    pub num_hashes: u32,

    /// Bit-array size of the first slice.
    /// Default: 1024
    pub initial_size: usize,

    /// Multiplier applied to each new slice's bit-array size.
    ///
    /// The last slice can reach `initial_size * growth_factor^(max_slices - 1)`
    /// bits. Configurations past `isize::MAX` bits are rejected; anything below
    /// is allocated as slices are appended.
    /// Default: 2.0
    pub growth_factor: f64,

    /// Upper bound on the number of slices.
    /// Default: 16
    pub max_slices: usize,

    /// Target false positive probability of the first slice.
    /// Default: 0.01 (1%)
    pub initial_error_rate: f64,
}

impl Default for ScalableOptions {
    fn default() -> Self {
        Self {
            num_hashes: 3,
            initial_size: 1024,
            growth_factor: 2.0,
            max_slices: 16,
            initial_error_rate: 0.01,
        }
    }
}

impl ScalableOptions {
    /// Creates a new ScalableOptions with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses options from JSON and validates them.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Sets the hash-function count.
    pub fn num_hashes(mut self, value: u32) -> Self {
        self.num_hashes = value;
        self
    }

    /// Sets the first slice's bit-array size.
    pub fn initial_size(mut self, value: usize) -> Self {
        self.initial_size = value;
        self
    }

    /// Sets the slice growth factor.
    pub fn growth_factor(mut self, value: f64) -> Self {
        self.growth_factor = value;
        self
    }

    /// Sets the maximum number of slices.
    pub fn max_slices(mut self, value: usize) -> Self {
        self.max_slices = value;
        self
    }

    /// Sets the first slice's target false positive rate.
    pub fn initial_error_rate(mut self, value: f64) -> Self {
        self.initial_error_rate = value;
        self
    }

    /// Validates the options and returns an error if any are invalid.
    pub fn validate(&self) -> crate::Result<()> {
        if self.num_hashes == 0 {
            return Err(crate::Error::invalid_argument("num_hashes must be > 0"));
        }
        if self.initial_size == 0 {
            return Err(crate::Error::invalid_argument("initial_size must be > 0"));
        }
        if self.growth_factor.is_nan()
            || self.growth_factor <= 1.0
            || self.growth_factor.is_infinite()
        {
            return Err(crate::Error::invalid_argument("growth_factor must be > 1"));
        }
        if self.max_slices == 0 {
            return Err(crate::Error::invalid_argument("max_slices must be > 0"));
        }
        let largest = self.largest_slice_bits();
        if !largest.is_finite() || largest > isize::MAX as f64 {
            return Err(crate::Error::invalid_argument(format!(
                "largest slice would need {:e} bits",
                largest
            )));
        }
        if self.initial_error_rate.is_nan()
            || self.initial_error_rate <= 0.0
            || self.initial_error_rate >= 1.0
        {
            return Err(crate::Error::invalid_argument(
                "initial_error_rate must be between 0 and 1",
            ));
        }
        Ok(())
    }

    /// Bit-array size of the final slice, before rounding.
    fn largest_slice_bits(&self) -> f64 {
        let exponent = self.max_slices.saturating_sub(1) as f64;
        self.initial_size as f64 * self.growth_factor.powf(exponent)
    }
}
