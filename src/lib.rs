//! # bloomkit - Bloom Filters for Approximate Set Membership
//!
//! bloomkit answers "might this element have been inserted?" with a bounded,
//! one-sided error: false positives are possible, false negatives are not
//! (except through misuse of removal on the counting variant).
//!
//! ## Filters
//!
//! - **FixedFilter**: `m` bits, `k` positions per element; add and check
//! - **CountingFilter**: `m` saturating counters; add, remove and check
//! - **ScalableFilter**: a growing sequence of fixed filters whose compound
//!   error stays bounded as the input grows
//!
//! All three derive positions with the same double-hashing scheme
//! (see [`hash`]), and report an analytic false positive estimate for
//! their current fill.
//!
//! ## Example Usage
//!
//! ```rust
//! use bloomkit::filter::{CountingFilter, FixedFilter, ScalableFilter};
//!
//! # fn main() -> Result<(), bloomkit::Error> {
//! let mut fixed = FixedFilter::new(3, 100)?;
//! fixed.add(b"Hello");
//! assert!(fixed.check(b"Hello"));
//!
//! let mut counting = CountingFilter::new(3, 100)?;
//! counting.add(b"Hello");
//! counting.remove(b"Hello");
//! assert!(!counting.check(b"Hello"));
//!
//! let mut scalable = ScalableFilter::new(3, 20, 4.0, 10, 0.01)?;
//! scalable.add(b"Hello");
//! assert!(scalable.check(b"Hello"));
//! println!("estimated error: {:.4}", scalable.false_positive_rate());
//! # Ok(())
//! # }
//! ```
//!
//! ## Thread Safety
//!
//! Filters do no internal synchronization. Share one across threads behind a
//! lock owned by the caller.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod config;
pub mod error;
pub mod filter;
pub mod hash;

pub use config::ScalableOptions;
pub use error::{Error, Result};
pub use filter::{CountingFilter, Filter, FixedFilter, ScalableFilter};
pub use hash::{BaseHasher, FnvHasher, Xxh3Hasher};
