//! Position derivation shared by every filter.
//!
//! Each inserted element is hashed once into two 64-bit base values `h1` and
//! `h2`; the `i`-th of `k` positions is then `(h1 + i * h2) mod m` (double
//! hashing). This avoids computing `k` independent hash functions while keeping
//! the derived positions weakly correlated for reasonable `k`. A step of
//! `h2 mod m == 0` would collapse all `k` positions into one, so it is
//! replaced by 1.
//!
//! The base hash is a swappable capability behind [`BaseHasher`]. Any
//! implementation must be a pure function of the input bytes so that positions
//! are stable across calls and across processes.

use std::hash::Hasher;
use std::iter::FusedIterator;

use xxhash_rust::xxh3::xxh3_128_with_seed;

/// A deterministic source of two base hash values per element.
pub trait BaseHasher {
    /// Hash `data` into a pair of 64-bit values `(h1, h2)`.
    fn hash_pair(&self, data: &[u8]) -> (u64, u64);
}

/// Default base hasher: 128-bit XXH3 split into two 64-bit halves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Xxh3Hasher {
    seed: u64,
}

impl Xxh3Hasher {
    /// Create a hasher with an explicit seed.
    ///
    /// Filters built with different seeds derive different positions for the
    /// same element.
    pub fn with_seed(seed: u64) -> Self {
        Self { seed }
    }

    /// The seed in use.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl BaseHasher for Xxh3Hasher {
    fn hash_pair(&self, data: &[u8]) -> (u64, u64) {
        let wide = xxh3_128_with_seed(data, self.seed);
        (wide as u64, (wide >> 64) as u64)
    }
}

/// Alternate base hasher built from two seeded FNV-1a passes.
///
/// FNV-1a alone mixes poorly into the low bits, so each pass is finished with
/// a 64-bit avalanche step before use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FnvHasher;

impl FnvHasher {
    const SEED_1: u32 = 0xbc9f1d34;
    const SEED_2: u32 = 0xd0e89c7b;

    fn hash_with_seed(data: &[u8], seed: u32) -> u64 {
        let mut state = FnvState::new_with_seed(seed);
        state.write(data);
        fmix64(state.finish())
    }
}

impl BaseHasher for FnvHasher {
    fn hash_pair(&self, data: &[u8]) -> (u64, u64) {
        (
            Self::hash_with_seed(data, Self::SEED_1),
            Self::hash_with_seed(data, Self::SEED_2),
        )
    }
}

/// Streaming FNV-1a state.
struct FnvState {
    state: u64,
}

impl FnvState {
    const FNV_OFFSET_BASIS: u64 = 0xcbf29ce484222325;
    const FNV_PRIME: u64 = 0x100000001b3;

    fn new_with_seed(seed: u32) -> Self {
        Self {
            state: Self::FNV_OFFSET_BASIS ^ (seed as u64),
        }
    }
}

impl Hasher for FnvState {
    fn finish(&self) -> u64 {
        self.state
    }

    fn write(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.state ^= byte as u64;
            self.state = self.state.wrapping_mul(Self::FNV_PRIME);
        }
    }
}

/// MurmurHash3 64-bit finalizer.
fn fmix64(mut k: u64) -> u64 {
    k ^= k >> 33;
    k = k.wrapping_mul(0xff51afd7ed558ccd);
    k ^= k >> 33;
    k = k.wrapping_mul(0xc4ceb9fe1a85ec53);
    k ^= k >> 33;
    k
}

/// Derive the `k` positions in `[0, m)` addressed by `data`.
///
/// Returns an empty iterator when `m == 0`; filters reject that shape at
/// construction so it never occurs on a live filter.
pub fn positions<H: BaseHasher + ?Sized>(hasher: &H, data: &[u8], k: u32, m: usize) -> Positions {
    let (h1, h2) = hasher.hash_pair(data);
    Positions::new(h1, h2, k, m)
}

/// Iterator over the positions of one element, produced by [`positions`].
#[derive(Debug, Clone)]
pub struct Positions {
    current: u128,
    step: u128,
    m: u128,
    remaining: u32,
}

impl Positions {
    fn new(h1: u64, h2: u64, k: u32, m: usize) -> Self {
        if m == 0 {
            return Self {
                current: 0,
                step: 0,
                m: 1,
                remaining: 0,
            };
        }
        let m = m as u128;
        let step = match h2 as u128 % m {
            0 => 1,
            step => step,
        };
        Self {
            current: h1 as u128 % m,
            step,
            m,
            remaining: k,
        }
    }
}

impl Iterator for Positions {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let pos = self.current as usize;
        // (h1 + i*h2) mod m, advanced one step at a time
        self.current = (self.current + self.step) % self.m;
        Some(pos)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Positions {}

impl FusedIterator for Positions {}
