//! Per-search pseudorandom generator.
//!
//! Every top-level search creates exactly one `SearchRng` and threads it by
//! `&mut` through everything that consumes randomness: shuffling a node's
//! unexpanded moves, breaking UCB1 and visit-count ties, and choosing
//! rollout moves. Seeding from a fixed value replays a search exactly.
//!
//! ```
//! use uct_engine::core::SearchRng;
//!
//! let mut a = SearchRng::new(7);
//! let mut b = SearchRng::new(7);
//! assert_eq!(a.gen_range_usize(0..100), b.gen_range_usize(0..100));
//! ```

use rand::seq::SliceRandom;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic RNG for one search call.
///
/// Uses ChaCha8 for speed while keeping good statistical quality.
#[derive(Clone, Debug)]
pub struct SearchRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl SearchRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an RNG seeded from operating-system entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().next_u64())
    }

    /// Seed this generator was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        slice.choose(&mut self.inner)
    }

    /// Reservoir step for uniform tie-breaking.
    ///
    /// Called when the `k`-th equally-best candidate (1-based) is seen;
    /// returns true with probability `1/k`, meaning the new candidate
    /// replaces the current pick. Over a single pass every tied candidate
    /// ends up chosen with equal probability.
    pub fn replace_tied(&mut self, k: u32) -> bool {
        k <= 1 || self.inner.gen_range(0..k) == 0
    }
}
