//! Generation context: the seeded random stream and the current size.

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// Random stream plus size parameter threaded through every generation call.
///
/// A run owns exactly one context. It can be moved but not cloned, so two
/// strategies can never observe diverging copies of the same stream.
#[derive(Debug)]
pub struct GenContext {
    rng: StdRng,
    seed: u64,
    size: usize,
}

impl GenContext {
    /// Create a context whose stream is fully determined by `seed`
    pub fn from_seed(seed: u64, size: usize) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
            size,
        }
    }

    /// Create a context from a freshly drawn entropy seed
    ///
    /// The drawn seed is still recorded so a failure report can name it.
    pub fn from_entropy(size: usize) -> Self {
        Self::from_seed(rand::random(), size)
    }

    /// Create a context from an optional seed, falling back to entropy
    pub fn new(seed: Option<u64>, size: usize) -> Self {
        match seed {
            Some(seed) => Self::from_seed(seed, size),
            None => Self::from_entropy(size),
        }
    }

    /// The seed the stream was created with
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Current size bound for generated values
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn set_size(&mut self, size: usize) {
        self.size = size;
    }

    /// Next raw 64-bit output of the stream
    pub fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    /// Restart the stream from `seed`.
    ///
    /// The seed recorded for reporting is left untouched: reseeding is a
    /// deterministic function of the original stream.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Mutable access to the underlying generator for `rand` distributions
    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Run `f` with the size temporarily set to `size`.
    ///
    /// Recursive types draw their children through this with a smaller size,
    /// so generation bottoms out at size 0.
    pub fn with_size<T>(&mut self, size: usize, f: impl FnOnce(&mut Self) -> T) -> T {
        let saved = self.size;
        self.size = size;
        let value = f(self);
        self.size = saved;
        value
    }
}
