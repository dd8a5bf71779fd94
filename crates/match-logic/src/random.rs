//! Seeded pseudo-random number generator
//!
//! Deterministic PRNG for reproducible match execution.
//! Backed by ChaCha8, which gives the same stream on every platform.

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seeded random number generator
///
/// Deterministic: same seed + match index = same sequence.
/// Each match owns its own instance; nothing is shared between matches.
#[derive(Clone, Debug)]
pub struct SeededRng {
    inner: ChaCha8Rng,
}

impl SeededRng {
    /// Create a new RNG from a 32-byte seed and match index
    ///
    /// The match index selects an independent ChaCha stream, so matches
    /// sharing a run seed never draw from the same sequence.
    pub fn new(seed: &[u8; 32], match_index: u32) -> Self {
        let mut inner = ChaCha8Rng::from_seed(*seed);
        inner.set_stream(match_index as u64);
        Self { inner }
    }

    /// Create a new RNG from a plain integer seed (command-line friendly)
    pub fn from_u64(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Generate next u64
    pub fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    /// Generate a uniform value in [0, 1)
    pub fn next_f64(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    /// Bernoulli draw: `true` with probability `p`
    ///
    /// `p <= 0` and `p >= 1` are decided without touching the stream.
    pub fn chance(&mut self, p: f64) -> bool {
        if p <= 0.0 {
            false
        } else if p >= 1.0 {
            true
        } else {
            self.next_f64() < p
        }
    }

    /// Position in the underlying keystream, in 32-bit words.
    ///
    /// Advances whenever randomness is consumed.
    pub fn word_pos(&self) -> u128 {
        self.inner.get_word_pos()
    }
}
