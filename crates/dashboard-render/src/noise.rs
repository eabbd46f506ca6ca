//! Noise source for the cosmetic map speckle.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Uniform samples in `[0, 1)`.
pub trait NoiseSource {
    fn next_unit(&mut self) -> f64;
}

/// ChaCha8-backed noise. Same seed, same speckle.
#[derive(Debug, Clone)]
pub struct SeededNoise {
    rng: ChaCha8Rng,
}

impl SeededNoise {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Fresh random seed for production use.
    pub fn from_entropy() -> Self {
        Self::from_seed(rand::random())
    }
}

impl NoiseSource for SeededNoise {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}
