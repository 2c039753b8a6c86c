//! Miscellaneous utilities shared across the crate.
//!
//! A small wrapper around `rand` that keeps seeding in one place, so every
//! sampler can be made reproducible from a single `u64`.

use rand::prelude::*;
use rand::seq::index;

/// Uniform random index generator.
///
/// By default this uses an entropy-seeded RNG, but estimators construct it
/// from a fixed seed for reproducible behavior.
pub struct UniformRandomGenerator {
    rng: StdRng,
}

impl Default for UniformRandomGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl UniformRandomGenerator {
    /// Construct with a random seed.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Construct with a fixed seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Draw `amount` distinct indices from `[0, length)` into `out`.
    ///
    /// `out` is cleared first. The caller guarantees `amount <= length`.
    pub fn gen_unique(&mut self, out: &mut Vec<usize>, length: usize, amount: usize) {
        debug_assert!(amount <= length);
        out.clear();
        out.extend(index::sample(&mut self.rng, length, amount).into_iter());
    }
}

#[cfg(test)]
mod tests {
    use super::UniformRandomGenerator;

    #[test]
    fn unique_samples_within_bounds() {
        let mut rng = UniformRandomGenerator::from_seed(1234);
        let mut buf = Vec::new();
        rng.gen_unique(&mut buf, 11, 5);

        assert_eq!(buf.len(), 5);
        assert!(buf.iter().all(|&v| v <= 10));

        for i in 0..buf.len() {
            for j in (i + 1)..buf.len() {
                assert_ne!(buf[i], buf[j]);
            }
        }
    }

    #[test]
    fn full_draw_is_a_permutation() {
        let mut rng = UniformRandomGenerator::from_seed(7);
        let mut buf = Vec::new();
        rng.gen_unique(&mut buf, 8, 8);
        buf.sort_unstable();
        assert_eq!(buf, (0..8).collect::<Vec<_>>());
    }

    #[test]
    fn deterministic_with_same_seed() {
        let mut rng1 = UniformRandomGenerator::from_seed(42);
        let mut rng2 = UniformRandomGenerator::from_seed(42);

        let mut a1 = Vec::new();
        let mut a2 = Vec::new();
        rng1.gen_unique(&mut a1, 100, 10);
        rng2.gen_unique(&mut a2, 100, 10);

        assert_eq!(a1, a2);
    }
}
