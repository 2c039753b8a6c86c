//! Uniform random sampler drawing source subsets without replacement.

use crate::core::Sampler;
use crate::types::DataMatrix;
use crate::utils::UniformRandomGenerator;

/// Uniform random sampler drawing samples without replacement.
pub struct UniformRandomSampler {
    rng: UniformRandomGenerator,
}

impl Default for UniformRandomSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl UniformRandomSampler {
    /// Construct a new sampler with a random seed.
    pub fn new() -> Self {
        Self {
            rng: UniformRandomGenerator::new(),
        }
    }

    /// Construct a sampler from a fixed seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: UniformRandomGenerator::from_seed(seed),
        }
    }
}

impl Sampler for UniformRandomSampler {
    fn sample(
        &mut self,
        data: &DataMatrix,
        sample_size: usize,
        out_indices: &mut Vec<usize>,
    ) -> bool {
        let n = data.nrows();
        if sample_size == 0 || sample_size > n {
            return false;
        }

        self.rng.gen_unique(out_indices, n, sample_size);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_are_unique_and_reproducible() {
        let data = DataMatrix::zeros(20, 2);
        let mut a = Vec::new();
        let mut b = Vec::new();

        assert!(UniformRandomSampler::from_seed(3).sample(&data, 6, &mut a));
        assert!(UniformRandomSampler::from_seed(3).sample(&data, 6, &mut b));
        assert_eq!(a, b);

        let mut sorted = a.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), 6);
        assert!(sorted.iter().all(|&i| i < 20));
    }

    #[test]
    fn refuses_impossible_sizes() {
        let data = DataMatrix::zeros(4, 2);
        let mut out = Vec::new();
        let mut sampler = UniformRandomSampler::from_seed(0);
        assert!(!sampler.sample(&data, 0, &mut out));
        assert!(!sampler.sample(&data, 5, &mut out));
        assert!(sampler.sample(&data, 4, &mut out));
    }
}
