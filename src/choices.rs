//! Runtime component selection.
//!
//! The estimators are plain generic-free structs; these enums let callers pick
//! components from configuration while still going through the shared traits.
//! Each enum carries a `Dyn` variant for custom implementations.

use crate::aggregate::TranslationEstimate;
use crate::core::{Sampler, TranslationEstimator};
use crate::error::Result;
use crate::estimators::{CliqueEstimator, StochasticEstimator};
use crate::samplers::UniformRandomSampler;
use crate::settings::{AlignmentSettings, MethodType};
use crate::types::DataMatrix;

/// Runtime sampler selection for the stochastic estimator.
pub enum SamplerChoice {
    Uniform(UniformRandomSampler),
    Dyn(Box<dyn Sampler + Send + Sync>),
}

impl Default for SamplerChoice {
    fn default() -> Self {
        SamplerChoice::Uniform(UniformRandomSampler::new())
    }
}

impl Sampler for SamplerChoice {
    fn sample(&mut self, data: &DataMatrix, sample_size: usize, out_indices: &mut Vec<usize>) -> bool {
        match self {
            SamplerChoice::Uniform(s) => s.sample(data, sample_size, out_indices),
            SamplerChoice::Dyn(s) => s.sample(data, sample_size, out_indices),
        }
    }
}

/// Runtime estimator selection.
pub enum EstimatorChoice {
    Stochastic(StochasticEstimator),
    MaximumClique(CliqueEstimator),
    Dyn(Box<dyn TranslationEstimator + Send + Sync>),
}

impl Default for EstimatorChoice {
    fn default() -> Self {
        EstimatorChoice::MaximumClique(CliqueEstimator::default())
    }
}

impl From<&AlignmentSettings> for EstimatorChoice {
    fn from(settings: &AlignmentSettings) -> Self {
        match settings.method {
            MethodType::Stochastic => {
                EstimatorChoice::Stochastic(StochasticEstimator::new(settings.stochastic.clone()))
            }
            MethodType::MaximumClique => {
                EstimatorChoice::MaximumClique(CliqueEstimator::new(settings.clique.clone()))
            }
        }
    }
}

impl TranslationEstimator for EstimatorChoice {
    fn method(&self) -> MethodType {
        match self {
            EstimatorChoice::Stochastic(e) => e.method(),
            EstimatorChoice::MaximumClique(e) => e.method(),
            EstimatorChoice::Dyn(e) => e.method(),
        }
    }

    fn estimate(&self, source: &DataMatrix, target: &DataMatrix) -> Result<TranslationEstimate> {
        match self {
            EstimatorChoice::Stochastic(e) => e.estimate(source, target),
            EstimatorChoice::MaximumClique(e) => e.estimate(source, target),
            EstimatorChoice::Dyn(e) => e.estimate(source, target),
        }
    }
}
