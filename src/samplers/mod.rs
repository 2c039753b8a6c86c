//! Sampling strategies for the stochastic estimator.
//!
//! Samplers pick which source points generate translation candidates. They all
//! implement the shared [`Sampler`](crate::core::Sampler) trait.

pub mod uniform;

pub use uniform::UniformRandomSampler;
