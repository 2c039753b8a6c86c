//! Translation estimators.
//!
//! - Stochastic voting over sampled correspondences
//! - Maximum clique of pairwise-consistent correspondences

pub mod clique;
pub mod stochastic;

pub use clique::CliqueEstimator;
pub use stochastic::StochasticEstimator;
