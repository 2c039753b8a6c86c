//! # cellalign - Translation estimation between 2D point sets
//!
//! `cellalign` estimates the translation that superimposes two independently
//! acquired point sets, such as cell centroids segmented from a microscope image
//! and signal peaks localised on a biosensor. The sets are unordered, of unequal
//! size, and contain missing points, false detections and noise.
//!
//! ## Quick Start
//!
//! ```rust
//! use cellalign::{find_translation_clique, find_translation_stochastic};
//! use nalgebra::DMatrix;
//!
//! let source = DMatrix::from_row_slice(3, 2, &[0.0, 0.0, 4.0, 1.0, 2.0, 6.0]);
//! let target = DMatrix::from_row_slice(3, 2, &[3.0, 2.0, 7.0, 3.0, 5.0, 8.0]);
//!
//! let clique = find_translation_clique(&source, &target, 1.0).unwrap();
//! assert_eq!(clique.support, 3);
//! assert!((clique.translation.x - 3.0).abs() < 1e-9);
//!
//! let voted = find_translation_stochastic(&source, &target, None).unwrap();
//! assert!((voted.translation.y - 2.0).abs() < 1e-9);
//! ```
//!
//! Estimates follow `target ≈ source + translation`; use
//! [`TranslationEstimate::reversed`] for the opposite direction.
//!
//! ## Estimators
//!
//! - **Stochastic voting** ([`StochasticEstimator`]): a (seeded, sampled) subset
//!   of source points pairs with every target point; each displacement is a
//!   candidate, scored against all correspondences with a robust cost.
//! - **Maximum clique** ([`CliqueEstimator`]): every displacement is a node,
//!   nodes within `epsilon` of each other are joined, and the mean of the
//!   maximum clique is the translation.
//!
//! ## Extending the Library
//!
//! - **[`TranslationEstimator`](crate::core::TranslationEstimator)**: a new estimation strategy
//! - **[`Sampler`](crate::core::Sampler)**: how voting source points are drawn, plugged in
//!   through [`SamplerChoice::Dyn`] and [`StochasticEstimator::with_sampler`]
//! - **[`Scoring`](crate::core::Scoring)**: how stochastic candidates are ranked, plugged in
//!   through [`ScoringChoice::Dyn`] and [`StochasticEstimator::with_scoring`]
//! - **[`NeighborhoodGraph`](crate::core::NeighborhoodGraph)**: any graph the clique solver can search
//! - **[`PointSource`](source::PointSource)**: where keyed point sets come from
//!
//! ## Modules
//!
//! - **[`api`](api)**: High-level functions and batch alignment
//! - **[`core`](core)**: Extension traits
//! - **[`estimators`](estimators)**: The two translation estimators
//! - **[`clique`](clique)**: Branch-and-bound maximum clique solver
//! - **[`graph`](graph)**: Consistency graph construction
//! - **[`settings`](settings)**: Configuration types

pub mod aggregate;
pub mod api;
pub mod choices;
pub mod clique;
pub mod core;
pub mod correspondence;
pub mod error;
pub mod estimators;
pub mod graph;
pub mod samplers;
pub mod scoring;
pub mod settings;
pub mod source;
pub mod types;
pub mod utils;

#[cfg(feature = "python")]
pub mod python;

// Re-export high-level API
pub use api::{
    align, align_batch, align_sources, find_translation_clique, find_translation_stochastic,
    TranslationEstimate,
};

// Re-export core traits for easy access
pub use self::core::{NeighborhoodGraph, Sampler, Scoring, TranslationEstimator};

pub use choices::{EstimatorChoice, SamplerChoice};
pub use error::{AlignmentError, Result};
pub use estimators::{CliqueEstimator, StochasticEstimator};
pub use scoring::ScoringChoice;
pub use settings::{
    AlignmentSettings, CliqueSettings, MethodType, ScoringType, SourceSelection,
    StochasticSettings,
};
pub use source::{centroids_from_labels, InMemoryPointSource, PointSource};
pub use types::{DataMatrix, PointPair};
