//! Core traits shared by the estimators.
//!
//! The crate is built around a handful of extension points:
//! - [`TranslationEstimator`]: the common interface of both estimators.
//! - [`Sampler`]: how the stochastic estimator picks its voting source points.
//! - [`Scoring`]: how a translation candidate is ranked against all correspondences.
//! - [`NeighborhoodGraph`]: the adjacency view the maximum-clique solver searches.

use crate::aggregate::TranslationEstimate;
use crate::correspondence::CorrespondenceSet;
use crate::error::Result;
use crate::settings::MethodType;
use crate::types::{DataMatrix, Vector};

/// Estimates the translation `t` such that `target ≈ source + t`.
pub trait TranslationEstimator {
    /// Which method this estimator implements.
    fn method(&self) -> MethodType;

    /// Run the estimator on one source/target pair.
    fn estimate(&self, source: &DataMatrix, target: &DataMatrix) -> Result<TranslationEstimate>;
}

/// Sampler responsible for drawing the voting subset of source points.
pub trait Sampler {
    /// Draw `sample_size` row indices of `data` into `out_indices`.
    ///
    /// Returns `false` if a valid sample could not be drawn.
    fn sample(
        &mut self,
        data: &DataMatrix,
        sample_size: usize,
        out_indices: &mut Vec<usize>,
    ) -> bool;
}

/// Scoring strategy used to rank translation candidates.
///
/// Scores are costs: a smaller score is a better candidate.
pub trait Scoring {
    type Score: Copy + PartialOrd + std::fmt::Debug;

    /// Score `candidate` against every vector of `correspondences`.
    fn score(&self, correspondences: &CorrespondenceSet, candidate: &Vector) -> Self::Score;
}

/// Undirected graph exposed as sorted adjacency lists.
pub trait NeighborhoodGraph {
    /// Number of nodes; nodes are `0..node_count()`.
    fn node_count(&self) -> usize;

    /// Neighbors of `index`, sorted ascending, without `index` itself.
    fn neighbors(&self, index: usize) -> &[usize];

    fn degree(&self, index: usize) -> usize {
        self.neighbors(index).len()
    }

    fn is_adjacent(&self, a: usize, b: usize) -> bool {
        self.neighbors(a).binary_search(&b).is_ok()
    }
}
