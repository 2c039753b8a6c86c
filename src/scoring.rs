//! Candidate costs for the stochastic estimator.
//!
//! A candidate translation `c` is compared with every correspondence vector
//! `v` through the residual length `‖v - c‖`. Two costs are provided:
//! - [`TruncatedMeanScoring`]: mean squared residual over the `|target|`
//!   smallest residuals. Extra source points without a partner are ignored.
//! - [`SumOfLengthsScoring`]: sum of all residual lengths.

use crate::core::Scoring;
use crate::correspondence::CorrespondenceSet;
use crate::settings::ScoringType;
use crate::types::Vector;

/// Mean squared residual over the best `|target|` correspondences.
#[derive(Debug, Clone, Copy, Default)]
pub struct TruncatedMeanScoring;

impl Scoring for TruncatedMeanScoring {
    type Score = f64;

    fn score(&self, correspondences: &CorrespondenceSet, candidate: &Vector) -> f64 {
        let mut lengths: Vec<f64> = correspondences
            .vectors()
            .iter()
            .map(|v| (v - candidate).norm())
            .collect();
        if lengths.is_empty() {
            return f64::INFINITY;
        }

        let keep = correspondences.target_len().min(lengths.len());
        if keep < lengths.len() {
            lengths.select_nth_unstable_by(keep - 1, f64::total_cmp);
        }
        let kept = &lengths[..keep];
        kept.iter().map(|l| l * l).sum::<f64>() / keep as f64
    }
}

/// Sum of every residual length.
#[derive(Debug, Clone, Copy, Default)]
pub struct SumOfLengthsScoring;

impl Scoring for SumOfLengthsScoring {
    type Score = f64;

    fn score(&self, correspondences: &CorrespondenceSet, candidate: &Vector) -> f64 {
        correspondences
            .vectors()
            .iter()
            .map(|v| (v - candidate).norm())
            .sum()
    }
}

/// Runtime scoring selection, with a `Dyn` escape hatch for custom costs.
pub enum ScoringChoice {
    TruncatedMean(TruncatedMeanScoring),
    SumOfLengths(SumOfLengthsScoring),
    Dyn(Box<dyn Scoring<Score = f64> + Send + Sync>),
}

impl Default for ScoringChoice {
    fn default() -> Self {
        ScoringChoice::TruncatedMean(TruncatedMeanScoring)
    }
}

impl From<ScoringType> for ScoringChoice {
    fn from(kind: ScoringType) -> Self {
        match kind {
            ScoringType::TruncatedMean => ScoringChoice::TruncatedMean(TruncatedMeanScoring),
            ScoringType::SumOfLengths => ScoringChoice::SumOfLengths(SumOfLengthsScoring),
        }
    }
}

impl Scoring for ScoringChoice {
    type Score = f64;

    fn score(&self, correspondences: &CorrespondenceSet, candidate: &Vector) -> f64 {
        match self {
            ScoringChoice::TruncatedMean(s) => s.score(correspondences, candidate),
            ScoringChoice::SumOfLengths(s) => s.score(correspondences, candidate),
            ScoringChoice::Dyn(s) => s.score(correspondences, candidate),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::points_from_xy;
    use approx::assert_relative_eq;

    fn line_case() -> CorrespondenceSet {
        // Source points 1, 4, 5 on the x axis shifted by (3, 2); targets 1..=5.
        let source = points_from_xy(&[(4.0, 2.0), (7.0, 2.0), (8.0, 2.0)]);
        let target = points_from_xy(&[(1.0, 0.0), (2.0, 0.0), (3.0, 0.0), (4.0, 0.0), (5.0, 0.0)]);
        CorrespondenceSet::new(&source, &target).unwrap()
    }

    #[test]
    fn truncated_mean_keeps_target_count_residuals() {
        let set = line_case();
        // Three exact matches, then residuals 1, 1, 1, ...: the best five are 0, 0, 0, 1, 1.
        let s = TruncatedMeanScoring.score(&set, &Vector::new(-3.0, -2.0));
        assert_relative_eq!(s, 0.4, epsilon = 1e-12);

        let off_by_one = TruncatedMeanScoring.score(&set, &Vector::new(-4.0, -2.0));
        assert_relative_eq!(off_by_one, 0.6, epsilon = 1e-12);
        assert!(s < off_by_one);
    }

    #[test]
    fn truncated_mean_uses_everything_when_target_dominates() {
        let source = points_from_xy(&[(0.0, 0.0)]);
        let target = points_from_xy(&[(1.0, 0.0), (3.0, 0.0)]);
        let set = CorrespondenceSet::new(&source, &target).unwrap();

        // Only two correspondences exist and both are kept: (0^2 + 2^2) / 2.
        let s = TruncatedMeanScoring.score(&set, &Vector::new(1.0, 0.0));
        assert_relative_eq!(s, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn sum_of_lengths_adds_every_residual() {
        let source = points_from_xy(&[(0.0, 0.0), (1.0, 0.0)]);
        let target = points_from_xy(&[(0.0, 3.0)]);
        let set = CorrespondenceSet::new(&source, &target).unwrap();

        // Vectors (0, 3) and (-1, 3); candidate (0, 3) leaves residuals 0 and 1.
        let s = SumOfLengthsScoring.score(&set, &Vector::new(0.0, 3.0));
        assert_relative_eq!(s, 1.0, epsilon = 1e-12);

        let choice = ScoringChoice::from(ScoringType::SumOfLengths);
        assert_relative_eq!(choice.score(&set, &Vector::new(0.0, 3.0)), 1.0, epsilon = 1e-12);
    }
}
