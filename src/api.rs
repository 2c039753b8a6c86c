//! High-level Rust API for translation estimation.
//!
//! These functions wrap the estimators for the common cases: one pair of point
//! sets with either method, a configured run through [`AlignmentSettings`], and
//! keyed batches of wells aligned in parallel.

use std::collections::BTreeMap;

use log::debug;
use rayon::prelude::*;

use crate::choices::EstimatorChoice;
use crate::core::TranslationEstimator;
use crate::error::Result;
use crate::estimators::{CliqueEstimator, StochasticEstimator};
use crate::settings::{AlignmentSettings, CliqueSettings, StochasticSettings};
use crate::source::{pair_by_key, PointSource};
use crate::types::{DataMatrix, PointPair};

pub use crate::aggregate::TranslationEstimate;

/// Estimate the translation from `source` to `target` by stochastic voting.
///
/// # Arguments
/// * `source` - Source points (Nx2 matrix)
/// * `target` - Target points (Mx2 matrix)
/// * `settings` - Optional stochastic settings (uses defaults if None)
///
/// # Returns
/// `TranslationEstimate` with `target ≈ source + translation`.
pub fn find_translation_stochastic(
    source: &DataMatrix,
    target: &DataMatrix,
    settings: Option<StochasticSettings>,
) -> Result<TranslationEstimate> {
    StochasticEstimator::new(settings.unwrap_or_default()).estimate(source, target)
}

/// Estimate the translation from `source` to `target` as the mean of the
/// largest pairwise-consistent set of correspondences.
///
/// # Arguments
/// * `source` - Source points (Nx2 matrix)
/// * `target` - Target points (Mx2 matrix)
/// * `epsilon` - Consistency threshold in point units
///
/// # Returns
/// `TranslationEstimate` with `target ≈ source + translation`; `support` is
/// the clique size.
pub fn find_translation_clique(
    source: &DataMatrix,
    target: &DataMatrix,
    epsilon: f64,
) -> Result<TranslationEstimate> {
    CliqueEstimator::new(CliqueSettings::default().with_epsilon(epsilon)).estimate(source, target)
}

/// Run the estimator selected by `settings` on one pair.
pub fn align(
    source: &DataMatrix,
    target: &DataMatrix,
    settings: &AlignmentSettings,
) -> Result<TranslationEstimate> {
    EstimatorChoice::from(settings).estimate(source, target)
}

/// Align every pair of a keyed collection in parallel.
///
/// Each entry keeps its own outcome; one failing well does not affect the rest.
pub fn align_batch<K>(
    pairs: &BTreeMap<K, PointPair>,
    settings: &AlignmentSettings,
) -> BTreeMap<K, Result<TranslationEstimate>>
where
    K: Ord + Clone + Send + Sync,
{
    debug!(
        "aligning {} pairs with {}",
        pairs.len(),
        settings.method
    );
    let estimator = EstimatorChoice::from(settings);
    pairs
        .par_iter()
        .map(|(key, pair)| (key.clone(), estimator.estimate(&pair.source, &pair.target)))
        .collect()
}

/// Pair a point source's microscope (source) and biosensor (target) sets by
/// key and align every well.
///
/// Fails with [`AlignmentError::MissingPair`](crate::error::AlignmentError::MissingPair)
/// before aligning anything if a key exists on one side only.
pub fn align_sources<S>(
    source: &S,
    settings: &AlignmentSettings,
) -> Result<BTreeMap<String, Result<TranslationEstimate>>>
where
    S: PointSource + ?Sized,
{
    let pairs = pair_by_key(source)?;
    Ok(align_batch(&pairs, settings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AlignmentError;
    use crate::settings::MethodType;
    use crate::source::InMemoryPointSource;
    use crate::types::{points_from_xy, Vector};
    use approx::assert_relative_eq;

    fn shifted(points: &[(f64, f64)], dx: f64, dy: f64) -> DataMatrix {
        let moved: Vec<(f64, f64)> = points.iter().map(|&(x, y)| (x + dx, y + dy)).collect();
        points_from_xy(&moved)
    }

    #[test]
    fn align_follows_configured_method() {
        let pts = [(0.0, 0.0), (4.0, 1.0), (2.0, 7.0), (9.0, 3.0)];
        let source = points_from_xy(&pts);
        let target = shifted(&pts, -2.0, 5.0);

        for settings in [
            AlignmentSettings::default(),
            AlignmentSettings::stochastic(StochasticSettings::default()),
        ] {
            let estimate = align(&source, &target, &settings).unwrap();
            assert_eq!(estimate.method, settings.method);
            assert_relative_eq!(estimate.translation, Vector::new(-2.0, 5.0), epsilon = 1e-12);
        }
    }

    #[test]
    fn batch_keeps_per_key_errors() {
        let pts = [(0.0, 0.0), (3.0, 1.0), (1.0, 5.0)];
        let mut pairs = BTreeMap::new();
        pairs.insert(1u32, PointPair::new(points_from_xy(&pts), shifted(&pts, 1.0, 1.0)));
        pairs.insert(2u32, PointPair::new(points_from_xy(&pts), DataMatrix::zeros(0, 2)));

        let results = align_batch(&pairs, &AlignmentSettings::default());
        assert_eq!(results.len(), 2);
        assert_relative_eq!(
            results[&1].as_ref().unwrap().translation,
            Vector::new(1.0, 1.0),
            epsilon = 1e-12
        );
        assert!(matches!(results[&2], Err(AlignmentError::InvalidInput(_))));
    }

    #[test]
    fn sources_align_microscope_onto_biosensor() {
        let pts = [(10.0, 10.0), (20.0, 12.0), (15.0, 30.0)];
        let source = InMemoryPointSource::new()
            .with_microscope("B4", points_from_xy(&pts))
            .with_biosensor("B4", shifted(&pts, -4.0, 0.5));

        let settings = AlignmentSettings {
            method: MethodType::MaximumClique,
            ..AlignmentSettings::default()
        };
        let results = align_sources(&source, &settings).unwrap();
        let estimate = results["B4"].as_ref().unwrap();
        assert_relative_eq!(estimate.translation, Vector::new(-4.0, 0.5), epsilon = 1e-12);
        assert_eq!(estimate.support, 3);
    }
}
