//! Stochastic voting estimator.
//!
//! A subset of the source points is paired with every target point; each
//! resulting displacement is a translation candidate. Every candidate is
//! scored against the correspondences of the *full* source set and the
//! cheapest one wins. With a fixed seed the result is reproducible.

use std::sync::{Mutex, PoisonError};

use log::{debug, trace};

use crate::aggregate::{self, TranslationEstimate};
use crate::choices::SamplerChoice;
use crate::core::{Sampler, Scoring, TranslationEstimator};
use crate::correspondence::CorrespondenceSet;
use crate::error::{AlignmentError, Result};
use crate::samplers::UniformRandomSampler;
use crate::scoring::ScoringChoice;
use crate::settings::{MethodType, SourceSelection, StochasticSettings};
use crate::types::{validate_point_set, DataMatrix};

/// Estimates a translation by scoring candidates from a sampled source subset.
///
/// By default the voting subset is drawn by a [`UniformRandomSampler`] seeded
/// from the settings on every call, and candidates are ranked by the cost named
/// in the settings. Both can be replaced with [`with_sampler`](Self::with_sampler)
/// and [`with_scoring`](Self::with_scoring).
pub struct StochasticEstimator {
    settings: StochasticSettings,
    scoring: ScoringChoice,
    sampler: Option<Mutex<SamplerChoice>>,
}

impl Default for StochasticEstimator {
    fn default() -> Self {
        Self::new(StochasticSettings::default())
    }
}

impl StochasticEstimator {
    pub fn new(settings: StochasticSettings) -> Self {
        Self {
            scoring: ScoringChoice::from(settings.scoring),
            settings,
            sampler: None,
        }
    }

    /// Rank candidates with `scoring` instead of the configured cost.
    pub fn with_scoring(mut self, scoring: ScoringChoice) -> Self {
        self.scoring = scoring;
        self
    }

    /// Draw `SourceSelection::Ratio` subsets with `sampler`.
    ///
    /// The sampler keeps its state across calls, so the seed in the settings
    /// no longer applies. Explicit index selections bypass it.
    pub fn with_sampler(mut self, sampler: SamplerChoice) -> Self {
        self.sampler = Some(Mutex::new(sampler));
        self
    }

    pub fn settings(&self) -> &StochasticSettings {
        &self.settings
    }

    /// Source rows that generate candidates.
    fn select_sources(&self, source: &DataMatrix) -> Result<Vec<usize>> {
        match &self.settings.selection {
            SourceSelection::Indices(indices) => Ok(indices.clone()),
            SourceSelection::Ratio(ratio) => {
                let n = source.nrows();
                let sample_size = (ratio * n as f64).floor() as usize;
                if sample_size == 0 {
                    return Err(AlignmentError::InvalidInput(format!(
                        "sampling ratio {ratio} selects no points out of {n}"
                    )));
                }

                let mut indices = Vec::with_capacity(sample_size);
                let drawn = match &self.sampler {
                    Some(sampler) => sampler
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner)
                        .sample(source, sample_size, &mut indices),
                    None => UniformRandomSampler::from_seed(self.settings.seed).sample(
                        source,
                        sample_size,
                        &mut indices,
                    ),
                };
                if !drawn {
                    return Err(AlignmentError::InvalidInput(format!(
                        "sampler could not draw {sample_size} of {n} source points"
                    )));
                }
                Ok(indices)
            }
        }
    }
}

impl TranslationEstimator for StochasticEstimator {
    fn method(&self) -> MethodType {
        MethodType::Stochastic
    }

    fn estimate(&self, source: &DataMatrix, target: &DataMatrix) -> Result<TranslationEstimate> {
        validate_point_set(source, "source")?;
        validate_point_set(target, "target")?;
        self.settings.validate(source.nrows())?;

        let indices = self.select_sources(source)?;
        let candidates = CorrespondenceSet::from_source_subset(source, target, &indices)?;
        let correspondences = CorrespondenceSet::new(source, target)?;
        debug!(
            "stochastic: {} of {} source points vote, {} candidates against {} correspondences",
            indices.len(),
            source.nrows(),
            candidates.len(),
            correspondences.len()
        );

        let mut best: Option<(usize, f64)> = None;
        for (flat, candidate) in candidates.vectors().iter().enumerate() {
            let score = self.scoring.score(&correspondences, candidate);
            if best.map_or(true, |(_, best_score)| score < best_score) {
                trace!("stochastic: candidate {flat} {candidate:?} improves to {score}");
                best = Some((flat, score));
            }
        }

        let (flat, score) = best.ok_or_else(|| {
            AlignmentError::InvalidInput("no translation candidates were generated".to_string())
        })?;
        let estimate = aggregate::from_candidate(&candidates, flat, score);
        debug!(
            "stochastic: translation ({:.3}, {:.3}) from pair {:?}, score {score:.4}",
            estimate.translation.x, estimate.translation.y, estimate.candidate_pair
        );
        Ok(estimate)
    }
}
