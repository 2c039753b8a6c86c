//! Maximum-clique consistency estimator.

use log::debug;

use crate::aggregate::{self, TranslationEstimate};
use crate::clique::MaxCliqueSolver;
use crate::core::TranslationEstimator;
use crate::correspondence::CorrespondenceSet;
use crate::error::Result;
use crate::graph::ConsistencyGraph;
use crate::settings::{CliqueSettings, MethodType};
use crate::types::DataMatrix;

/// Estimates a translation as the mean of the largest set of mutually
/// consistent correspondences.
///
/// Every `(source, target)` pair contributes a displacement vector; two vectors
/// are consistent when they differ by at most `epsilon`. The maximum clique of
/// that relation is the biggest group of pairs agreeing on one translation.
#[derive(Debug, Clone, Default)]
pub struct CliqueEstimator {
    settings: CliqueSettings,
}

impl CliqueEstimator {
    pub fn new(settings: CliqueSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &CliqueSettings {
        &self.settings
    }
}

impl TranslationEstimator for CliqueEstimator {
    fn method(&self) -> MethodType {
        MethodType::MaximumClique
    }

    fn estimate(&self, source: &DataMatrix, target: &DataMatrix) -> Result<TranslationEstimate> {
        self.settings.validate()?;
        let correspondences = CorrespondenceSet::new(source, target)?;
        let graph = ConsistencyGraph::build(&correspondences, self.settings.epsilon)?;

        let solution = MaxCliqueSolver::new(self.settings.clone()).solve(&graph);
        let estimate = aggregate::from_clique(&correspondences, &graph, &solution)?;
        debug!(
            "clique: translation ({:.3}, {:.3}) supported by {} of {} correspondences, {:?} components",
            estimate.translation.x,
            estimate.translation.y,
            estimate.support,
            correspondences.len(),
            estimate.graph_components
        );
        Ok(estimate)
    }
}
