//! Turning estimator winners into a [`TranslationEstimate`].

use crate::clique::CliqueSolution;
use crate::correspondence::CorrespondenceSet;
use crate::error::{AlignmentError, Result};
use crate::graph::ConsistencyGraph;
use crate::settings::MethodType;
use crate::types::Vector;

/// Result of a translation estimation.
///
/// `translation` maps the source set onto the target set:
/// `target ≈ source + translation`.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationEstimate {
    /// The estimated translation.
    pub translation: Vector,
    /// Correspondences the estimate rests on: the clique size, or 1 for the
    /// stochastic winner.
    pub support: usize,
    /// Estimator that produced this result.
    pub method: MethodType,
    /// Cost of the winning stochastic candidate.
    pub score: Option<f64>,
    /// `(source, target)` indices of the winning stochastic candidate.
    pub candidate_pair: Option<(usize, usize)>,
    /// `(source, target)` indices of every correspondence in the winning clique.
    pub clique: Vec<(usize, usize)>,
    /// Edge count of the consistency graph.
    pub graph_edges: Option<usize>,
    /// Connected components of the consistency graph. Many small components
    /// with one large clique means a clear consensus.
    pub graph_components: Option<usize>,
    /// Branches explored by the clique search.
    pub branches: usize,
    /// `false` if the clique search stopped on its branch budget.
    pub exhaustive: bool,
}

impl TranslationEstimate {
    /// The same estimate expressed in the opposite direction
    /// (`source ≈ target + translation`).
    pub fn reversed(&self) -> Self {
        let swap = |(s, t): (usize, usize)| (t, s);
        Self {
            translation: -self.translation,
            candidate_pair: self.candidate_pair.map(swap),
            clique: self.clique.iter().copied().map(swap).collect(),
            ..self.clone()
        }
    }

    /// A clique of a single correspondence: no two pairs agreed on the translation.
    pub fn is_low_confidence(&self) -> bool {
        self.method == MethodType::MaximumClique && self.support <= 1
    }
}

/// Coordinate-wise mean, or `None` for an empty input.
pub fn mean_vector<I>(vectors: I) -> Option<Vector>
where
    I: IntoIterator<Item = Vector>,
{
    let (sum, count) = vectors
        .into_iter()
        .fold((Vector::zeros(), 0usize), |(sum, n), v| (sum + v, n + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Estimate from the winning stochastic candidate `flat` of `candidates`.
pub fn from_candidate(candidates: &CorrespondenceSet, flat: usize, score: f64) -> TranslationEstimate {
    TranslationEstimate {
        translation: candidates.vector(flat),
        support: 1,
        method: MethodType::Stochastic,
        score: Some(score),
        candidate_pair: Some(candidates.pair(flat)),
        clique: Vec::new(),
        graph_edges: None,
        graph_components: None,
        branches: 0,
        exhaustive: true,
    }
}

/// Estimate from a maximum clique of `graph` over `correspondences`: the mean
/// of its vectors.
pub fn from_clique(
    correspondences: &CorrespondenceSet,
    graph: &ConsistencyGraph,
    solution: &CliqueSolution,
) -> Result<TranslationEstimate> {
    let translation = mean_vector(solution.nodes.iter().map(|&n| correspondences.vector(n)))
        .ok_or_else(|| AlignmentError::InvalidInput("no correspondences to aggregate".to_string()))?;

    let mut clique: Vec<(usize, usize)> = solution
        .nodes
        .iter()
        .map(|&n| correspondences.pair(n))
        .collect();
    clique.sort_unstable();

    Ok(TranslationEstimate {
        translation,
        support: clique.len(),
        method: MethodType::MaximumClique,
        score: None,
        candidate_pair: None,
        clique,
        graph_edges: Some(graph.edge_count()),
        graph_components: Some(graph.component_count()),
        branches: solution.branches,
        exhaustive: solution.exhaustive,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::points_from_xy;
    use approx::assert_relative_eq;

    fn correspondences() -> CorrespondenceSet {
        let source = points_from_xy(&[(0.0, 0.0), (1.0, 0.0)]);
        let target = points_from_xy(&[(3.0, 1.0), (4.0, 1.2)]);
        CorrespondenceSet::new(&source, &target).unwrap()
    }

    #[test]
    fn mean_of_nothing_is_none() {
        assert!(mean_vector(std::iter::empty()).is_none());
        let m = mean_vector([Vector::new(1.0, 2.0), Vector::new(3.0, 0.0)]).unwrap();
        assert_relative_eq!(m, Vector::new(2.0, 1.0));
    }

    #[test]
    fn clique_estimate_averages_members() {
        let set = correspondences();
        // Vectors: 0 = (3, 1), 1 = (4, 1.2), 2 = (2, 1), 3 = (3, 1.2).
        // At epsilon 0.5 only 0 and 3 are joined.
        let graph = ConsistencyGraph::build(&set, 0.5).unwrap();
        let solution = CliqueSolution {
            nodes: vec![3, 0],
            branches: 4,
            exhaustive: true,
        };
        let estimate = from_clique(&set, &graph, &solution).unwrap();

        assert_relative_eq!(estimate.translation, Vector::new(3.0, 1.1), epsilon = 1e-12);
        assert_eq!(estimate.support, 2);
        assert_eq!(estimate.clique, vec![(0, 0), (1, 1)]);
        assert_eq!(estimate.graph_edges, Some(1));
        assert_eq!(estimate.graph_components, Some(3));
        assert!(!estimate.is_low_confidence());
    }

    #[test]
    fn empty_clique_is_rejected() {
        let solution = CliqueSolution {
            nodes: Vec::new(),
            branches: 0,
            exhaustive: true,
        };
        let set = correspondences();
        let graph = ConsistencyGraph::build(&set, 0.5).unwrap();
        assert!(from_clique(&set, &graph, &solution).is_err());
    }

    #[test]
    fn reversed_flips_translation_and_pairs() {
        let estimate = from_candidate(&correspondences(), 2, 0.5);
        assert_eq!(estimate.candidate_pair, Some((1, 0)));

        let back = estimate.reversed();
        assert_relative_eq!(back.translation, Vector::new(-2.0, -1.0));
        assert_eq!(back.candidate_pair, Some((0, 1)));
        assert_eq!(back.score, Some(0.5));
        assert_eq!(back.graph_components, None);
        assert!(!back.is_low_confidence());
    }
}
