//! Pairwise consistency graphs.
//!
//! Two correspondence vectors are consistent when they lie within `epsilon`
//! of each other: both could come from the same true translation plus noise.
//! The graph connects every consistent pair of the full `source x target`
//! product and is searched for its maximum clique.

use log::debug;
use petgraph::algo::connected_components;
use petgraph::graph::{NodeIndex, UnGraph};

use crate::core::NeighborhoodGraph;
use crate::correspondence::CorrespondenceSet;
use crate::error::{AlignmentError, Result};
use crate::types::Vector;

/// Plain undirected graph with sorted adjacency lists.
#[derive(Debug, Clone)]
pub struct AdjacencyGraph {
    neighbors: Vec<Vec<usize>>,
    edge_count: usize,
}

impl AdjacencyGraph {
    /// Build from an undirected edge list. Self-loops and repeated edges are dropped.
    ///
    /// # Panics
    /// If an edge endpoint is `>= node_count`.
    pub fn from_edges<I>(node_count: usize, edges: I) -> Self
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut neighbors = vec![Vec::new(); node_count];
        for (a, b) in edges {
            assert!(a < node_count && b < node_count, "edge ({a}, {b}) out of range");
            if a != b {
                neighbors[a].push(b);
                neighbors[b].push(a);
            }
        }

        let mut edge_count = 0;
        for list in neighbors.iter_mut() {
            list.sort_unstable();
            list.dedup();
            edge_count += list.len();
        }

        Self {
            neighbors,
            edge_count: edge_count / 2,
        }
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Copy into a `petgraph` graph carrying `weights` on the nodes.
    pub fn to_petgraph<N: Clone>(&self, weights: &[N]) -> UnGraph<N, ()> {
        assert_eq!(weights.len(), self.neighbors.len());
        let mut graph = UnGraph::with_capacity(self.neighbors.len(), self.edge_count);
        for w in weights {
            graph.add_node(w.clone());
        }
        for (a, list) in self.neighbors.iter().enumerate() {
            for &b in list.iter().filter(|&&b| b > a) {
                graph.add_edge(NodeIndex::new(a), NodeIndex::new(b), ());
            }
        }
        graph
    }
}

impl NeighborhoodGraph for AdjacencyGraph {
    fn node_count(&self) -> usize {
        self.neighbors.len()
    }

    fn neighbors(&self, index: usize) -> &[usize] {
        &self.neighbors[index]
    }
}

/// Consistency graph over a set of correspondence vectors.
///
/// Node `i` is correspondence vector `i`; `(i, j)` is an edge iff
/// `‖v_i - v_j‖ <= epsilon`.
#[derive(Debug, Clone)]
pub struct ConsistencyGraph {
    adjacency: AdjacencyGraph,
    epsilon: f64,
}

impl ConsistencyGraph {
    /// Build the graph for `correspondences` with threshold `epsilon`.
    pub fn build(correspondences: &CorrespondenceSet, epsilon: f64) -> Result<Self> {
        if !(epsilon.is_finite() && epsilon > 0.0) {
            return Err(AlignmentError::InvalidInput(format!(
                "epsilon must be a positive finite number, got {epsilon}"
            )));
        }

        let vectors = correspondences.vectors();
        let edges = consistent_pairs(vectors, epsilon);
        let adjacency = AdjacencyGraph::from_edges(vectors.len(), edges);
        debug!(
            "consistency graph: {} nodes, {} edges (epsilon = {epsilon})",
            vectors.len(),
            adjacency.edge_count()
        );

        Ok(Self { adjacency, epsilon })
    }

    /// Consistency threshold the graph was built with.
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Number of consistent pairs.
    pub fn edge_count(&self) -> usize {
        self.adjacency.edge_count()
    }

    /// Underlying adjacency lists searched by the clique solver.
    pub fn adjacency(&self) -> &AdjacencyGraph {
        &self.adjacency
    }

    /// `petgraph` copy with each node weighted by its correspondence vector,
    /// for inspection with `petgraph` algorithms.
    pub fn to_petgraph(&self, correspondences: &CorrespondenceSet) -> UnGraph<Vector, ()> {
        self.adjacency.to_petgraph(correspondences.vectors())
    }

    /// Number of connected components; every clique lies inside one of them.
    /// Reported as `TranslationEstimate::graph_components`.
    pub fn component_count(&self) -> usize {
        let unit = vec![(); self.adjacency.node_count()];
        connected_components(&self.adjacency.to_petgraph(&unit))
    }
}

impl NeighborhoodGraph for ConsistencyGraph {
    fn node_count(&self) -> usize {
        self.adjacency.node_count()
    }

    fn neighbors(&self, index: usize) -> &[usize] {
        self.adjacency.neighbors(index)
    }
}

/// All index pairs `(i, j)`, `i < j`, with `‖v_i - v_j‖ <= epsilon`.
///
/// Vectors are swept in x order; once the x gap exceeds `epsilon` no later
/// vector can be within range, which skips most far-apart pairs.
fn consistent_pairs(vectors: &[Vector], epsilon: f64) -> Vec<(usize, usize)> {
    let mut order: Vec<usize> = (0..vectors.len()).collect();
    order.sort_by(|&a, &b| vectors[a].x.total_cmp(&vectors[b].x));

    let mut pairs = Vec::new();
    for (pos, &i) in order.iter().enumerate() {
        let vi = vectors[i];
        for &j in &order[pos + 1..] {
            let vj = vectors[j];
            if vj.x - vi.x > epsilon {
                break;
            }
            if (vi - vj).norm() <= epsilon {
                pairs.push((i.min(j), i.max(j)));
            }
        }
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::points_from_xy;
    use rand::prelude::*;

    #[test]
    fn from_edges_deduplicates_and_sorts() {
        let g = AdjacencyGraph::from_edges(4, [(2, 0), (0, 2), (1, 1), (3, 0)]);
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.neighbors(0), &[2, 3]);
        assert_eq!(g.neighbors(1), &[] as &[usize]);
        assert!(g.is_adjacent(3, 0));
        assert!(!g.is_adjacent(1, 2));
    }

    #[test]
    fn sweep_matches_exhaustive_test_and_is_symmetric() {
        let mut rng = StdRng::seed_from_u64(11);
        let source: Vec<(f64, f64)> = (0..15)
            .map(|_| (rng.gen_range(0.0..20.0), rng.gen_range(0.0..20.0)))
            .collect();
        let target: Vec<(f64, f64)> = (0..12)
            .map(|_| (rng.gen_range(0.0..20.0), rng.gen_range(0.0..20.0)))
            .collect();
        let set = CorrespondenceSet::new(&points_from_xy(&source), &points_from_xy(&target))
            .unwrap();
        let epsilon = 1.5;
        let graph = ConsistencyGraph::build(&set, epsilon).unwrap();

        let v = set.vectors();
        let mut expected = 0;
        for i in 0..v.len() {
            for j in 0..v.len() {
                let consistent = i != j && (v[i] - v[j]).norm() <= epsilon;
                assert_eq!(graph.is_adjacent(i, j), consistent, "pair ({i}, {j})");
                assert_eq!(graph.is_adjacent(i, j), graph.is_adjacent(j, i));
                if consistent && i < j {
                    expected += 1;
                }
            }
        }
        assert_eq!(graph.edge_count(), expected);
    }

    #[test]
    fn boundary_distance_is_consistent() {
        let source = points_from_xy(&[(0.0, 0.0)]);
        let target = points_from_xy(&[(0.0, 0.0), (1.0, 0.0), (2.5, 0.0)]);
        let set = CorrespondenceSet::new(&source, &target).unwrap();
        let graph = ConsistencyGraph::build(&set, 1.0).unwrap();

        assert!(graph.is_adjacent(0, 1));
        assert!(!graph.is_adjacent(1, 2));
        assert_eq!(graph.component_count(), 2);

        let pg = graph.to_petgraph(&set);
        assert_eq!(pg.edge_count(), 1);
        assert_eq!(pg[NodeIndex::new(2)], Vector::new(2.5, 0.0));
    }

    #[test]
    fn rejects_non_positive_epsilon() {
        let pts = points_from_xy(&[(0.0, 0.0)]);
        let set = CorrespondenceSet::new(&pts, &pts).unwrap();
        assert!(ConsistencyGraph::build(&set, 0.0).is_err());
        assert!(ConsistencyGraph::build(&set, -1.0).is_err());
        assert!(ConsistencyGraph::build(&set, f64::NAN).is_err());
    }

    #[test]
    fn petgraph_copy_keeps_weights_and_edges() {
        let g = AdjacencyGraph::from_edges(3, [(0, 1), (1, 2)]);
        let pg = g.to_petgraph(&["a", "b", "c"]);
        assert_eq!(pg.node_count(), 3);
        assert_eq!(pg.edge_count(), 2);
        assert_eq!(pg[NodeIndex::new(2)], "c");
    }
}
