//! Maximum clique search by branch and bound.
//!
//! The solver follows the coloring-bounded scheme of Tomita's MCQ and the
//! PMC library:
//! - top-level nodes are visited in ascending degree order, each branching
//!   only over its neighbors that come later in that order;
//! - every frame colors its candidates greedily (mex rule) and visits them
//!   from the highest color down, abandoning the frame once
//!   `|clique| + color <= |best|`;
//! - candidates dominated by an already explored ("excluded") node are
//!   dropped before branching, and the coloring is compacted afterwards.
//!
//! The search runs on an explicit frame stack, so graphs with deep cliques
//! never grow the call stack.

use log::{debug, trace, warn};

use crate::core::NeighborhoodGraph;
use crate::settings::CliqueSettings;

/// Outcome of a maximum clique search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliqueSolution {
    /// Nodes of the best clique found, in the order they were added.
    pub nodes: Vec<usize>,
    /// Number of nodes branched on.
    pub branches: usize,
    /// `false` if the branch budget ran out before the search completed.
    pub exhaustive: bool,
}

/// Branch-and-bound maximum clique solver.
#[derive(Debug, Clone, Default)]
pub struct MaxCliqueSolver {
    settings: CliqueSettings,
}

impl MaxCliqueSolver {
    pub fn new(settings: CliqueSettings) -> Self {
        Self { settings }
    }

    /// Find a maximum clique of `graph`.
    ///
    /// An empty graph yields an empty clique; any non-empty graph yields at
    /// least one node.
    pub fn solve<G: NeighborhoodGraph>(&self, graph: &G) -> CliqueSolution {
        let n = graph.node_count();
        if n == 0 {
            return CliqueSolution {
                nodes: Vec::new(),
                branches: 0,
                exhaustive: true,
            };
        }

        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by_key(|&v| (graph.degree(v), v));
        let mut position = vec![0usize; n];
        for (i, &v) in order.iter().enumerate() {
            position[v] = i;
        }

        let initial = if self.settings.greedy_initial_clique {
            greedy_clique(graph, order[n - 1])
        } else {
            vec![order[n - 1]]
        };
        debug!("max clique: {n} nodes, initial clique of size {}", initial.len());

        let mut search = Search {
            graph,
            settings: &self.settings,
            clique: Vec::new(),
            best: initial,
            branches: 0,
            exhaustive: true,
        };

        for (i, &v) in order.iter().enumerate() {
            if search.out_of_budget() {
                break;
            }
            if graph.degree(v) < search.best.len() {
                continue;
            }

            let mut later = Vec::new();
            let mut excluded = Vec::new();
            for &u in graph.neighbors(v) {
                if position[u] > i {
                    later.push(u);
                } else {
                    excluded.push(u);
                }
            }
            if later.len() < search.best.len() {
                continue;
            }

            search.branches += 1;
            search.clique.clear();
            search.clique.push(v);
            search.expand(later, excluded);
        }

        if !search.exhaustive {
            warn!(
                "max clique: branch budget of {:?} exhausted, returning incumbent of size {}",
                self.settings.max_branches,
                search.best.len()
            );
        }
        debug!(
            "max clique: size {} after {} branches",
            search.best.len(),
            search.branches
        );

        CliqueSolution {
            nodes: search.best,
            branches: search.branches,
            exhaustive: search.exhaustive,
        }
    }
}

/// One level of the branch-and-bound search.
struct Frame {
    /// Clique size when this frame was opened.
    depth: usize,
    /// `(node, color)`, colors ascending; branching pops from the back.
    candidates: Vec<(usize, usize)>,
    /// Nodes adjacent to the whole clique whose branches are already covered.
    excluded: Vec<usize>,
}

struct Search<'a, G: NeighborhoodGraph> {
    graph: &'a G,
    settings: &'a CliqueSettings,
    clique: Vec<usize>,
    best: Vec<usize>,
    branches: usize,
    exhaustive: bool,
}

impl<G: NeighborhoodGraph> Search<'_, G> {
    fn out_of_budget(&mut self) -> bool {
        match self.settings.max_branches {
            Some(limit) if self.branches >= limit => {
                self.exhaustive = false;
                true
            }
            _ => false,
        }
    }

    fn record(&mut self) {
        if self.clique.len() > self.best.len() {
            trace!("max clique: new incumbent of size {}", self.clique.len());
            self.best.clone_from(&self.clique);
        }
    }

    fn open_frame(&self, candidates: &[usize], mut excluded: Vec<usize>) -> Frame {
        let (nodes, colors) = color_sort(self.graph, candidates);
        let mut colored: Vec<(usize, usize)> = nodes.into_iter().zip(colors).collect();
        if self.settings.dominance_pruning && !excluded.is_empty() {
            remove_dominated(
                self.graph,
                &mut colored,
                &mut excluded,
                self.settings.max_dominance_checks,
            );
        }
        Frame {
            depth: self.clique.len(),
            candidates: colored,
            excluded,
        }
    }

    /// Search every clique extending `self.clique` with nodes of `candidates`.
    fn expand(&mut self, candidates: Vec<usize>, excluded: Vec<usize>) {
        if candidates.is_empty() {
            self.record();
            return;
        }

        let graph = self.graph;
        let mut stack = vec![self.open_frame(&candidates, excluded)];

        while let Some(frame) = stack.last_mut() {
            if self.out_of_budget() {
                return;
            }
            let Some((v, color)) = frame.candidates.pop() else {
                stack.pop();
                continue;
            };
            if frame.depth + color <= self.best.len() {
                stack.pop();
                continue;
            }

            self.clique.truncate(frame.depth);
            self.clique.push(v);
            self.branches += 1;

            let next: Vec<usize> = frame
                .candidates
                .iter()
                .map(|&(u, _)| u)
                .filter(|&u| graph.is_adjacent(v, u))
                .collect();
            let next_excluded: Vec<usize> = frame
                .excluded
                .iter()
                .copied()
                .filter(|&w| graph.is_adjacent(v, w))
                .collect();
            frame.excluded.push(v);

            if next.is_empty() {
                self.record();
                continue;
            }
            if self.clique.len() + next.len() <= self.best.len() {
                continue;
            }

            let child = self.open_frame(&next, next_excluded);
            if child.candidates.is_empty() {
                self.record();
            } else {
                stack.push(child);
            }
        }
    }
}

/// Greedy coloring by the mex rule, visiting `candidates` in the given order.
///
/// Returns 1-based colors aligned with `candidates`: each node takes the
/// smallest color not used by an already colored neighbor among the
/// candidates. The number of colors bounds the clique number of the induced
/// subgraph from above.
pub fn greedy_coloring<G: NeighborhoodGraph>(graph: &G, candidates: &[usize]) -> Vec<usize> {
    let mut classes: Vec<Vec<usize>> = Vec::new();
    let mut colors = Vec::with_capacity(candidates.len());

    for &u in candidates {
        let free = classes
            .iter()
            .position(|class| class.iter().all(|&w| !graph.is_adjacent(u, w)));
        let class = match free {
            Some(k) => k,
            None => {
                classes.push(Vec::new());
                classes.len() - 1
            }
        };
        classes[class].push(u);
        colors.push(class + 1);
    }
    colors
}

/// Order `candidates` for branching: color them, highest-degree first, then
/// sort by ascending color. Returns `(nodes, colors)`.
pub fn color_sort<G: NeighborhoodGraph>(graph: &G, candidates: &[usize]) -> (Vec<usize>, Vec<usize>) {
    let mut by_degree = candidates.to_vec();
    by_degree.sort_by_key(|&v| (std::cmp::Reverse(graph.degree(v)), v));
    let colors = greedy_coloring(graph, &by_degree);

    let mut paired: Vec<(usize, usize)> = by_degree.into_iter().zip(colors).collect();
    paired.sort_by_key(|&(_, color)| color);
    paired.into_iter().unzip()
}

/// Move candidates dominated by an excluded node into `excluded`.
///
/// Candidate `u` is dominated by excluded `w` when `w ~ u` and every other
/// candidate adjacent to `u` is adjacent to `w`: any clique through `u`
/// grows by `w`, and cliques through `w` are already covered. Only the
/// `max_checks` most recently excluded nodes are tried per candidate.
/// Colors are compacted afterwards.
pub fn remove_dominated<G: NeighborhoodGraph>(
    graph: &G,
    candidates: &mut Vec<(usize, usize)>,
    excluded: &mut Vec<usize>,
    max_checks: usize,
) {
    let before = candidates.len();
    let mut i = 0;
    while i < candidates.len() {
        let u = candidates[i].0;
        let dominated = excluded
            .iter()
            .rev()
            .take(max_checks)
            .filter(|&&w| graph.is_adjacent(u, w))
            .any(|&w| {
                candidates
                    .iter()
                    .map(|&(p, _)| p)
                    .filter(|&p| graph.is_adjacent(u, p))
                    .all(|p| graph.is_adjacent(w, p))
            });
        if dominated {
            candidates.remove(i);
            excluded.push(u);
        } else {
            i += 1;
        }
    }

    if candidates.len() != before {
        trace!(
            "max clique: {} of {before} candidates dominated",
            before - candidates.len()
        );
        let mut colors: Vec<usize> = candidates.iter().map(|&(_, c)| c).collect();
        repair_colors(&mut colors);
        for (entry, color) in candidates.iter_mut().zip(colors) {
            entry.1 = color;
        }
    }
}

/// Compact ascending colors so classes are numbered `1..=k` without gaps.
///
/// Each emptied class shifts every higher color down by one.
pub fn repair_colors(colors: &mut [usize]) {
    let mut previous = None;
    let mut current = 0;
    for color in colors.iter_mut() {
        if previous != Some(*color) {
            previous = Some(*color);
            current += 1;
        }
        *color = current;
    }
}

/// Grow a clique from `start`, repeatedly adding the highest-degree
/// candidate adjacent to everything chosen so far.
fn greedy_clique<G: NeighborhoodGraph>(graph: &G, start: usize) -> Vec<usize> {
    let mut clique = vec![start];
    let mut candidates: Vec<usize> = graph.neighbors(start).to_vec();
    loop {
        let Some(next) = candidates
            .iter()
            .copied()
            .max_by_key(|&v| (graph.degree(v), v))
        else {
            break;
        };
        clique.push(next);
        candidates.retain(|&u| u != next && graph.is_adjacent(next, u));
    }
    clique
}
