//! Hill climbing and exhaustive enumeration.

use super::{GraphHeuristic, HeuristicLog, HeuristicRun};
use crate::engine::rng::EvoRng;
use crate::error::EvoResult;
use crate::genetic::fitness;
use crate::graph::{Graph, GraphPath};

/// Draws a fresh random path every iteration and keeps strict improvements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomRestartClimbing {
    /// Iteration budget.
    pub iterations: usize,
}

impl GraphHeuristic for RandomRestartClimbing {
    fn name(&self) -> &'static str {
        "climb-random"
    }

    fn solve(&self, graph: &Graph, rng: &mut EvoRng) -> EvoResult<HeuristicRun> {
        let mut best = graph.random_path(rng);
        let mut log = Vec::with_capacity(self.iterations);

        for iteration in 0..self.iterations {
            let candidate = graph.random_path(rng);
            if fitness(&candidate) > fitness(&best) {
                best = candidate;
            }
            log.push(HeuristicLog {
                iteration,
                goal: fitness(&best),
            });
        }

        Ok(HeuristicRun { best, log })
    }
}

/// Steps through paths in codec order from a random start.
///
/// The cursor advances every iteration independently of the best path, so
/// a non-improving neighbour never stalls the walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeterministicClimbing {
    /// Iteration budget.
    pub iterations: usize,
}

impl GraphHeuristic for DeterministicClimbing {
    fn name(&self) -> &'static str {
        "climb-deterministic"
    }

    fn solve(&self, graph: &Graph, rng: &mut EvoRng) -> EvoResult<HeuristicRun> {
        let codec = graph.codec();
        let mut cursor = graph.random_path(rng);
        let mut best = cursor.clone();
        let mut log = Vec::with_capacity(self.iterations);

        for iteration in 0..self.iterations {
            let Some(next) = codec.next(graph, &cursor)? else {
                log::warn!("Graph has no valid path, stopping at iteration {iteration}");
                break;
            };
            if fitness(&next) > fitness(&best) {
                best = next.clone();
            }
            cursor = next;
            log.push(HeuristicLog {
                iteration,
                goal: fitness(&best),
            });
        }

        Ok(HeuristicRun { best, log })
    }
}

/// Enumerates every valid path and keeps the longest.
///
/// Exact, but the enumeration space is `(|V| + 1)^|V|`, so only usable on
/// very small graphs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BruteForce;

impl GraphHeuristic for BruteForce {
    fn name(&self) -> &'static str {
        "brute"
    }

    fn solve(&self, graph: &Graph, _rng: &mut EvoRng) -> EvoResult<HeuristicRun> {
        let mut best = GraphPath::default();
        let mut log = Vec::new();

        for (iteration, path) in graph.all_paths().enumerate() {
            if fitness(&path) > fitness(&best) {
                best = path;
            }
            log.push(HeuristicLog {
                iteration,
                goal: fitness(&best),
            });
        }

        Ok(HeuristicRun { best, log })
    }
}
