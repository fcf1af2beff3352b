//! Single-solution baselines for comparison with the genetic search.
//!
//! Every baseline keeps one current path, records the best goal after each
//! iteration and returns the best path it found:
//!
//! - [`RandomRestartClimbing`]: fresh random path each iteration
//! - [`DeterministicClimbing`]: walks the codec order
//! - [`SimulatedAnnealing`]: perturbs with [`Graph::random_modify`]
//! - [`BruteForce`]: exhaustive enumeration, exact on small graphs

mod annealing;
mod climbing;


use serde::{Deserialize, Serialize};

use crate::engine::rng::EvoRng;
use crate::error::EvoResult;
use crate::genetic::{fitness, Fitness};
use crate::graph::{Graph, GraphPath};

pub use annealing::{AnnealingSchedule, SimulatedAnnealing};
pub use climbing::{BruteForce, DeterministicClimbing, RandomRestartClimbing};

/// Goal after one iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeuristicLog {
    /// 0-based iteration.
    pub iteration: usize,
    /// Fitness of the current solution after the iteration.
    pub goal: Fitness,
}

/// Best path plus the per-iteration goal trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeuristicRun {
    /// Best path found.
    pub best: GraphPath,
    /// One entry per iteration.
    pub log: Vec<HeuristicLog>,
}

impl HeuristicRun {
    /// Fitness of the best path.
    #[must_use]
    pub fn goal(&self) -> Fitness {
        fitness(&self.best)
    }
}

/// A baseline solver.
pub trait GraphHeuristic {
    /// Short name used in reports.
    fn name(&self) -> &'static str;

    /// Search `graph` for a long simple path.
    ///
    /// # Errors
    ///
    /// Implementations return an error only when the graph cannot be
    /// searched at all.
    fn solve(&self, graph: &Graph, rng: &mut EvoRng) -> EvoResult<HeuristicRun>;
}

/// Render a goal trace as `Iteration;Goal` CSV.
#[must_use]
pub fn format_goal_log(log: &[HeuristicLog]) -> String {
    let mut out = String::from("Iteration;Goal\n");
    for entry in log {
        out.push_str(&format!("{};{}\n", entry.iteration, entry.goal));
    }
    out
}
