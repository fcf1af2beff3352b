//! Simulated annealing over path modifications.

use serde::{Deserialize, Serialize};

use super::{GraphHeuristic, HeuristicLog, HeuristicRun};
use crate::config::BaselineConfig;
use crate::engine::rng::EvoRng;
use crate::error::EvoResult;
use crate::genetic::fitness;
use crate::graph::Graph;

/// Geometric cooling: `T(i) = initial_temperature * cooling_rate^i`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnealingSchedule {
    /// Temperature at iteration 0.
    pub initial_temperature: f64,
    /// Factor applied per iteration.
    pub cooling_rate: f64,
}

impl AnnealingSchedule {
    /// Temperature at iteration `i`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn temperature(&self, i: usize) -> f64 {
        self.initial_temperature * self.cooling_rate.powi(i.min(i32::MAX as usize) as i32)
    }
}

impl Default for AnnealingSchedule {
    fn default() -> Self {
        Self::from(&BaselineConfig::default())
    }
}

impl From<&BaselineConfig> for AnnealingSchedule {
    fn from(config: &BaselineConfig) -> Self {
        Self {
            initial_temperature: config.initial_temperature,
            cooling_rate: config.cooling_rate,
        }
    }
}

/// Annealing with tail-regrowth moves.
///
/// Each move cuts the current path at a depth proportional to its length,
/// scaled by `|N(3, 1)| / 6`, and regrows it. Improvements are always
/// accepted; a worse or equal move is accepted with probability
/// `exp(-|Δ| / T(i))`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulatedAnnealing {
    /// Iteration budget.
    pub iterations: usize,
    /// Cooling schedule.
    pub schedule: AnnealingSchedule,
}

impl SimulatedAnnealing {
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    fn move_depth(len: usize, vertex_count: usize, rng: &mut EvoRng) -> usize {
        let scale = (rng.gen_normal(3.0, 1.0) / 6.0).abs();
        let cap = vertex_count.saturating_sub(1) as f64;
        (scale * len as f64).min(cap) as usize + 1
    }

    fn acceptance(&self, delta: usize, i: usize) -> f64 {
        let t = self.schedule.temperature(i);
        if t > 0.0 {
            #[allow(clippy::cast_precision_loss)]
            let delta = delta as f64;
            (-delta / t).exp()
        } else {
            0.0
        }
    }
}

impl GraphHeuristic for SimulatedAnnealing {
    fn name(&self) -> &'static str {
        "anneal"
    }

    fn solve(&self, graph: &Graph, rng: &mut EvoRng) -> EvoResult<HeuristicRun> {
        let mut current = graph.random_path(rng);
        let mut best = current.clone();
        let mut log = Vec::with_capacity(self.iterations);

        for i in 0..self.iterations {
            let depth = Self::move_depth(current.len(), graph.vertex_count(), rng);
            let candidate = graph.random_modify(&current, depth, rng);

            let current_goal = fitness(&current);
            let candidate_goal = fitness(&candidate);
            let accept = candidate_goal > current_goal
                || rng.gen_f64() < self.acceptance(current_goal.abs_diff(candidate_goal), i);

            if accept {
                current = candidate;
                if fitness(&current) > fitness(&best) {
                    best = current.clone();
                }
            }

            log.push(HeuristicLog {
                iteration: i,
                goal: fitness(&current),
            });
        }

        Ok(HeuristicRun { best, log })
    }
}
