//! Roulette selection with an S-shaped acceptance curve.
//!
//! Each genome is accepted independently, so the parent pool has a random
//! size anywhere between empty and the whole population.

use serde::{Deserialize, Serialize};

use super::{Fitness, SelectionOperator};
use crate::engine::rng::EvoRng;
use crate::graph::{Graph, GraphPath};

/// Default steepness of the acceptance curve.
pub const DEFAULT_BETA: f64 = 3.0;

/// Acceptance probability `1 / (1 + (x / (1 - x))^-beta)`.
///
/// `x` is fitness normalised by the vertex count. The curve is clamped at
/// the ends: `x <= 0` never accepts and `x >= 1` always accepts.
#[must_use]
pub fn s_shaped_probability(x: f64, beta: f64) -> f64 {
    if x.is_nan() || x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }
    let odds = x / (1.0 - x);
    1.0 / (1.0 + odds.powf(-beta))
}

/// Independent Bernoulli acceptance per genome.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouletteSelection {
    /// Steepness of the acceptance curve.
    pub beta: f64,
}

impl Default for RouletteSelection {
    fn default() -> Self {
        Self { beta: DEFAULT_BETA }
    }
}

impl SelectionOperator for RouletteSelection {
    fn select(
        &self,
        graph: &Graph,
        scored: &[(GraphPath, Fitness)],
        rng: &mut EvoRng,
    ) -> Vec<GraphPath> {
        let max_fitness = graph.vertex_count() as f64;

        scored
            .iter()
            .filter(|(_, score)| {
                let p = s_shaped_probability(*score as f64 / max_fitness, self.beta);
                rng.gen_bool(p)
            })
            .map(|(genome, _)| genome.clone())
            .collect()
    }
}
