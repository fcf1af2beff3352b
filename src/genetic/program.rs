//! Single-population genetic loop.

use serde::{Deserialize, Serialize};

use super::{fittest, GeneticIterator};
use crate::engine::rng::EvoRng;
use crate::error::{EvoError, EvoResult};
use crate::graph::{Graph, GraphPath};

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Termination {
    /// Every generation of the budget ran.
    BudgetExhausted,
    /// The population collapsed to a single genome.
    Converged,
}

/// Result of [`GeneticProgram::solve`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramOutcome {
    /// Fittest genome of the final population.
    pub best: GraphPath,
    /// Generations actually run.
    pub generations: usize,
    /// Why the run stopped.
    pub termination: Termination,
}

/// Evolves one population for a fixed generation budget.
#[derive(Debug)]
pub struct GeneticProgram {
    population_size: usize,
    generations: usize,
    iterator: GeneticIterator,
}

impl GeneticProgram {
    /// Create a program seeding `population_size` random paths.
    #[must_use]
    pub const fn new(population_size: usize, generations: usize, iterator: GeneticIterator) -> Self {
        Self {
            population_size,
            generations,
            iterator,
        }
    }

    /// Run the loop on `graph`.
    ///
    /// # Errors
    ///
    /// Returns [`EvoError::PopulationExtinct`] if the population is empty
    /// from the start or dies out.
    pub fn solve(&self, graph: &Graph, rng: &mut EvoRng) -> EvoResult<ProgramOutcome> {
        let mut population: Vec<GraphPath> = (0..self.population_size)
            .map(|_| graph.random_path(rng))
            .collect();

        for generation in 0..self.generations {
            population = self.iterator.step(graph, generation, &population, rng)?;

            if population.len() == 1 {
                log::info!("Population converged at generation {generation}");
                return Ok(ProgramOutcome {
                    best: population.swap_remove(0),
                    generations: generation + 1,
                    termination: Termination::Converged,
                });
            }
        }

        let best = fittest(&population)
            .cloned()
            .ok_or(EvoError::PopulationExtinct {
                generation: self.generations,
            })?;

        Ok(ProgramOutcome {
            best,
            generations: self.generations,
            termination: Termination::BudgetExhausted,
        })
    }
}
