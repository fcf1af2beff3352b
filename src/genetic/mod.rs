//! Genetic search over graph paths.
//!
//! A genome is a [`GraphPath`]; its fitness is its vertex count. One
//! generation runs selection, elitism, pairing, crossover, deduplication and
//! mutation (see [`GeneticIterator`]). [`GeneticProgram`] loops a single
//! population, [`IslandsModel`] runs several on a toroidal grid with
//! migration.
//!
//! Each operator sits behind a trait so islands can be configured
//! independently:
//!
//! | Stage | Trait | Default |
//! |---|---|---|
//! | Selection | [`SelectionOperator`] | [`RouletteSelection`] |
//! | Pairing | [`PairingOperator`] | [`SingleEdgeDistance`] |
//! | Crossover | [`CrossoverOperator`] | [`SingleEdgeCrossover`] |
//! | Mutation | [`MutationOperator`] | [`ModifyVertices`] |

pub mod crossover;
pub mod fitness;
pub mod islands;
pub mod iterator;
pub mod mutation;
pub mod pairing;
pub mod program;
pub mod selection;

use std::fmt::Debug;
use std::sync::Arc;

use crate::engine::rng::EvoRng;
use crate::graph::{Graph, GraphPath};

pub use crossover::SingleEdgeCrossover;
pub use fitness::{evaluate_population, fitness, fittest, Fitness};
pub use islands::{IslandSettings, IslandsModel, IslandsOutcome};
pub use iterator::{deduplicate, elite_count, GeneticIterator};
pub use mutation::ModifyVertices;
pub use pairing::{SingleEdgeDistance, SingleEdgePairs};
pub use program::{GeneticProgram, ProgramOutcome, Termination};
pub use selection::{s_shaped_probability, RouletteSelection};

/// Turns a scored population into a parent pool.
pub trait SelectionOperator: Debug + Send + Sync {
    /// Select parents from `(genome, fitness)` pairs.
    fn select(
        &self,
        graph: &Graph,
        scored: &[(GraphPath, Fitness)],
        rng: &mut EvoRng,
    ) -> Vec<GraphPath>;
}

/// Proposes crossover candidates as index pairs into a parent pool.
pub trait PairingOperator: Debug + Send + Sync {
    /// Lazily yield `(first, second)` indices into `population`.
    fn pairs<'a>(
        &'a self,
        graph: &'a Graph,
        population: &'a [GraphPath],
    ) -> Box<dyn Iterator<Item = (usize, usize)> + 'a>;
}

/// Recombines two parents into zero or more valid offspring.
pub trait CrossoverOperator: Debug + Send + Sync {
    /// Produce offspring of `first` and `second`.
    fn crossover(&self, graph: &Graph, first: &GraphPath, second: &GraphPath) -> Vec<GraphPath>;
}

/// Perturbs a single genome.
pub trait MutationOperator: Debug + Send + Sync {
    /// Return a mutated copy of `genome`.
    fn mutate(&self, graph: &Graph, genome: &GraphPath, rng: &mut EvoRng) -> GraphPath;
}

/// Receives one formatted progress line per generation.
pub type ProgressSink = Arc<dyn Fn(&str) + Send + Sync>;

/// Progress sink forwarding every line to `log::info!`.
#[must_use]
pub fn log_sink() -> ProgressSink {
    Arc::new(|line| log::info!("{line}"))
}

/// Progress sink that drops every line.
#[must_use]
pub fn silent_sink() -> ProgressSink {
    Arc::new(|_| {})
}
