//! Island model: several populations on a toroidal grid with migration.
//!
//! `n` islands are laid out row-major on an `a x a` grid with
//! `a = ceil(sqrt(n))`. Cells past `n` stay empty and never take part in
//! migration.
//!
//! A sweep steps every island once, in row-major order. After its step an
//! island may send copies of its best genomes to a neighbour, replacing the
//! tail of the neighbour's population. Islands later in the same sweep
//! already see those migrants.
//!
//! Neighbours are drawn from the source *row* only: both the row offset and
//! the column offset (each ±1, wrapping) are applied to the row index.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{fitness, fitness::rank_descending, fittest, GeneticIterator};
use crate::config::{MigrationSchedule, SolverConfig};
use crate::engine::rng::EvoRng;
use crate::error::{EvoError, EvoResult};
use crate::graph::{Graph, GraphPath};

/// Neighbour rolls before falling back to a uniform pick.
const MAX_NEIGHBOUR_ROLLS: usize = 32;

/// Sizes and rates shared by every island.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IslandSettings {
    /// Initial genomes per island.
    pub population_size: usize,
    /// Number of sweeps.
    pub generations: usize,
    /// Fraction of a population sent per migration.
    pub migration_rate: f64,
}

impl From<&SolverConfig> for IslandSettings {
    fn from(config: &SolverConfig) -> Self {
        Self {
            population_size: config.population_size,
            generations: config.generations,
            migration_rate: config.islands.migration_rate,
        }
    }
}

/// Result of [`IslandsModel::solve`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IslandsOutcome {
    /// Fittest genome seen on any island at any point.
    pub best: GraphPath,
    /// Sweeps run.
    pub generations: usize,
    /// Migrations performed.
    pub migrations: usize,
}

struct IslandState {
    iterator: GeneticIterator,
    population: Vec<GraphPath>,
    generation: usize,
    rng: EvoRng,
}

/// Coordinator for a grid of islands over one shared graph.
pub struct IslandsModel<'g> {
    graph: &'g Graph,
    side: usize,
    islands: Vec<IslandState>,
    settings: IslandSettings,
    should_migrate: Box<dyn Fn(usize) -> bool + Send + Sync>,
    rng: EvoRng,
    best: GraphPath,
    sweeps: usize,
}

/// Smallest `a` with `a * a >= n`.
fn grid_side(n: usize) -> usize {
    let mut side = 0;
    while side * side < n {
        side += 1;
    }
    side
}

impl<'g> IslandsModel<'g> {
    /// Place `iterators` row-major and seed each island.
    ///
    /// Every island gets its own RNG stream partitioned from `rng`, and its
    /// initial population is drawn from that stream.
    ///
    /// # Errors
    ///
    /// Returns [`EvoError::Config`] when `iterators` is empty.
    pub fn new(
        graph: &'g Graph,
        iterators: Vec<GeneticIterator>,
        settings: IslandSettings,
        mut rng: EvoRng,
    ) -> EvoResult<Self> {
        if iterators.is_empty() {
            return Err(EvoError::config("islands model needs at least one island"));
        }

        let side = grid_side(iterators.len());
        let streams = rng.partition(iterators.len());

        let islands: Vec<IslandState> = iterators
            .into_iter()
            .zip(streams)
            .map(|(iterator, mut island_rng)| {
                let population = (0..settings.population_size)
                    .map(|_| graph.random_path(&mut island_rng))
                    .collect();
                IslandState {
                    iterator,
                    population,
                    generation: 0,
                    rng: island_rng,
                }
            })
            .collect();

        let best = islands
            .iter()
            .filter_map(|island| fittest(&island.population))
            .fold(GraphPath::default(), |best, candidate| {
                if fitness(candidate) > fitness(&best) {
                    candidate.clone()
                } else {
                    best
                }
            });

        Ok(Self {
            graph,
            side,
            islands,
            settings,
            should_migrate: Box::new(|_| true),
            rng,
            best,
            sweeps: 0,
        })
    }

    /// Migrate on generations where `predicate` holds.
    #[must_use]
    pub fn with_migration(mut self, predicate: impl Fn(usize) -> bool + Send + Sync + 'static) -> Self {
        self.should_migrate = Box::new(predicate);
        self
    }

    /// Migrate according to `schedule`.
    #[must_use]
    pub fn with_schedule(self, schedule: MigrationSchedule) -> Self {
        self.with_migration(move |generation| schedule.should_migrate(generation))
    }

    /// Grid side length.
    #[must_use]
    pub const fn side(&self) -> usize {
        self.side
    }

    /// Number of islands.
    #[must_use]
    pub fn island_count(&self) -> usize {
        self.islands.len()
    }

    /// Whether the cell holds an island.
    #[must_use]
    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        row < self.side && col < self.side && row * self.side + col < self.islands.len()
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        self.is_occupied(row, col).then(|| row * self.side + col)
    }

    /// Current population of the island at `(row, col)`.
    #[must_use]
    pub fn population(&self, row: usize, col: usize) -> Option<&[GraphPath]> {
        self.index(row, col)
            .map(|idx| self.islands[idx].population.as_slice())
    }

    /// Generations the island at `(row, col)` has run.
    #[must_use]
    pub fn generation_of(&self, row: usize, col: usize) -> Option<usize> {
        self.index(row, col).map(|idx| self.islands[idx].generation)
    }

    /// Best genome seen so far.
    #[must_use]
    pub const fn best(&self) -> &GraphPath {
        &self.best
    }

    /// Genomes sent from a population of `len`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn migration_count(&self, len: usize) -> usize {
        (self.settings.migration_rate * len as f64).round().max(0.0) as usize
    }

    fn wrap(&self, index: usize, up: bool) -> usize {
        if up {
            (index + 1) % self.side
        } else {
            (index + self.side - 1) % self.side
        }
    }

    /// Pick a random occupied neighbour for an island on `row`.
    ///
    /// Returns `None` when none of the candidate cells is occupied.
    pub fn random_neighbour(&mut self, row: usize) -> Option<(usize, usize)> {
        let mut candidates: Vec<(usize, usize)> = Vec::with_capacity(4);
        for row_up in [false, true] {
            for col_up in [false, true] {
                let cell = (self.wrap(row, row_up), self.wrap(row, col_up));
                if self.is_occupied(cell.0, cell.1) && !candidates.contains(&cell) {
                    candidates.push(cell);
                }
            }
        }
        if candidates.is_empty() {
            return None;
        }

        for _ in 0..MAX_NEIGHBOUR_ROLLS {
            let row_up = self.rng.gen_bool(0.5);
            let col_up = self.rng.gen_bool(0.5);
            let cell = (self.wrap(row, row_up), self.wrap(row, col_up));
            if self.is_occupied(cell.0, cell.1) {
                return Some(cell);
            }
        }

        self.rng.choose(&candidates).copied()
    }

    /// Copy the `count` fittest genomes of `source` over the tail of `target`.
    ///
    /// The source keeps its genomes. A target with fewer than `count`
    /// genomes is replaced by the migrants. Returns `false` when either cell
    /// is empty or `count` is zero.
    pub fn migrate(&mut self, source: (usize, usize), target: (usize, usize), count: usize) -> bool {
        let (Some(from), Some(to)) = (self.index(source.0, source.1), self.index(target.0, target.1))
        else {
            return false;
        };
        if count == 0 {
            return false;
        }

        let donors = &self.islands[from].population;
        let scores: Vec<usize> = donors.iter().map(fitness).collect();
        let migrants: Vec<GraphPath> = rank_descending(&scores)
            .into_iter()
            .take(count)
            .map(|idx| donors[idx].clone())
            .collect();

        let receivers = &mut self.islands[to].population;
        receivers.truncate(receivers.len().saturating_sub(count));
        receivers.extend(migrants);
        true
    }

    /// Run `generations` sweeps and return the best genome seen.
    ///
    /// Generation numbers passed to the iterators and the migration
    /// predicate are global and 0-based; calling `solve` again continues
    /// from the last sweep.
    ///
    /// # Errors
    ///
    /// Propagates [`EvoError::PopulationExtinct`] from any island.
    pub fn solve(&mut self) -> EvoResult<IslandsOutcome> {
        let mut migrations = 0;

        for _ in 0..self.settings.generations {
            let generation = self.sweeps;
            self.sweeps += 1;
            for idx in 0..self.islands.len() {
                let row = idx / self.side;
                let col = idx % self.side;

                let state = &mut self.islands[idx];
                let next = state
                    .iterator
                    .step(self.graph, generation, &state.population, &mut state.rng)?;
                state.population = next;
                state.generation += 1;

                if let Some(candidate) = fittest(&state.population) {
                    if fitness(candidate) > fitness(&self.best) {
                        self.best = candidate.clone();
                    }
                }

                if !(self.should_migrate)(generation) {
                    continue;
                }
                let count = self.migration_count(self.islands[idx].population.len());
                if count < 1 {
                    continue;
                }

                let Some(target) = self.random_neighbour(row) else {
                    log::debug!("Island ({row}, {col}) has no occupied neighbour, skipping migration");
                    continue;
                };
                if self.migrate((row, col), target, count) {
                    migrations += 1;
                    log::debug!(
                        "[GEN: {generation}] Migrated {count} genomes ({row}, {col}) -> ({}, {})",
                        target.0,
                        target.1
                    );
                }
            }
        }

        Ok(IslandsOutcome {
            best: self.best.clone(),
            generations: self.settings.generations,
            migrations,
        })
    }
}

impl fmt::Debug for IslandsModel<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IslandsModel")
            .field("side", &self.side)
            .field("islands", &self.islands.len())
            .field("settings", &self.settings)
            .field(
                "genetic",
                &self
                    .islands
                    .iter()
                    .map(|island| island.iterator.config())
                    .collect::<Vec<_>>(),
            )
            .field("sweeps", &self.sweeps)
            .field("best", &self.best)
            .finish_non_exhaustive()
    }
}
