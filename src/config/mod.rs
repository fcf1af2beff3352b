//! Solver configuration with YAML schema and validation.
//!
//! Every solver is driven by a single [`SolverConfig`]. Values are checked in
//! two passes:
//! - field ranges through `validator` derives
//! - cross-field rules in [`SolverConfig::check`]
//!
//! ```rust
//! use longpath::config::{MigrationSchedule, SolverConfig};
//!
//! let config = SolverConfig::from_yaml(
//!     "seed: 7\npopulation_size: 40\nislands:\n  count: 9\n  migration:\n    kind: every\n    interval: 5\n",
//! )
//! .unwrap();
//! assert_eq!(config.islands.migration, MigrationSchedule::Every { interval: 5 });
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use validator::Validate;

use crate::error::{EvoError, EvoResult};

/// Top-level solver configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct SolverConfig {
    /// Master seed for every RNG stream.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Genomes per population (per island in the islands model).
    #[validate(range(min = 1))]
    #[serde(default = "default_population_size")]
    pub population_size: usize,

    /// Generation budget.
    #[validate(range(min = 1))]
    #[serde(default = "default_generations")]
    pub generations: usize,

    /// Operator probabilities shared by every generation step.
    #[validate(nested)]
    #[serde(default)]
    pub genetic: GeneticConfig,

    /// Island grid and migration.
    #[validate(nested)]
    #[serde(default)]
    pub islands: IslandsConfig,

    /// Baseline heuristics.
    #[validate(nested)]
    #[serde(default)]
    pub baseline: BaselineConfig,
}

const fn default_seed() -> u64 {
    42
}

const fn default_population_size() -> usize {
    100
}

const fn default_generations() -> usize {
    100
}

impl SolverConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - YAML parsing fails
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> EvoResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> EvoResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.check()?;
        Ok(config)
    }

    /// Create a builder for configuration.
    #[must_use]
    pub fn builder() -> SolverConfigBuilder {
        SolverConfigBuilder::default()
    }

    /// Run range validation and the semantic rules.
    ///
    /// # Errors
    ///
    /// Returns [`EvoError::Validation`] for out-of-range fields and
    /// [`EvoError::Config`] for inconsistent combinations.
    pub fn check(&self) -> EvoResult<()> {
        self.validate()?;
        self.validate_semantic()
    }

    fn validate_semantic(&self) -> EvoResult<()> {
        if let MigrationSchedule::Every { interval: 0 } = self.islands.migration {
            return Err(EvoError::config("Migration interval must be at least 1"));
        }

        let t0 = self.baseline.initial_temperature;
        if !t0.is_finite() || t0 <= 0.0 {
            return Err(EvoError::config(format!(
                "Initial temperature must be positive, got {t0}"
            )));
        }

        Ok(())
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            population_size: default_population_size(),
            generations: default_generations(),
            genetic: GeneticConfig::default(),
            islands: IslandsConfig::default(),
            baseline: BaselineConfig::default(),
        }
    }
}

/// Configuration builder for programmatic construction.
#[derive(Debug, Default)]
pub struct SolverConfigBuilder {
    seed: Option<u64>,
    population_size: Option<usize>,
    generations: Option<usize>,
    genetic: Option<GeneticConfig>,
    island_count: Option<usize>,
    migration_rate: Option<f64>,
    migration: Option<MigrationSchedule>,
    iterations: Option<usize>,
}

impl SolverConfigBuilder {
    /// Set the master seed.
    #[must_use]
    pub const fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the population size.
    #[must_use]
    pub const fn population_size(mut self, size: usize) -> Self {
        self.population_size = Some(size);
        self
    }

    /// Set the generation budget.
    #[must_use]
    pub const fn generations(mut self, generations: usize) -> Self {
        self.generations = Some(generations);
        self
    }

    /// Replace the operator probabilities.
    #[must_use]
    pub const fn genetic(mut self, genetic: GeneticConfig) -> Self {
        self.genetic = Some(genetic);
        self
    }

    /// Set the number of islands.
    #[must_use]
    pub const fn island_count(mut self, count: usize) -> Self {
        self.island_count = Some(count);
        self
    }

    /// Set the fraction of a population sent per migration.
    #[must_use]
    pub const fn migration_rate(mut self, rate: f64) -> Self {
        self.migration_rate = Some(rate);
        self
    }

    /// Set when migration happens.
    #[must_use]
    pub const fn migration(mut self, schedule: MigrationSchedule) -> Self {
        self.migration = Some(schedule);
        self
    }

    /// Set the baseline iteration budget.
    #[must_use]
    pub const fn iterations(mut self, iterations: usize) -> Self {
        self.iterations = Some(iterations);
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> SolverConfig {
        let mut config = SolverConfig::default();

        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(size) = self.population_size {
            config.population_size = size;
        }
        if let Some(generations) = self.generations {
            config.generations = generations;
        }
        if let Some(genetic) = self.genetic {
            config.genetic = genetic;
        }
        if let Some(count) = self.island_count {
            config.islands.count = count;
        }
        if let Some(rate) = self.migration_rate {
            config.islands.migration_rate = rate;
        }
        if let Some(schedule) = self.migration {
            config.islands.migration = schedule;
        }
        if let Some(iterations) = self.iterations {
            config.baseline.iterations = iterations;
        }

        config
    }
}

/// Probabilities and fractions used by one generation step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct GeneticConfig {
    /// Chance a proposed pair is recombined instead of copied.
    #[validate(range(min = 0.0, max = 1.0))]
    #[serde(default = "default_crossover_probability")]
    pub crossover_probability: f64,

    /// Chance each genome is mutated after deduplication.
    #[validate(range(min = 0.0, max = 1.0))]
    #[serde(default = "default_mutation_probability")]
    pub mutation_probability: f64,

    /// Share of the population copied unchanged (at least one genome).
    #[validate(range(min = 0.0, max = 1.0))]
    #[serde(default = "default_elite_fraction")]
    pub elite_fraction: f64,

    /// Steepness of the selection curve.
    #[validate(range(min = 0.0, max = 100.0))]
    #[serde(default = "default_selection_beta")]
    pub selection_beta: f64,

    /// Score populations on the rayon pool.
    #[serde(default = "default_true")]
    pub parallel_fitness: bool,
}

const fn default_crossover_probability() -> f64 {
    1.0
}

const fn default_mutation_probability() -> f64 {
    0.2
}

const fn default_elite_fraction() -> f64 {
    0.05
}

const fn default_selection_beta() -> f64 {
    3.0
}

const fn default_true() -> bool {
    true
}

impl Default for GeneticConfig {
    fn default() -> Self {
        Self {
            crossover_probability: default_crossover_probability(),
            mutation_probability: default_mutation_probability(),
            elite_fraction: default_elite_fraction(),
            selection_beta: default_selection_beta(),
            parallel_fitness: default_true(),
        }
    }
}

/// Island grid settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct IslandsConfig {
    /// Number of islands.
    #[validate(range(min = 1, max = 1024))]
    #[serde(default = "default_island_count")]
    pub count: usize,

    /// Fraction of the source population sent per migration.
    #[validate(range(min = 0.0, max = 1.0))]
    #[serde(default = "default_migration_rate")]
    pub migration_rate: f64,

    /// When migration happens.
    #[serde(default)]
    pub migration: MigrationSchedule,
}

const fn default_island_count() -> usize {
    4
}

const fn default_migration_rate() -> f64 {
    0.1
}

impl Default for IslandsConfig {
    fn default() -> Self {
        Self {
            count: default_island_count(),
            migration_rate: default_migration_rate(),
            migration: MigrationSchedule::default(),
        }
    }
}

/// Generations on which islands migrate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum MigrationSchedule {
    /// Every generation.
    #[default]
    Always,
    /// Generations divisible by `interval`.
    Every {
        /// Generations between migrations.
        interval: usize,
    },
    /// Islands stay isolated.
    Never,
}

impl MigrationSchedule {
    /// Whether islands migrate on the 0-based `generation`.
    #[must_use]
    pub const fn should_migrate(self, generation: usize) -> bool {
        match self {
            Self::Always => true,
            Self::Every { interval } => interval != 0 && generation % interval == 0,
            Self::Never => false,
        }
    }
}

/// Baseline heuristic settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct BaselineConfig {
    /// Iteration budget for climbing and annealing.
    #[validate(range(min = 1))]
    #[serde(default = "default_iterations")]
    pub iterations: usize,

    /// Annealing temperature at iteration 0.
    #[serde(default = "default_initial_temperature")]
    pub initial_temperature: f64,

    /// Geometric cooling factor per iteration.
    #[validate(range(min = 0.0, max = 1.0))]
    #[serde(default = "default_cooling_rate")]
    pub cooling_rate: f64,
}

const fn default_iterations() -> usize {
    1000
}

const fn default_initial_temperature() -> f64 {
    10.0
}

const fn default_cooling_rate() -> f64 {
    0.995
}

impl Default for BaselineConfig {
    fn default() -> Self {
        Self {
            iterations: default_iterations(),
            initial_temperature: default_initial_temperature(),
            cooling_rate: default_cooling_rate(),
        }
    }
}
