//! # longpath
//!
//! Approximate longest simple paths with genetic islands.
//!
//! Graphs are plain adjacency lists, possibly asymmetric. The crate offers:
//! - A generational genetic algorithm over simple paths
//! - An island model running several populations with migration
//! - Baselines: hill climbing, simulated annealing, exhaustive enumeration
//! - A mixed-radix codec that orders every candidate path
//!
//! ## Example
//!
//! ```rust
//! use longpath::prelude::*;
//!
//! let graph = Graph::undirected(&[(0, 1), (1, 2), (2, 3), (3, 0), (0, 2)]).unwrap();
//! let config = SolverConfig::builder().seed(42).population_size(20).generations(5).build();
//!
//! let iterators = (0..4)
//!     .map(|_| GeneticIterator::new(config.genetic).with_sink(silent_sink()))
//!     .collect();
//! let mut model = IslandsModel::new(&graph, iterators, IslandSettings::from(&config), EvoRng::new(config.seed))
//!     .unwrap();
//! let outcome = model.solve().unwrap();
//! assert!(graph.is_valid(&outcome.best));
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::too_many_lines,
    clippy::missing_const_for_fn,  // Many functions can't be const in stable Rust
    clippy::needless_range_loop,   // Sometimes range loops are clearer
)]

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod genetic;
pub mod graph;
pub mod heuristics;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{MigrationSchedule, SolverConfig, SolverConfigBuilder};
    pub use crate::engine::rng::EvoRng;
    pub use crate::error::{EvoError, EvoResult};
    pub use crate::genetic::{
        fitness, log_sink, silent_sink, GeneticIterator, GeneticProgram, IslandSettings,
        IslandsModel,
    };
    pub use crate::graph::{Graph, GraphPath, PathCodec, Vertex, VertexId};
    pub use crate::heuristics::{GraphHeuristic, HeuristicRun};
}

/// Re-export for public API
pub use error::{EvoError, EvoResult};
