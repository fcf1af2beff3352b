//! CLI command handlers.
//!
//! Each handler loads its inputs, runs the library, prints a report and maps
//! the outcome to an exit code. The search itself lives in [`execute`],
//! which returns a [`SolveReport`] and does no I/O.

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use super::output::{print_check_report, print_help, print_solve_report, print_version};
use super::{Args, Command, SolveOptions, Strategy};
use crate::config::SolverConfig;
use crate::engine::rng::EvoRng;
use crate::error::{EvoError, EvoResult};
use crate::genetic::{GeneticIterator, GeneticProgram, IslandSettings, IslandsModel};
use crate::graph::io::{load_graph, load_path};
use crate::graph::{Graph, GraphPath};
use crate::heuristics::{
    format_goal_log, AnnealingSchedule, BruteForce, DeterministicClimbing, GraphHeuristic,
    HeuristicLog, RandomRestartClimbing, SimulatedAnnealing,
};

/// What a solving command found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveReport {
    /// Strategy that ran.
    pub strategy: Strategy,
    /// Seed the run used.
    pub seed: u64,
    /// Best path found.
    pub best: GraphPath,
    /// Generations (genetic) or iterations (baselines) run.
    pub rounds: usize,
    /// Per-iteration trace; only baselines record one.
    pub log: Option<Vec<HeuristicLog>>,
}

/// Main CLI entry point.
///
/// Dispatches to the appropriate command handler based on parsed arguments.
#[must_use]
pub fn run_cli(args: Args) -> ExitCode {
    match args.command {
        Command::Solve { strategy, options } => solve(strategy, &options),
        Command::Check {
            graph_path,
            path_path,
            seed,
        } => check(&graph_path, path_path.as_deref(), seed),
        Command::Help => {
            print_help();
            ExitCode::SUCCESS
        }
        Command::Version => {
            print_version();
            ExitCode::SUCCESS
        }
    }
}

/// Resolve the configuration for a solving command.
///
/// Starts from the YAML file when given, otherwise the defaults, then
/// applies command-line overrides and re-checks the result.
///
/// # Errors
///
/// Returns an error if the file cannot be loaded or the final
/// configuration is invalid.
pub fn resolve_config(options: &SolveOptions) -> EvoResult<SolverConfig> {
    let mut config = match &options.config_path {
        Some(path) => SolverConfig::load(path)?,
        None => SolverConfig::default(),
    };

    if let Some(seed) = options.seed_override {
        config.seed = seed;
    }
    if let Some(size) = options.population {
        config.population_size = size;
    }
    if let Some(generations) = options.generations {
        config.generations = generations;
    }
    if let Some(count) = options.islands {
        config.islands.count = count;
    }
    if let Some(iterations) = options.iterations {
        config.baseline.iterations = iterations;
    }

    config.check()?;
    Ok(config)
}

/// Run `strategy` on `graph` with `config`.
///
/// # Errors
///
/// Propagates solver errors, e.g. an extinct population.
pub fn execute(strategy: Strategy, config: &SolverConfig, graph: &Graph) -> EvoResult<SolveReport> {
    let mut rng = EvoRng::new(config.seed);

    let (best, rounds, log) = match strategy {
        Strategy::Genetic => {
            let program = GeneticProgram::new(
                config.population_size,
                config.generations,
                GeneticIterator::new(config.genetic),
            );
            let outcome = program.solve(graph, &mut rng)?;
            log::info!("Genetic search stopped: {:?}", outcome.termination);
            (outcome.best, outcome.generations, None)
        }
        Strategy::Islands => {
            let iterators = (0..config.islands.count)
                .map(|island| {
                    GeneticIterator::new(config.genetic).with_sink(Arc::new(move |line: &str| {
                        log::info!("[ISLAND {island}] {line}");
                    }))
                })
                .collect();
            let outcome = IslandsModel::new(graph, iterators, IslandSettings::from(config), rng)?
                .with_schedule(config.islands.migration)
                .solve()?;
            log::info!("Islands performed {} migrations", outcome.migrations);
            (outcome.best, outcome.generations, None)
        }
        Strategy::RandomClimb => run_baseline(
            &RandomRestartClimbing {
                iterations: config.baseline.iterations,
            },
            graph,
            &mut rng,
        )?,
        Strategy::DeterministicClimb => run_baseline(
            &DeterministicClimbing {
                iterations: config.baseline.iterations,
            },
            graph,
            &mut rng,
        )?,
        Strategy::Anneal => run_baseline(
            &SimulatedAnnealing {
                iterations: config.baseline.iterations,
                schedule: AnnealingSchedule::from(&config.baseline),
            },
            graph,
            &mut rng,
        )?,
        Strategy::Brute => run_baseline(&BruteForce, graph, &mut rng)?,
    };

    Ok(SolveReport {
        strategy,
        seed: config.seed,
        best,
        rounds,
        log,
    })
}

fn run_baseline(
    heuristic: &dyn GraphHeuristic,
    graph: &Graph,
    rng: &mut EvoRng,
) -> EvoResult<(GraphPath, usize, Option<Vec<HeuristicLog>>)> {
    log::info!("Running baseline {}", heuristic.name());
    let run = heuristic.solve(graph, rng)?;
    Ok((run.best, run.log.len(), Some(run.log)))
}

/// Report `error` and map it to an exit code: 2 for bad input, 1 otherwise.
fn failure(error: &EvoError) -> ExitCode {
    eprintln!("Error: {error}");
    ExitCode::from(if error.is_input_error() { 2 } else { 1 })
}

/// Load a graph, logging dangling neighbour ids.
fn load_checked_graph(path: &Path) -> EvoResult<Graph> {
    let graph = load_graph(path)?;
    for (from, to) in graph.dangling_neighbours() {
        log::warn!("Vertex {from} lists unknown neighbour {to}; edge ignored");
    }
    Ok(graph)
}

/// Solve a graph file with the chosen strategy.
#[must_use]
pub fn solve(strategy: Strategy, options: &SolveOptions) -> ExitCode {
    let config = match resolve_config(options) {
        Ok(config) => config,
        Err(e) => return failure(&e),
    };

    let graph = match load_checked_graph(&options.graph_path) {
        Ok(graph) => graph,
        Err(e) => return failure(&e),
    };

    let report = match execute(strategy, &config, &graph) {
        Ok(report) => report,
        Err(e) => return failure(&e),
    };

    print_solve_report(&report, &graph);

    if let Some(path) = &options.output_path {
        if let Err(e) = std::fs::write(path, format!("{}\n", report.best)) {
            eprintln!("Error writing {}: {e}", path.display());
            return ExitCode::from(1);
        }
    }

    if let Some(path) = &options.log_path {
        match &report.log {
            Some(log) => {
                if let Err(e) = std::fs::write(path, format_goal_log(log)) {
                    eprintln!("Error writing {}: {e}", path.display());
                    return ExitCode::from(1);
                }
            }
            None => log::warn!("'{}' records no goal log", strategy.name()),
        }
    }

    ExitCode::SUCCESS
}

/// Describe a graph and optionally validate a path against it.
#[must_use]
pub fn check(graph_path: &Path, path_path: Option<&Path>, seed: u64) -> ExitCode {
    let graph = match load_checked_graph(graph_path) {
        Ok(graph) => graph,
        Err(e) => return failure(&e),
    };

    let path = match path_path.map(load_path).transpose() {
        Ok(path) => path,
        Err(e) => return failure(&e),
    };

    let sample = graph.random_path(&mut EvoRng::new(seed));
    print_check_report(&graph, path.as_ref(), &sample);

    match path {
        Some(path) if !graph.is_valid(&path) => ExitCode::from(1),
        _ => ExitCode::SUCCESS,
    }
}
