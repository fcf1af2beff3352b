//! CLI argument parsing.
//!
//! Hand-rolled parser over any iterator of strings, so every branch can be
//! exercised from tests without touching the process environment.

use std::path::PathBuf;

/// CLI arguments container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    /// The command to execute.
    pub command: Command,
}

/// Search strategy selected by the subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Single-population genetic search (`ga`).
    Genetic,
    /// Island model (`islands`).
    Islands,
    /// Random-restart hill climbing (`climb`).
    RandomClimb,
    /// Codec-order hill climbing (`climb --deterministic`).
    DeterministicClimb,
    /// Simulated annealing (`anneal`).
    Anneal,
    /// Exhaustive enumeration (`brute`).
    Brute,
}

impl Strategy {
    /// Subcommand spelling.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Genetic => "ga",
            Self::Islands => "islands",
            Self::RandomClimb => "climb",
            Self::DeterministicClimb => "climb --deterministic",
            Self::Anneal => "anneal",
            Self::Brute => "brute",
        }
    }
}

/// Options shared by every solving subcommand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolveOptions {
    /// Graph adjacency-list file.
    pub graph_path: PathBuf,
    /// Optional YAML configuration.
    pub config_path: Option<PathBuf>,
    /// Seed override.
    pub seed_override: Option<u64>,
    /// Population size override.
    pub population: Option<usize>,
    /// Generation budget override.
    pub generations: Option<usize>,
    /// Island count override.
    pub islands: Option<usize>,
    /// Baseline iteration override.
    pub iterations: Option<usize>,
    /// Where to write the `Iteration;Goal` trace.
    pub log_path: Option<PathBuf>,
    /// Where to write the best path.
    pub output_path: Option<PathBuf>,
    /// Enable debug logging.
    pub verbose: bool,
}

/// Available CLI commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Search for a long path
    Solve {
        /// Which search to run.
        strategy: Strategy,
        /// Input files and overrides.
        options: SolveOptions,
    },
    /// Inspect a graph and optionally score a path
    Check {
        /// Graph adjacency-list file.
        graph_path: PathBuf,
        /// Optional path file to validate.
        path_path: Option<PathBuf>,
        /// Seed for the sample random path.
        seed: u64,
    },
    /// Show help
    Help,
    /// Show version
    Version,
}

impl Args {
    /// Parse command-line arguments from an iterator.
    ///
    /// This method is testable as it accepts any iterator of strings,
    /// not just `std::env::args()`.
    #[must_use]
    pub fn parse_from<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();
        Self::parse_from_vec(&args)
    }

    /// Parse command-line arguments from the environment.
    #[must_use]
    pub fn parse() -> Self {
        Self::parse_from(std::env::args())
    }

    /// Whether debug logging was requested.
    #[must_use]
    pub const fn verbose(&self) -> bool {
        matches!(
            self.command,
            Command::Solve {
                options: SolveOptions { verbose: true, .. },
                ..
            }
        )
    }

    fn parse_from_vec(args: &[String]) -> Self {
        if args.len() < 2 {
            return Self {
                command: Command::Help,
            };
        }

        let command = match args[1].as_str() {
            "ga" => Self::parse_solve_command(args, Strategy::Genetic),
            "islands" => Self::parse_solve_command(args, Strategy::Islands),
            "climb" => Self::parse_solve_command(args, Strategy::RandomClimb),
            "anneal" => Self::parse_solve_command(args, Strategy::Anneal),
            "brute" => Self::parse_solve_command(args, Strategy::Brute),
            "check" => Self::parse_check_command(args),
            "-h" | "--help" | "help" => Command::Help,
            "-V" | "--version" | "version" => Command::Version,
            unknown => {
                eprintln!("Unknown command: {unknown}");
                Command::Help
            }
        };

        Self { command }
    }

    /// Value following a flag, parsed; `None` if missing or malformed.
    fn flag_value<T: std::str::FromStr>(args: &[String], i: usize) -> Option<T> {
        args.get(i + 1).and_then(|v| v.parse().ok())
    }

    fn parse_solve_command(args: &[String], strategy: Strategy) -> Command {
        if args.len() < 3 {
            eprintln!("Error: '{}' command requires a graph file", args[1]);
            return Command::Help;
        }

        let mut strategy = strategy;
        let mut options = SolveOptions {
            graph_path: PathBuf::from(&args[2]),
            ..SolveOptions::default()
        };

        let mut i = 3;
        while i < args.len() {
            let consumed = match args[i].as_str() {
                "--config" => {
                    options.config_path = Self::flag_value(args, i);
                    2
                }
                "--seed" => {
                    options.seed_override = Self::flag_value(args, i);
                    2
                }
                "--population" => {
                    options.population = Self::flag_value(args, i);
                    2
                }
                "--generations" => {
                    options.generations = Self::flag_value(args, i);
                    2
                }
                "--islands" => {
                    options.islands = Self::flag_value(args, i);
                    2
                }
                "--iterations" => {
                    options.iterations = Self::flag_value(args, i);
                    2
                }
                "--log" => {
                    options.log_path = Self::flag_value(args, i);
                    2
                }
                "-o" | "--output" => {
                    options.output_path = Self::flag_value(args, i);
                    2
                }
                "--deterministic" if strategy == Strategy::RandomClimb => {
                    strategy = Strategy::DeterministicClimb;
                    1
                }
                "-v" | "--verbose" => {
                    options.verbose = true;
                    1
                }
                other => {
                    eprintln!("Ignoring unknown option: {other}");
                    1
                }
            };
            i += consumed;
        }

        Command::Solve { strategy, options }
    }

    fn parse_check_command(args: &[String]) -> Command {
        if args.len() < 3 {
            eprintln!("Error: 'check' command requires a graph file");
            return Command::Help;
        }

        let mut path_path = None;
        let mut seed = 42;

        let mut i = 3;
        while i < args.len() {
            match args[i].as_str() {
                "--seed" => {
                    if let Some(value) = Self::flag_value(args, i) {
                        seed = value;
                    }
                    i += 2;
                }
                other if path_path.is_none() && !other.starts_with('-') => {
                    path_path = Some(PathBuf::from(other));
                    i += 1;
                }
                _ => i += 1,
            }
        }

        Command::Check {
            graph_path: PathBuf::from(&args[2]),
            path_path,
            seed,
        }
    }
}
