//! longpath CLI - longest simple path search
//!
//! Command-line interface for running the solvers.

use std::process::ExitCode;

use longpath::cli::{run_cli, Args};

fn main() -> ExitCode {
    let args = Args::parse();

    let default_filter = if args.verbose() { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    run_cli(args)
}
