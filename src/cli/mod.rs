//! CLI module for longpath.
//!
//! All CLI logic lives here rather than in main.rs so it can be tested. The
//! entry point `run_cli` is called from main.rs with parsed arguments.

mod args;
mod commands;
mod output;

pub use args::{Args, Command, SolveOptions, Strategy};
pub use commands::{check, execute, resolve_config, run_cli, solve, SolveReport};
pub use output::{
    format_check_report, format_solve_report, print_check_report, print_help,
    print_solve_report, print_version,
};
