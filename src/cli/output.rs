//! CLI output formatting.
//!
//! Reports are built as strings first so tests can inspect them; the
//! `print_*` wrappers only write them to stdout.

use super::commands::SolveReport;
use crate::genetic::fitness;
use crate::graph::{Graph, GraphPath};

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Print version information.
pub fn print_version() {
    println!("longpath {}", env!("CARGO_PKG_VERSION"));
}

/// Print help message.
pub fn print_help() {
    println!(
        r"longpath - Longest simple path search with genetic islands

USAGE:
    longpath <COMMAND> <graph.txt> [OPTIONS]

COMMANDS:
    ga <graph.txt>              Single-population genetic search
    islands <graph.txt>         Genetic search on a toroidal island grid
    climb <graph.txt>           Random-restart hill climbing
        --deterministic         Climb through paths in codec order instead
    anneal <graph.txt>          Simulated annealing
    brute <graph.txt>           Exhaustive enumeration (tiny graphs only)

    check <graph.txt> [path.txt] Describe a graph and validate a path
        --seed <N>              Seed for the sample random path

    help                        Show this help message
    version                     Show version information

SOLVE OPTIONS:
    --config <file.yaml>        Solver configuration
    --seed <N>                  Override the master seed
    --population <N>            Genomes per population
    --generations <N>           Generation budget
    --islands <N>               Number of islands
    --iterations <N>            Baseline iteration budget
    --log <file.csv>            Write the Iteration;Goal trace (baselines)
    -o, --output <file.txt>     Write the best path
    -v, --verbose               Debug logging (or set RUST_LOG)

GRAPH FORMAT:
    One vertex per line: the vertex id followed by its neighbour ids.

EXAMPLES:
    longpath islands graph.txt --islands 9 --generations 200
    longpath anneal graph.txt --iterations 5000 --log anneal.csv
    longpath check graph.txt best.txt
"
    );
}

/// Render the result of a solving command.
#[must_use]
pub fn format_solve_report(report: &SolveReport, graph: &Graph) -> String {
    let valid = graph.is_valid(&report.best);
    let sym = if valid { "✓" } else { "✗" };

    format!(
        "{RULE}\nStrategy: {}\nSeed:     {}\nRounds:   {}\n{RULE}\n\n\
         Best path ({} of {} vertices):\n  {}\n\n{sym} Valid: {valid}\n",
        report.strategy.name(),
        report.seed,
        report.rounds,
        fitness(&report.best),
        graph.vertex_count(),
        report.best
    )
}

/// Print the result of a solving command.
pub fn print_solve_report(report: &SolveReport, graph: &Graph) {
    print!("{}", format_solve_report(report, graph));
}

/// Render a graph summary plus an optional path verdict.
#[must_use]
pub fn format_check_report(graph: &Graph, path: Option<&GraphPath>, sample: &GraphPath) -> String {
    let edges: usize = graph.vertices().iter().map(|v| v.neighbours.len()).sum();
    let mut out = format!(
        "{RULE}\nVertices:  {}\nEdges:     {edges}\nDangling:  {}\n{RULE}\n\n\
         Random path: {sample}\nRandom path goal: {}\n",
        graph.vertex_count(),
        graph.dangling_neighbours().len(),
        fitness(sample)
    );

    if let Some(path) = path {
        let valid = graph.is_valid(path);
        let sym = if valid { "✓" } else { "✗" };
        out.push_str(&format!(
            "\nLoaded path: {path}\nLoaded path goal: {}\n{sym} Valid: {valid}\n",
            fitness(path)
        ));
    }
    out
}

/// Print a graph summary plus an optional path verdict.
pub fn print_check_report(graph: &Graph, path: Option<&GraphPath>, sample: &GraphPath) {
    print!("{}", format_check_report(graph, path, sample));
}
