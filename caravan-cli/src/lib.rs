//! Command-line interface for the Caravan routing engine.
//!
//! `caravan solve <request.json>` loads a delivery request, validates it,
//! solves it with the selected strategy, and prints the result as JSON on
//! stdout. Log output goes to stderr.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod fs;
mod output;
mod solve;

pub use error::CliError;
use solve::{SolveArgs, run_solve};

const ARG_SOLVE_REQUEST: &str = "request-path";
const ARG_SOLVE_STRATEGY: &str = "strategy";
const ARG_SOLVE_DEADLINE_MS: &str = "deadline-ms";
const ARG_SOLVE_MAX_GENERATIONS: &str = "max-generations";
const ENV_SOLVE_REQUEST: &str = "CARAVAN_CMDS_SOLVE_REQUEST_PATH";

/// Run the Caravan CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns [`CliError`] when arguments, configuration, or the request are
/// invalid, or when solving or writing the output fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    init_logging(cli.verbose)?;
    match cli.command {
        Command::Solve(args) => run_solve(args),
    }
}

/// Install the stderr log sink. Records from the `log` facade used by the
/// solver crates are bridged into it.
fn init_logging(verbose: bool) -> Result<(), CliError> {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| CliError::Logging(err.to_string()))
}

#[derive(Debug, Parser)]
#[command(
    name = "caravan",
    about = "Exact and heuristic vehicle routing for small delivery fleets",
    version
)]
struct Cli {
    /// Emit debug logging on stderr.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Solve a JSON delivery request and print the plan.
    Solve(SolveArgs),
}

#[cfg(test)]
mod tests;
