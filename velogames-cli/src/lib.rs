//! Command-line interface for the Velogames roster optimizer.
//!
//! `velogames solve` reads a rider pool and a game file, picks the optimal
//! roster with the branch-and-bound optimizer and prints it as a text
//! announcement or a JSON report.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod fs;
mod game;
mod report;
mod riders;
mod solve;

pub use error::CliError;
pub use riders::RiderFileError;

use solve::{SolveArgs, run_solve};

const ARG_RIDERS: &str = "riders";
const ARG_GAME_CONFIG: &str = "game-config";
const ARG_FORMAT: &str = "format";
const ARG_TIME_LIMIT_MS: &str = "time-limit-ms";
const ARG_NODE_LIMIT: &str = "node-limit";

/// Run the Velogames CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when arguments, configuration or input files are
/// invalid, when no roster can be picked, or when the report cannot be
/// written.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse()?;
    match cli.command {
        Command::Solve(args) => run_solve(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "velogames",
    about = "Pick optimal Velogames fantasy cycling rosters",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Pick the highest scoring roster for a game.
    Solve(SolveArgs),
}

#[cfg(test)]
mod tests;
