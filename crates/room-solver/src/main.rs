//! CLI entry point for the room-sorting energy solver.
//!
//! Reads a line-oriented board description (terminated by the first blank
//! line) from a file or stdin and prints a single integer: the minimum
//! total energy, `-1` when the goal is unreachable, or `0` when the board
//! height has no known goal configuration.

mod board;
mod moves;
mod reachability;
mod search;

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use board::Board;
use search::{solve, Outcome};

#[derive(Parser)]
#[command(name = "room-solver")]
#[command(about = "Minimum-energy solver for room-sorting grid puzzles")]
#[command(version)]
struct Cli {
    /// Path to the board description (reads stdin when omitted)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Print a JSON result object with search statistics instead of the
    /// bare integer
    #[arg(long)]
    json: bool,
}

/// Machine-readable output for `--json`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SolveOutput {
    energy_code: i64,
    outcome: &'static str,
    states_expanded: usize,
    states_seen: usize,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let text = match &cli.file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read board from {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read board from stdin")?;
            buffer
        }
    };

    // The board description ends at the first blank line
    let lines: Vec<&str> = text.lines().take_while(|line| !line.is_empty()).collect();
    let start = Board::parse(&lines).context("malformed board description")?;

    let result = solve(&start);

    if cli.json {
        let output = SolveOutput {
            energy_code: result.outcome.as_energy_code(),
            outcome: match result.outcome {
                Outcome::Solved(_) => "solved",
                Outcome::Unreachable => "unreachable",
                Outcome::UnsupportedHeight => "unsupportedHeight",
            },
            states_expanded: result.states_expanded,
            states_seen: result.states_seen,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", result.outcome.as_energy_code());
    }

    Ok(())
}
