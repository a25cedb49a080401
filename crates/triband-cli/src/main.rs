//! Batch solving harness.
//!
//! Reads one 81-character puzzle per line from a file (or stdin), solves
//! each with a configurable solution limit, and reports solutions plus
//! aggregate timing. Lines that are empty or start with `#` are skipped.

use std::{
    fs,
    io::{self, Read as _},
    path::{Path, PathBuf},
    process::ExitCode,
    time::{Duration, Instant},
};

use clap::Parser;
use log::warn;
use triband_solver::Solver;

/// Batch Sudoku solver: one 81-character puzzle per line.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Puzzle file; stdin when omitted.
    input: Option<PathBuf>,

    /// Stop after this many solutions per puzzle.
    #[arg(long, default_value_t = 1)]
    limit: u32,

    /// Print only the summary, not per-puzzle results.
    #[arg(long)]
    quiet: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let input = match read_input(args.input.as_deref()) {
        Ok(input) => input,
        Err(error) => {
            eprintln!("error: {error}");
            return ExitCode::FAILURE;
        }
    };

    let solver = Solver::new(args.limit);
    let mut summary = Summary::default();

    for (number, line) in input.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Ok(puzzle) = <&[u8; 81]>::try_from(line.as_bytes()) else {
            warn!("line {}: expected 81 characters, got {}", number + 1, line.len());
            summary.rejected += 1;
            continue;
        };

        let mut out = [b'.'; 81];
        let started = Instant::now();
        let result = solver.solve_with_stats(puzzle, &mut out);
        summary.elapsed += started.elapsed();

        match result {
            Ok((count, stats)) => {
                summary.solved += u64::from(count > 0);
                summary.puzzles += 1;
                summary.guesses += stats.guesses;
                if !args.quiet {
                    if count > 0 {
                        let solution = str::from_utf8(&out).expect("solver emits ASCII");
                        println!("{line} -> {solution} ({count} solution(s))");
                    } else {
                        println!("{line} -> no solution");
                    }
                }
            }
            Err(error) => {
                summary.rejected += 1;
                if !args.quiet {
                    println!("{line} -> rejected: {error}");
                }
            }
        }
    }

    summary.print();
    ExitCode::SUCCESS
}

fn read_input(path: Option<&Path>) -> io::Result<String> {
    match path {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

#[derive(Debug, Default)]
struct Summary {
    puzzles: u64,
    solved: u64,
    rejected: u64,
    guesses: u64,
    elapsed: Duration,
}

impl Summary {
    fn print(&self) {
        let mean = if self.puzzles > 0 {
            self.elapsed / u32::try_from(self.puzzles).unwrap_or(u32::MAX)
        } else {
            Duration::ZERO
        };
        println!(
            "{} puzzles, {} solved, {} rejected, {} guesses, {:?} total ({:?}/puzzle)",
            self.puzzles, self.solved, self.rejected, self.guesses, self.elapsed, mean
        );
    }
}
