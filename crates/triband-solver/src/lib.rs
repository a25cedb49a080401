//! High-performance 9x9 Sudoku solving.
//!
//! # Overview
//!
//! The engine keeps, for each digit, the set of board positions where the
//! digit may still be placed, packed into three 27-bit band words (see
//! [`triband_core`]). Solving alternates two deterministic rules until they
//! reach a fixed point:
//!
//! 1. **Locked candidates**: a table-driven sweep per (digit, band) that
//!    eliminates cells excluded by triad reasoning, pins columns in the
//!    digit's other bands, and detects rows whose placement has become
//!    forced (hidden singles).
//! 2. **Naked singles**: a board-wide scan for cells with exactly one
//!    remaining candidate, computed for all nine digits at once with three
//!    layered accumulators.
//!
//! When inference stalls, the solver guesses: bivalue cells first, then
//! hidden bivalues in rows and boxes, then the cell with the fewest
//! candidates. Each branch clones the fixed-size state (a plain memcpy) and
//! backtracking simply drops the clone.
//!
//! # Entry Points
//!
//! - [`Solver`] - the structured API with [`SolveError`] diagnostics and
//!   optional [`SolveStats`] counters
//! - [`solve`] - the raw buffer-in/buffer-out call returning a plain count
//!
//! # Examples
//!
//! ```
//! use triband_solver::Solver;
//!
//! let puzzle: &[u8; 81] =
//!     b"..53.....8......2..7..1.5..4....53...1..7...6..32...8..6.5....9..4....3......97..";
//! let mut out = [b'.'; 81];
//!
//! // Ask for up to two solutions to check uniqueness.
//! let count = Solver::new(2).solve(puzzle, &mut out)?;
//! assert_eq!(count, 1);
//! # Ok::<(), triband_solver::SolveError>(())
//! ```
//!
//! # Error Handling
//!
//! Ill-formed puzzles (too few givens, conflicting givens, stray bytes) are
//! reported as [`SolveError`]s at ingest. An unsolvable but well-formed
//! puzzle is not an error: the solve returns zero solutions.

pub use self::{error::*, solver::*};

mod error;
mod guess;
mod propagate;
mod solver;
mod state;

#[cfg(test)]
mod testing;
