//! Error types for puzzle ingestion.

use triband_core::Cell;

/// Errors reported for ill-formed puzzles.
///
/// These cover defects detectable at ingest. A puzzle that ingests cleanly
/// but has no solution is not an error: solving it simply yields zero
/// solutions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SolveError {
    /// The puzzle has fewer givens than any uniquely solvable puzzle.
    ///
    /// No 9x9 Sudoku with fewer than 17 clues has a unique solution, so
    /// under-clued inputs are rejected outright rather than enumerated.
    #[display("too few givens: {given} (at least 17 required)")]
    TooFewGivens {
        /// Number of givens found in the puzzle.
        given: u32,
    },
    /// A given repeats a digit already placed in its row, column, or box.
    #[display("conflicting given at {cell}")]
    ConflictingGiven {
        /// The cell whose given contradicts an earlier one.
        cell: Cell,
    },
    /// The puzzle contains a byte other than `'1'`..=`'9'` or `'.'`.
    #[display("invalid character {byte:#04x} at {cell}")]
    InvalidCharacter {
        /// The cell at which the byte appears.
        cell: Cell,
        /// The offending byte.
        byte: u8,
    },
}
