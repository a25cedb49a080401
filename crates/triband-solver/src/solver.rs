//! The top-level solve loop: ingest, propagate, branch, extract.

use triband_core::{BandSet, Cell, Digit};

use crate::{
    SolveError,
    guess::{self, Branch},
    propagate::{self, Status},
    state::State,
};

/// Minimum number of givens a well-formed puzzle carries.
///
/// No 9x9 Sudoku with fewer than 17 clues has a unique solution, so inputs
/// below this bound are rejected as ill-formed rather than enumerated.
pub const MIN_GIVENS: u32 = 17;

/// Advisory counters describing one solve call.
///
/// The counters are reset for every call and are informational only; they
/// carry no correctness guarantees.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SolveStats {
    /// State clones made at branch points.
    pub guesses: u64,
    /// Cells placed by naked-single extraction.
    pub naked_singles: u64,
    /// Branches abandoned after a contradiction.
    pub dead_ends: u64,
}

/// A Sudoku solver configured with a solution limit.
///
/// # Examples
///
/// ```
/// use triband_solver::Solver;
///
/// let puzzle: &[u8; 81] =
///     b"53..7....6..195....98....6.8...6...34..8.3..17...2...6.6....28....419..5....8..79";
/// let mut out = [b'.'; 81];
///
/// let count = Solver::new(1).solve(puzzle, &mut out)?;
/// assert_eq!(count, 1);
/// assert_eq!(
///     &out,
///     b"534678912672195348198342567859761423426853791713924856961537284287419635345286179",
/// );
/// # Ok::<(), triband_solver::SolveError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Solver {
    limit: u32,
}

impl Solver {
    /// Creates a solver that stops after finding `limit` solutions.
    #[must_use]
    pub const fn new(limit: u32) -> Self {
        Self { limit }
    }

    /// Solves a puzzle, writing the first solution found into `out`.
    ///
    /// Returns the number of distinct solutions found, capped at the
    /// configured limit. When no solution exists, `out` is left filled with
    /// `'.'`.
    ///
    /// # Errors
    ///
    /// Returns a [`SolveError`] when the puzzle is ill-formed: fewer than
    /// [`MIN_GIVENS`] givens, a given conflicting with another given, or a
    /// byte that is neither a digit nor `'.'`.
    pub fn solve(&self, puzzle: &[u8; 81], out: &mut [u8; 81]) -> Result<u32, SolveError> {
        self.solve_with_stats(puzzle, out).map(|(count, _)| count)
    }

    /// Like [`solve`](Self::solve), also returning the solve counters.
    ///
    /// # Errors
    ///
    /// Same conditions as [`solve`](Self::solve).
    pub fn solve_with_stats(
        &self,
        puzzle: &[u8; 81],
        out: &mut [u8; 81],
    ) -> Result<(u32, SolveStats), SolveError> {
        out.fill(b'.');
        let mut state = ingest(puzzle)?;
        let mut engine = Engine {
            limit: self.limit,
            found: 0,
            out,
            stats: SolveStats::default(),
        };
        // A starved cell among the givens surfaces as an unsolvable first
        // propagation pass, which leaves the count at zero.
        if engine.search(&mut state) != Status::Unsolvable {
            engine.branch(&mut state);
        }
        Ok((engine.found, engine.stats))
    }
}

/// Solves a puzzle with the plain integer contract.
///
/// Returns the number of distinct solutions found, capped at `limit`, with
/// the first solution written to `out`. Returns `-1` when the puzzle is
/// ill-formed; use [`Solver::solve`] to learn why.
#[must_use]
pub fn solve(puzzle: &[u8; 81], out: &mut [u8; 81], limit: u32) -> i32 {
    match Solver::new(limit).solve(puzzle, out) {
        Ok(count) => i32::try_from(count).unwrap_or(i32::MAX),
        Err(_) => -1,
    }
}

/// Builds the initial state from the puzzle bytes.
fn ingest(puzzle: &[u8; 81]) -> Result<State, SolveError> {
    let mut state = State::new();
    let mut given = 0;
    for (index, &byte) in puzzle.iter().enumerate() {
        if byte == b'.' {
            continue;
        }
        #[expect(clippy::cast_possible_truncation)]
        let cell = Cell::new(index as u8);
        let Some(digit) = Digit::from_ascii(byte) else {
            return Err(SolveError::InvalidCharacter { cell, byte });
        };
        if !state.place(cell, digit) {
            return Err(SolveError::ConflictingGiven { cell });
        }
        given += 1;
    }
    if given < MIN_GIVENS {
        return Err(SolveError::TooFewGivens { given });
    }
    Ok(state)
}

/// One solve call's recursion context.
struct Engine<'a> {
    limit: u32,
    found: u32,
    out: &'a mut [u8; 81],
    stats: SolveStats,
}

impl Engine<'_> {
    /// Drives the state to a fixed point, honouring the solution limit:
    /// once enough solutions are found, every frame unwinds immediately.
    fn search(&mut self, state: &mut State) -> Status {
        if self.found >= self.limit {
            return Status::Unsolvable;
        }
        propagate::run(state, &mut self.stats)
    }

    /// Records a solved state or opens the next branch point.
    fn branch(&mut self, state: &mut State) {
        if state.is_solved() {
            self.record(state);
            return;
        }
        match guess::choose(state) {
            Branch::CellDigits { cell, digits } => self.branch_cell(state, cell, digits),
            Branch::DigitCells { digit, band, cells } => {
                self.branch_digit(state, digit, band, cells);
            }
        }
    }

    fn descend(&mut self, state: &mut State) {
        if self.search(state) == Status::Unsolvable {
            self.stats.dead_ends += 1;
        } else {
            self.branch(state);
        }
    }

    /// Branches over the remaining digits of one cell. Every branch but the
    /// last clones the state; the last reuses it.
    fn branch_cell(&mut self, state: &mut State, cell: Cell, digits: u16) {
        let mut remaining = digits;
        while remaining != 0 {
            let digit = Digit::from_index(remaining.trailing_zeros() as usize);
            remaining &= remaining - 1;
            if remaining == 0 {
                state.place_in_band(cell, digit);
                self.descend(state);
                return;
            }
            let mut next = *state;
            state.remove_candidate(cell, digit);
            self.stats.guesses += 1;
            next.place_in_band(cell, digit);
            self.descend(&mut next);
            if self.found >= self.limit {
                return;
            }
        }
    }

    /// Branches over the remaining cells of one digit within one band.
    fn branch_digit(&mut self, state: &mut State, digit: Digit, band: usize, cells: BandSet) {
        let mut remaining = cells;
        while let Some(bit) = remaining.pop_first_bit() {
            #[expect(clippy::cast_possible_truncation)]
            let cell = Cell::from_band_bit(band as u8, bit);
            if remaining.is_empty() {
                state.place_in_band(cell, digit);
                self.descend(state);
                return;
            }
            let mut next = *state;
            state.remove_candidate(cell, digit);
            self.stats.guesses += 1;
            next.place_in_band(cell, digit);
            self.descend(&mut next);
            if self.found >= self.limit {
                return;
            }
        }
    }

    /// Counts a solution; the first one is written to the output buffer.
    fn record(&mut self, state: &State) {
        if self.found == 0 {
            extract(state, self.out);
        }
        self.found += 1;
    }
}

/// Writes a solved state's digits into the 81-byte output buffer.
fn extract(state: &State, out: &mut [u8; 81]) {
    for digit in Digit::ALL {
        for band in 0..3u8 {
            let word = state.candidates[digit.index()].band(usize::from(band));
            for bit in word.iter_bits() {
                out[Cell::from_band_bit(band, bit).index()] = digit.to_ascii();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;

    fn puzzle_bytes(puzzle: &str) -> [u8; 81] {
        puzzle.as_bytes().try_into().unwrap()
    }

    fn solve_str(puzzle: &str, limit: u32) -> (Result<u32, SolveError>, [u8; 81]) {
        let mut out = [b'.'; 81];
        let result = Solver::new(limit).solve(&puzzle_bytes(puzzle), &mut out);
        (result, out)
    }

    #[test]
    fn test_easy_single_solution() {
        let (result, out) = solve_str(testing::EASY_PUZZLE, 1);
        assert_eq!(result, Ok(1));
        assert_eq!(&out, testing::EASY_SOLUTION.as_bytes());
    }

    #[test]
    fn test_hard_unique_puzzle() {
        let (result, out) = solve_str(testing::HARD_PUZZLE, 2);
        assert_eq!(result, Ok(1));
        assert_eq!(&out, testing::HARD_SOLUTION.as_bytes());
    }

    #[test]
    fn test_two_solution_puzzle_respects_limit() {
        let (result, out) = solve_str(testing::TWO_SOLUTION_PUZZLE, 2);
        assert_eq!(result, Ok(2));
        // The buffer holds whichever solution was found first; it must be a
        // completion of the puzzle.
        testing::assert_completes(testing::TWO_SOLUTION_PUZZLE, &out);

        let (result, _) = solve_str(testing::TWO_SOLUTION_PUZZLE, 1);
        assert_eq!(result, Ok(1));

        let (result, _) = solve_str(testing::TWO_SOLUTION_PUZZLE, 10);
        assert_eq!(result, Ok(2));
    }

    #[test]
    fn test_contradictory_givens_are_ill_formed() {
        // Two 1s in row 0.
        let puzzle = format!("11{}", ".".repeat(79));
        let (result, out) = solve_str(&puzzle, 1);
        assert!(matches!(result, Err(SolveError::ConflictingGiven { .. })));
        assert_eq!(out, [b'.'; 81]);
    }

    #[test]
    fn test_under_clued_puzzles_are_ill_formed() {
        let empty = ".".repeat(81);
        let (result, _) = solve_str(&empty, 1);
        assert_eq!(result, Err(SolveError::TooFewGivens { given: 0 }));

        // 16 givens is still below the bound.
        let (result, _) = solve_str(testing::SIXTEEN_GIVENS_PUZZLE, 1);
        assert_eq!(result, Err(SolveError::TooFewGivens { given: 16 }));
    }

    #[test]
    fn test_seventeen_givens_multi_solution_puzzle() {
        // This 17-clue grid is under-determined; enumeration hits whatever
        // limit it is given.
        let (result, _) = solve_str(testing::SEVENTEEN_GIVENS_PUZZLE, 2);
        assert_eq!(result, Ok(2));
        let (result, _) = solve_str(testing::SEVENTEEN_GIVENS_PUZZLE, 10);
        assert_eq!(result, Ok(10));
    }

    #[test]
    fn test_invalid_character_is_rejected() {
        let puzzle = format!("x{}", ".".repeat(80));
        let (result, _) = solve_str(&puzzle, 1);
        assert_eq!(
            result,
            Err(SolveError::InvalidCharacter {
                cell: Cell::new(0),
                byte: b'x',
            })
        );
    }

    #[test]
    fn test_fully_filled_valid_grid() {
        let mut out = [b'.'; 81];
        let (count, stats) = Solver::new(1)
            .solve_with_stats(&puzzle_bytes(testing::EASY_SOLUTION), &mut out)
            .unwrap();
        assert_eq!(count, 1);
        assert_eq!(&out, testing::EASY_SOLUTION.as_bytes());
        assert_eq!(stats.guesses, 0);
    }

    #[test]
    fn test_solvable_ingest_with_dead_cell_returns_zero() {
        // r2c1 has no candidate: 3-8 fill its row, 1 and 2 its box, and 9
        // its column, yet no two givens conflict directly. The remaining
        // givens only pad the count past the minimum.
        let puzzle = ".12......\
                      ...345678\
                      .........\
                      1...2...9\
                      .........\
                      .3...6.4.\
                      .........\
                      ..7...1..\
                      9........";
        let (result, out) = solve_str(puzzle, 1);
        assert_eq!(result, Ok(0));
        assert_eq!(out, [b'.'; 81]);
    }

    #[test]
    fn test_limit_zero_finds_nothing() {
        let (result, out) = solve_str(testing::EASY_PUZZLE, 0);
        assert_eq!(result, Ok(0));
        assert_eq!(out, [b'.'; 81]);
    }

    #[test]
    fn test_round_trip_reblanked_solution() {
        // Solve, then blank the original givens' positions out of the
        // solution; re-solving the complement must reproduce the grid.
        let (result, out) = solve_str(testing::EASY_PUZZLE, 1);
        assert_eq!(result, Ok(1));

        let mut complement = out;
        for (slot, byte) in complement.iter_mut().zip(testing::EASY_PUZZLE.bytes()) {
            if byte != b'.' {
                *slot = b'.';
            }
        }
        let mut resolved = [b'.'; 81];
        let count = Solver::new(2).solve(&complement, &mut resolved).unwrap();
        assert_eq!(count, 1);
        assert_eq!(resolved, out);
    }

    #[test]
    fn test_raw_entry_point() {
        let mut out = [b'.'; 81];
        assert_eq!(solve(&puzzle_bytes(testing::EASY_PUZZLE), &mut out, 1), 1);
        assert_eq!(&out, testing::EASY_SOLUTION.as_bytes());

        let contradictory = format!("11{}", ".".repeat(79));
        assert_eq!(solve(&puzzle_bytes(&contradictory), &mut out, 1), -1);
    }

    #[test]
    fn test_stats_report_guesses_on_hard_puzzle() {
        let mut out = [b'.'; 81];
        let (count, stats) = Solver::new(1)
            .solve_with_stats(&puzzle_bytes(testing::HARD_PUZZLE), &mut out)
            .unwrap();
        assert_eq!(count, 1);
        assert!(stats.guesses > 0);
        assert!(stats.naked_singles > 0);
    }

    #[test]
    fn test_agreement_with_reference_on_fixtures() {
        for puzzle in [
            testing::EASY_PUZZLE,
            testing::HARD_PUZZLE,
            testing::TWO_SOLUTION_PUZZLE,
            testing::SEVENTEEN_GIVENS_PUZZLE,
        ] {
            for limit in [1, 2, 10] {
                let (result, _) = solve_str(puzzle, limit);
                let expected = testing::reference_count(&puzzle_bytes(puzzle), limit);
                assert_eq!(result, Ok(expected), "{puzzle} at limit {limit}");
            }
        }
    }

    mod property_tests {
        use proptest::prelude::*;

        use super::*;

        /// Validity-preserving rearrangements of a known solution, masked
        /// down to a puzzle with 25 to 45 givens.
        fn arb_puzzle() -> impl Strategy<Value = [u8; 81]> {
            let digit_perm = Just((1u8..=9).collect::<Vec<_>>()).prop_shuffle();
            let row_perms =
                prop::array::uniform3(Just((0usize..3).collect::<Vec<_>>()).prop_shuffle());
            let band_perm = Just((0usize..3).collect::<Vec<_>>()).prop_shuffle();
            let givens = prop::sample::subsequence((0..81usize).collect::<Vec<_>>(), 25..=45);
            (digit_perm, row_perms, band_perm, givens).prop_map(
                |(digits, row_perms, bands, givens)| {
                    let mut puzzle = [b'.'; 81];
                    for index in givens {
                        let row = index / 9;
                        let (band, row_in_band) = (bands[row / 3], row_perms[row / 3][row % 3]);
                        let source = (band * 3 + row_in_band) * 9 + index % 9;
                        let value = testing::EASY_SOLUTION.as_bytes()[source] - b'1';
                        puzzle[index] = b'0' + digits[usize::from(value)];
                    }
                    puzzle
                },
            )
        }

        proptest! {
            #[test]
            fn prop_counts_match_reference(puzzle in arb_puzzle()) {
                for limit in [1u32, 2, 10] {
                    let mut out = [b'.'; 81];
                    let count = match Solver::new(limit).solve(&puzzle, &mut out) {
                        Ok(count) => count,
                        Err(SolveError::TooFewGivens { .. }) => continue,
                        Err(error) => return Err(TestCaseError::fail(error.to_string())),
                    };
                    prop_assert_eq!(count, testing::reference_count(&puzzle, limit));
                    if count > 0 {
                        testing::assert_completes(std::str::from_utf8(&puzzle).unwrap(), &out);
                    }
                }
            }

            #[test]
            fn prop_first_solution_is_stable_across_limits(puzzle in arb_puzzle()) {
                let mut first = [b'.'; 81];
                let mut capped = [b'.'; 81];
                let one = Solver::new(1).solve(&puzzle, &mut first);
                let many = Solver::new(10).solve(&puzzle, &mut capped);
                match (one, many) {
                    (Ok(a), Ok(b)) => {
                        prop_assert!(b >= a);
                        if a > 0 {
                            prop_assert_eq!(first, capped);
                        }
                    }
                    (Err(a), Err(b)) => prop_assert_eq!(a, b),
                    (a, b) => return Err(TestCaseError::fail(format!("{a:?} vs {b:?}"))),
                }
            }
        }
    }
}
