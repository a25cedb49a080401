//! Deterministic inference: locked candidates and naked singles.
//!
//! The propagator drives the candidate boards to a fixed point. A
//! locked-candidates sweep visits every (digit, band) pair whose band word
//! changed since its last visit; naked-single extraction then scans all
//! digits at once with three board-shaped accumulators. Any placement
//! re-enables more sweeping, so the two alternate until neither finds
//! anything.

use triband_core::{BandSet, CellSet, Digit, tables};

use crate::{SolveStats, state::State};

/// Outcome of driving the deterministic rules to a fixed point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Status {
    /// A contradiction was found; the state is dead.
    Unsolvable,
    /// Every cell has a known value.
    Solved,
    /// No contradiction, but deterministic inference has stalled.
    Unresolved,
}

/// Runs locked candidates and naked singles until nothing changes.
pub(crate) fn run(state: &mut State, stats: &mut SolveStats) -> Status {
    loop {
        if !apply_locked_candidates(state) {
            return Status::Unsolvable;
        }
        if state.is_solved() {
            return Status::Solved;
        }
        match find_naked_singles(state) {
            None => return Status::Unsolvable,
            Some(0) => return Status::Unresolved,
            Some(placed) => stats.naked_singles += u64::from(placed),
        }
    }
}

/// Sweeps all nine digits and three bands until a full pass changes no band
/// word. Returns `false` on contradiction.
fn apply_locked_candidates(state: &mut State) -> bool {
    loop {
        let mut changed = false;
        for digit in Digit::ALL {
            if state.solved_rows.digit_rows(digit) == 0x1FF {
                // All nine rows placed: a finished digit has nothing left
                // to say about its peers.
                continue;
            }
            for band in 0..3 {
                let word = state.candidates[digit.index()].band(band);
                if word == state.prev_candidates[digit.index()].band(band) {
                    continue;
                }
                changed = true;
                let Some(rows) = update_band(state, digit, band, word) else {
                    return false;
                };
                state.solved_rows.merge_band(digit, band, rows);
            }
        }
        if !changed {
            return true;
        }
    }
}

/// Applies locked-candidates inference to one (digit, band) pair.
///
/// Restricts the band word to the cells its triad pattern allows, clears the
/// pinned columns from the digit's two peer bands, and detects rows whose
/// placement has become fully determined. Newly solved rows are applied on
/// the spot: their cells enter the solved mask and leave every other digit's
/// board.
///
/// Returns the 3-bit mask of newly solved rows, or `None` on contradiction.
fn update_band(state: &mut State, digit: Digit, band: usize, word: BandSet) -> Option<u32> {
    let triads = (tables::ROW_TRIADS_MASK[word.row(0) as usize]
        | tables::ROW_TRIADS_MASK[word.row(1) as usize] << 3
        | tables::ROW_TRIADS_MASK[word.row(2) as usize] << 6) as usize;
    let new_word = word & BandSet::from_bits(tables::KEEP_LOCKED_CANDIDATES[triads]);
    if new_word.is_empty() {
        return None;
    }
    let slot = digit.index();
    state.candidates[slot].set_band(band, new_word);
    state.prev_candidates[slot].set_band(band, new_word);

    let cols = new_word.peer_columns() as usize;
    let keep_neighbours = BandSet::from_bits(tables::NONCONFLICTING_NEIGHBOUR_BANDS[cols]);
    for other in 0..3 {
        if other != band {
            let trimmed = state.candidates[slot].band(other) & keep_neighbours;
            state.candidates[slot].set_band(other, trimmed);
        }
    }

    let intersection =
        (tables::ROW_TRIADS_SINGLE[triads] & tables::COMB_COLUMN_SINGLE[cols]) as usize;
    let rows = tables::ROW_HIDDEN_SINGLE[intersection];
    let placed = new_word & BandSet::from_bits(tables::SOLVED_ROWS_BIT_MASK[rows as usize]);
    if !placed.is_empty() {
        // Each row in `rows` has a single cell left for this digit.
        state
            .solved_cells
            .set_band(band, state.solved_cells.band(band) | placed);
        for other in 0..9 {
            if other != slot {
                let trimmed = state.candidates[other].band(band) & !placed;
                state.candidates[other].set_band(band, trimmed);
            }
        }
    }
    Some(rows)
}

/// Places every naked single on the board.
///
/// Builds three accumulators: cells covered by at least one, two, and three
/// digits. Cells covered exactly once and not yet solved are naked singles.
/// When there are none, the exactly-twice cells are cached as the bivalue
/// mask for the guess strategy.
///
/// Returns the number of placements, or `None` when some cell has no
/// candidate left.
fn find_naked_singles(state: &mut State) -> Option<u32> {
    let mut once = CellSet::EMPTY;
    let mut twice = CellSet::EMPTY;
    let mut thrice = CellSet::EMPTY;
    for board in &state.candidates {
        thrice |= twice & *board;
        twice |= once & *board;
        once |= *board;
    }
    if once != CellSet::FULL {
        return None;
    }
    let singles = once.difference(twice).difference(state.solved_cells);
    if singles.is_empty() {
        state.pairs = twice.difference(thrice);
        return Some(0);
    }
    let mut placed = 0;
    for cell in singles {
        // An earlier placement in this batch may have stolen the cell's
        // last candidate.
        let digit = Digit::ALL
            .into_iter()
            .find(|digit| state.candidates[digit.index()].contains(cell))?;
        state.place_in_band(cell, digit);
        placed += 1;
    }
    Some(placed)
}
