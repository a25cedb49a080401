//! Branch selection when deterministic inference stalls.
//!
//! Guessing is ordered to keep the fan-out small: a naked bivalue cell gives
//! a two-way branch and is found for free in the cached pairs mask; failing
//! that, a digit with exactly two spots left in some row or box is also a
//! two-way branch; only as a last resort does the solver open a cell with
//! three or more candidates, and then the one with the fewest.

use triband_core::{BandSet, Cell, Digit, tables};

use crate::state::State;

/// A branch point chosen for the search to explore.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Branch {
    /// Try each remaining digit (bitmask over digit indices) of one cell.
    CellDigits { cell: Cell, digits: u16 },
    /// Try each remaining cell of one digit within one band.
    DigitCells {
        digit: Digit,
        band: usize,
        cells: BandSet,
    },
}

/// Chooses the next branch point.
///
/// # Panics
///
/// Panics if the state is already solved or has a cell without candidates;
/// callers branch only on unresolved, consistent states.
pub(crate) fn choose(state: &State) -> Branch {
    if let Some(cell) = state.pairs.first() {
        return Branch::CellDigits {
            cell,
            digits: state.digit_mask_at(cell),
        };
    }
    hidden_bivalue(state, &tables::ROW_MASK)
        .or_else(|| hidden_bivalue(state, &tables::BOX_MASK))
        .unwrap_or_else(|| fewest_candidates(state))
}

/// Finds the first digit with exactly two spots left in one of the given
/// band sections (rows or boxes). Digits and bands whose rows are already
/// placed are skipped.
fn hidden_bivalue(state: &State, masks: &[u32; 3]) -> Option<Branch> {
    for digit in Digit::ALL {
        for band in 0..3 {
            if state.solved_rows.band_rows(digit, band) == 0b111 {
                continue;
            }
            let word = state.candidates[digit.index()].band(band);
            for &mask in masks {
                let cells = word & BandSet::from_bits(mask);
                if cells.len() == 2 {
                    return Some(Branch::DigitCells { digit, band, cells });
                }
            }
        }
    }
    None
}

/// Falls back to the unsolved cell with the fewest remaining candidates.
///
/// With no bivalue cell on the board every unsolved cell has at least three
/// candidates; a cell with exactly three cannot be beaten, so the scan stops
/// early on one.
fn fewest_candidates(state: &State) -> Branch {
    let mut best: Option<(u32, Cell, u16)> = None;
    for cell in !state.solved_cells {
        let digits = state.digit_mask_at(cell);
        let count = digits.count_ones();
        debug_assert!(count >= 3, "{cell} should have been a single or a pair");
        if count == 3 {
            return Branch::CellDigits { cell, digits };
        }
        if best.is_none_or(|(least, _, _)| count < least) {
            best = Some((count, cell, digits));
        }
    }
    let (_, cell, digits) = best.expect("unresolved state has an unsolved cell");
    Branch::CellDigits { cell, digits }
}
