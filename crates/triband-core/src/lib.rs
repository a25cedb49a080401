//! Core data model for the Triband Sudoku solver.
//!
//! This crate provides the bit-level representation the solver engine is
//! built on. The 9x9 board is split into three horizontal **bands** of 27
//! cells; each band fits one `u32` with bits 0-26 laid out row-major. For
//! every digit the solver keeps one such word per band, recording where the
//! digit may still be placed.
//!
//! # Core Types
//!
//! - [`Digit`] - Type-safe sudoku digit 1-9 with board index 0-8
//! - [`Cell`] - Board position 0-80 with table-driven geometry lookups
//! - [`BandSet`] - 27-bit set of cells within one band
//! - [`CellSet`] - Board-shaped 81-cell bitset stored as band lanes
//!
//! # Lookup Tables
//!
//! The [`tables`] module holds the compile-time tables that drive
//! locked-candidates inference: triad occupancy, one-pass elimination masks,
//! neighbour-band column clearing, hidden-single row detection, and the
//! per-cell placement masks. All of them are generated from Sudoku geometry
//! by `const fn` builders and validated in tests against independent
//! recomputation.
//!
//! # Examples
//!
//! ```
//! use triband_core::{BandSet, Cell, CellSet, Digit};
//!
//! let cell = Cell::from_row_col(4, 4);
//! let mut board = CellSet::EMPTY;
//! board.insert(cell);
//!
//! // The cell lives in the middle band, middle row.
//! assert_eq!(cell.band(), 1);
//! assert_eq!(board.band(1), BandSet::from_bits(1 << 13));
//!
//! let digit = Digit::from_ascii(b'5').unwrap();
//! assert_eq!(digit.index(), 4);
//! ```

pub use self::{band::*, board::*, cell::*, digit::*};

mod band;
mod board;
mod cell;
mod digit;
pub mod tables;
