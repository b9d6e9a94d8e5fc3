//! Grid error type.

use thiserror::Error;

use mrp_core::{PlanError, Position};

/// Errors produced by `mrp-grid`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("position {pos} is outside the {rows}x{cols} grid")]
    OutOfBounds { pos: Position, rows: u32, cols: u32 },

    #[error("grid must have at least one row and one column")]
    Empty,

    #[error("row {row} has {got} cells, expected {expected}")]
    Ragged { row: usize, expected: usize, got: usize },

    #[error("unknown cell glyph {glyph:?} at row {row}, col {col}")]
    UnknownGlyph { row: usize, col: usize, glyph: char },
}

pub type GridResult<T> = Result<T, GridError>;

impl From<GridError> for PlanError {
    fn from(e: GridError) -> Self {
        match e {
            GridError::OutOfBounds { pos, rows, cols } => PlanError::OutOfBounds { pos, rows, cols },
            other => PlanError::Config(other.to_string()),
        }
    }
}
