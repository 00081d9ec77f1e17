//! # Grid Errors
//!
//! Misuse of the grid API by the host. Malformed user input is never an
//! error; it degrades to `0` or to the nearest bound.

use thiserror::Error;

/// Errors returned when the host addresses a cell it may not edit.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// The row index is past the end of the current snapshot.
    #[error("row index {index} out of range for {len} rows")]
    RowOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of rows in the snapshot.
        len: usize,
    },

    /// No column with this id.
    #[error("unknown column: {0:?}")]
    UnknownColumn(String),

    /// The cell is read-only, outside `editable_cells`, or its row is locked.
    #[error("cell {row_index}:{column_id} is not editable: {reason}")]
    CellNotEditable {
        row_index: usize,
        column_id: String,
        reason: String,
    },
}
