//! # Rendered Output
//!
//! What the host should draw for each cell. The grid computes these from
//! the current snapshot; the host only paints them.

use serde::Serialize;

use lcfs_schema::CellConstraint;

/// One rendered cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderedCell {
    /// Non-interactive text.
    Text {
        text: String,
        bold: bool,
        /// Drawn de-emphasised because the row is locked.
        muted: bool,
        /// Hover text explaining a lock.
        #[serde(skip_serializing_if = "Option::is_none")]
        tooltip: Option<String>,
    },
    /// A numeric input bound to the cell's raw string value.
    Input {
        value: String,
        /// A save for exactly this cell is in flight.
        saving: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        constraint: Option<CellConstraint>,
    },
}

impl RenderedCell {
    /// The displayed text or input value.
    pub fn display(&self) -> &str {
        match self {
            Self::Text { text, .. } => text,
            Self::Input { value, .. } => value,
        }
    }

    /// Whether this cell is an input.
    pub fn is_input(&self) -> bool {
        matches!(self, Self::Input { .. })
    }
}

/// One rendered row, in snapshot order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedRow {
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    pub locked: bool,
    pub cells: Vec<RenderedCell>,
}
