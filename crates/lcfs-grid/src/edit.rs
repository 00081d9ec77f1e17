//! # Cell Edit State Machine
//!
//! Tracks the one cell currently being edited and the value it held when
//! focus arrived.
//!
//! ```text
//! Idle ──focus──▶ Focused ──change──▶ Editing ──blur──▶ Idle (commit if changed)
//!                    └──────blur──────▶ Idle (no commit)
//! ```
//!
//! A blur addressed to any cell other than the tracked one is ignored.

use lcfs_core::CellPosition;

/// Edit state of a grid.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EditState {
    /// No cell is focused.
    #[default]
    Idle,
    /// A cell has focus but has not been changed.
    Focused {
        cell: CellPosition,
        original: f64,
    },
    /// A cell has been changed since it received focus.
    Editing {
        cell: CellPosition,
        original: f64,
    },
}

/// What a blur event should do.
#[derive(Debug, Clone, PartialEq)]
pub enum BlurOutcome {
    /// The blurred cell is not the tracked one; nothing changes.
    Ignored,
    /// The tracked cell lost focus without a change.
    Unchanged,
    /// The tracked cell was edited; compare against `original` and commit.
    Finalize { original: f64 },
}

impl EditState {
    /// The tracked cell, if any.
    pub fn cell(&self) -> Option<&CellPosition> {
        match self {
            Self::Idle => None,
            Self::Focused { cell, .. } | Self::Editing { cell, .. } => Some(cell),
        }
    }

    /// The focus-time value of the tracked cell.
    pub fn original(&self) -> Option<f64> {
        match self {
            Self::Idle => None,
            Self::Focused { original, .. } | Self::Editing { original, .. } => Some(*original),
        }
    }

    /// Whether `cell` has uncommitted changes.
    pub fn is_editing(&self, cell: &CellPosition) -> bool {
        matches!(self, Self::Editing { cell: c, .. } if c == cell)
    }

    /// Focus arrives on `cell`. Refocusing the tracked cell keeps its
    /// original value; focusing another cell starts over.
    pub fn focus(&mut self, cell: CellPosition, original: f64) {
        if self.cell() == Some(&cell) {
            return;
        }
        *self = Self::Focused { cell, original };
    }

    /// A change on `cell`. Without prior focus on that cell, the original
    /// value is captured now through `current`.
    pub fn change(&mut self, cell: CellPosition, current: impl FnOnce() -> f64) {
        let original = match self {
            Self::Focused { cell: c, original } | Self::Editing { cell: c, original }
                if *c == cell =>
            {
                *original
            }
            _ => current(),
        };
        *self = Self::Editing { cell, original };
    }

    /// A blur on `cell`. Returns to `Idle` unless the blur was stray.
    pub fn blur(&mut self, cell: &CellPosition) -> BlurOutcome {
        let outcome = match self {
            Self::Editing { cell: c, original } if c == cell => BlurOutcome::Finalize {
                original: *original,
            },
            Self::Focused { cell: c, .. } if c == cell => BlurOutcome::Unchanged,
            _ => return BlurOutcome::Ignored,
        };
        *self = Self::Idle;
        outcome
    }

    /// Drop any tracked cell.
    pub fn reset(&mut self) {
        *self = Self::Idle;
    }
}
