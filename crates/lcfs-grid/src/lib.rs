//! # lcfs-grid — Editable Summary Grid
//!
//! A headless, single-threaded model of the compliance summary editor. The
//! host UI forwards focus, keystroke, and blur events; the grid owns the
//! local editable copy of the rows and decides what to render.
//!
//! ## Edit Lifecycle
//!
//! ```text
//! Idle ──focus──▶ Focused(original) ──change──▶ Editing(original) ──blur──▶ Idle
//!                      │                                              │
//!                      └──────────────blur (no commit)────────────────┘
//! ```
//!
//! Every keystroke is sanitized, clamped to the cell's bounds, and applies
//! the mutual-exclusion side effect in a single snapshot replacement. A blur
//! coerces the value to a whole number and notifies the [`CommitSink`] only
//! when it differs from the value captured at focus.
//!
//! ## Persistence Boundary
//!
//! The grid never talks to a backend. The [`CommitSink`] owns persistence,
//! error recovery, and re-sync: the grid keeps its optimistic local value
//! and neither retries nor rolls back. A fresh snapshot passed to
//! [`SummaryTable::set_rows`] replaces any local state.

pub mod edit;
pub mod error;
pub mod lock;
pub mod render;
pub mod sanitize;
pub mod table;

pub use edit::{BlurOutcome, EditState};
pub use error::GridError;
pub use lock::{LockWhen, LockedLines, NoLock, RowLock, DEFAULT_LOCK_REASON};
pub use render::{RenderedCell, RenderedRow};
pub use sanitize::{
    apply_constraint, coerce_commit_value, parse_input, sanitize_input, MAX_WHOLE_VALUE,
};
pub use table::{CellCommit, CommitSink, SummaryTable, TableOptions};
