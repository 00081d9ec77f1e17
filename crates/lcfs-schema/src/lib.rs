//! # lcfs-schema — Constraint Schema Builder
//!
//! Given a summary dataset and an explicit [`SchemaParams`], produces the
//! ordered list of [`ColumnDescriptor`]s that drives the editable grid:
//! which row indices accept input, and the `{min, max}` bounds of each
//! editable cell.
//!
//! ## Renewable Fuel Rules
//!
//! For every fuel column of [`LedgerLayout::renewable_fuel`]:
//!
//! - Lines 6 (retention) and 8 (deferral) are capped at
//!   `round(0.05 × line 4)`, floored at `0`.
//! - Line 7 (previously retained) is editable with `min = 0` and no `max`,
//!   unless a prior-year snapshot exists for that column; then it is removed
//!   from the editable cells and capped at the prior year's value.
//! - Line 9 (obligation added) is editable with `min = 0`.
//! - Lines 7 and 9 are mutually exclusive; the grid enforces this through
//!   [`LedgerLayout::exclusion_pairs`].
//!
//! ## Crate Policy
//!
//! - [`build_columns`] is pure and deterministic. Missing rows or values are
//!   treated as `0`; generation never fails.

pub mod builder;
pub mod column;
pub mod error;
pub mod layout;

pub use builder::{build_columns, clamp_rows, SchemaParams};
pub use column::{Align, CellConstraint, ColumnDescriptor, ColumnRole};
pub use error::SchemaError;
pub use layout::{ExclusionPair, LedgerLayout};
