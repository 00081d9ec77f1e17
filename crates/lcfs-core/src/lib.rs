//! # lcfs-core — Foundational Types for the Compliance Ledger
//!
//! Defines the data model shared by every other crate in the workspace:
//! the summary ledger row, the fuel categories that make up its numeric
//! columns, the display format tags a row may carry, and the identifiers
//! used to address a single cell across the grid and the persistence layer.
//!
//! ## Key Design Principles
//!
//! 1. **Rows are ordered and index-addressed.** A summary is a `Vec` of
//!    [`SummaryRow`]; the position encodes the regulator's line numbering and
//!    is never re-sorted.
//!
//! 2. **Numeric reads are total.** [`SummaryRow::numeric`] treats absent,
//!    null, non-numeric, or non-finite values as `0`. Ledger arithmetic never
//!    fails on a missing field.
//!
//! 3. **Single `FuelCategory` enum.** One definition of the fuel columns
//!    with exhaustive `match` everywhere.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `lcfs-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod fuel;
pub mod identity;
pub mod row;

pub use error::LcfsError;
pub use fuel::{FuelCategory, FUEL_CATEGORY_COUNT};
pub use identity::{CellKey, CellPosition, ReportId};
pub use row::{number_value, numeric_value, RowFormat, SummaryRow};
