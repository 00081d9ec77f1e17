//! # Schema Errors
//!
//! Raised only when validating a hand-built [`LedgerLayout`](crate::LedgerLayout).
//! Column generation itself is infallible.

use thiserror::Error;

/// Errors found while validating a ledger layout.
#[derive(Error, Debug, PartialEq)]
pub enum SchemaError {
    /// The layout declares no fuel columns.
    #[error("ledger layout has no fuel columns")]
    NoFuelColumns,

    /// The retention rate is negative or not finite.
    #[error("retention rate must be a finite non-negative number, got {0}")]
    InvalidRetentionRate(f64),

    /// An exclusion pair refers to the same line twice.
    #[error("exclusion pair must name two distinct lines, got {0} twice")]
    DegenerateExclusionPair(u32),

    /// A designated line is listed more than once.
    #[error("line {0} is designated for more than one role")]
    DuplicateDesignatedLine(u32),
}
