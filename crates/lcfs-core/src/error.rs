//! # Error Types
//!
//! Errors raised while parsing identifiers and summary payloads. Numeric
//! cell values never produce an error: malformed input degrades to `0`.

use thiserror::Error;

/// Top-level error type for the compliance ledger.
#[derive(Error, Debug)]
pub enum LcfsError {
    /// A fuel column identifier did not match any known category.
    #[error("unknown fuel category: {0:?}")]
    UnknownFuelCategory(String),

    /// A row format tag was neither `currency` nor `number`.
    #[error("unknown row format: {0:?}")]
    UnknownFormat(String),

    /// A cell key string was not of the form `<table>_<row>_<column>`.
    #[error("malformed cell key: {0:?}")]
    MalformedCellKey(String),

    /// An identifier failed validation.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
