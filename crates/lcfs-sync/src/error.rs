//! # Sync Errors

use lcfs_core::ReportId;
use thiserror::Error;

/// Errors raised by summary stores and the persistence worker.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    /// No summary is stored for the report.
    #[error("report not found: {0}")]
    UnknownReport(ReportId),

    /// The backing store rejected the operation.
    #[error("store error: {0}")]
    Store(String),

    /// The ledger layout handed to the worker is inconsistent.
    #[error("invalid ledger layout: {0}")]
    InvalidLayout(String),

    /// The persistence worker has shut down.
    #[error("persistence worker is no longer running")]
    WorkerClosed,
}
