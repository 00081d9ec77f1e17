//! # Row Locking
//!
//! Rows frozen by a prior formal assessment render read-only, muted, and
//! with a hover reason. Which rows are locked is decided by the host.

use std::collections::BTreeSet;

use lcfs_core::SummaryRow;

/// Hover text shown on locked rows unless a lock supplies its own.
pub const DEFAULT_LOCK_REASON: &str = "Locked from assessed snapshot";

/// Decides whether a row is globally locked.
pub trait RowLock: Send + Sync {
    /// Whether `row` is locked.
    fn is_locked(&self, row: &SummaryRow) -> bool;

    /// Human-readable reason shown on locked rows.
    fn reason(&self) -> &str {
        DEFAULT_LOCK_REASON
    }
}

/// Locks nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLock;

impl RowLock for NoLock {
    fn is_locked(&self, _row: &SummaryRow) -> bool {
        false
    }
}

/// Locks the rows whose `line` is in a fixed set.
#[derive(Debug, Clone)]
pub struct LockedLines {
    lines: BTreeSet<u32>,
    reason: String,
}

impl LockedLines {
    /// Lock `lines` with the default reason.
    pub fn new(lines: impl IntoIterator<Item = u32>) -> Self {
        Self {
            lines: lines.into_iter().collect(),
            reason: DEFAULT_LOCK_REASON.to_string(),
        }
    }

    /// Replace the hover reason.
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = reason.into();
        self
    }

    /// The locked line numbers.
    pub fn lines(&self) -> &BTreeSet<u32> {
        &self.lines
    }
}

impl RowLock for LockedLines {
    fn is_locked(&self, row: &SummaryRow) -> bool {
        row.line.is_some_and(|l| self.lines.contains(&l))
    }

    fn reason(&self) -> &str {
        &self.reason
    }
}

/// Adapts a predicate over rows into a [`RowLock`].
pub struct LockWhen<F>(pub F);

impl<F> RowLock for LockWhen<F>
where
    F: Fn(&SummaryRow) -> bool + Send + Sync,
{
    fn is_locked(&self, row: &SummaryRow) -> bool {
        (self.0)(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locked_lines_match_line_numbers() {
        let lock = LockedLines::new([6, 8]);
        assert!(lock.is_locked(&SummaryRow::with_line(6)));
        assert!(!lock.is_locked(&SummaryRow::with_line(7)));
        assert!(!lock.is_locked(&SummaryRow::default()));
        assert_eq!(lock.reason(), DEFAULT_LOCK_REASON);
    }

    #[test]
    fn custom_reason() {
        let lock = LockedLines::new([6]).with_reason("Assessed 2024-03-31");
        assert_eq!(lock.reason(), "Assessed 2024-03-31");
    }

    #[test]
    fn predicate_lock() {
        let lock = LockWhen(|row: &SummaryRow| row.line.is_some_and(|l| l > 10));
        assert!(lock.is_locked(&SummaryRow::with_line(11)));
        assert!(!lock.is_locked(&SummaryRow::with_line(3)));
        assert!(!NoLock.is_locked(&SummaryRow::with_line(3)));
    }
}
