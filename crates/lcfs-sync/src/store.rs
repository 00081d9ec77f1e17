//! # Summary Stores
//!
//! Persistence backends for report summaries. A store returns the
//! authoritative rows of a report and accepts line overrides; how derived
//! lines are recomputed after an override is the store's business.
//!
//! [`InMemoryStore`] is the reference backend used by the API server and
//! the tests. Writes are last-write-wins.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;

use lcfs_core::{ReportId, SummaryRow};

use crate::error::SyncError;
use crate::overrides::LineOverrides;

/// A backend holding report summaries.
pub trait SummaryStore: Send + Sync + 'static {
    /// The authoritative rows of `report`.
    fn load(&self, report: &ReportId) -> Result<Vec<SummaryRow>, SyncError>;

    /// Persist `overrides` for `report`, returning the write timestamp.
    fn apply(&self, report: &ReportId, overrides: &LineOverrides) -> Result<DateTime<Utc>, SyncError>;
}

/// A stored summary with its compliance period and last write time.
#[derive(Debug, Clone, Serialize)]
pub struct StoredSummary {
    pub rows: Vec<SummaryRow>,
    /// Compliance period the report belongs to; empty when unknown.
    pub period_id: String,
    pub updated_at: DateTime<Utc>,
}

/// Thread-safe, cloneable in-memory summary store.
///
/// The lock is never held across an `.await`, so a synchronous
/// `parking_lot::RwLock` suffices.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    reports: Arc<RwLock<HashMap<ReportId, StoredSummary>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a report's rows, with no compliance period.
    pub fn insert(&self, report: ReportId, rows: Vec<SummaryRow>) {
        self.insert_for_period(report, String::new(), rows);
    }

    /// Insert or replace a report's rows for a compliance period.
    pub fn insert_for_period(
        &self,
        report: ReportId,
        period_id: impl Into<String>,
        rows: Vec<SummaryRow>,
    ) {
        let summary = StoredSummary {
            rows,
            period_id: period_id.into(),
            updated_at: Utc::now(),
        };
        self.reports.write().insert(report, summary);
    }

    /// A report's stored summary, with its write time.
    pub fn get(&self, report: &ReportId) -> Option<StoredSummary> {
        self.reports.read().get(report).cloned()
    }

    pub fn contains(&self, report: &ReportId) -> bool {
        self.reports.read().contains_key(report)
    }

    /// Stored report ids, sorted.
    pub fn report_ids(&self) -> Vec<ReportId> {
        let mut ids: Vec<_> = self.reports.read().keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.reports.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SummaryStore for InMemoryStore {
    fn load(&self, report: &ReportId) -> Result<Vec<SummaryRow>, SyncError> {
        self.reports
            .read()
            .get(report)
            .map(|s| s.rows.clone())
            .ok_or_else(|| SyncError::UnknownReport(report.clone()))
    }

    fn apply(&self, report: &ReportId, overrides: &LineOverrides) -> Result<DateTime<Utc>, SyncError> {
        let mut guard = self.reports.write();
        let summary = guard
            .get_mut(report)
            .ok_or_else(|| SyncError::UnknownReport(report.clone()))?;
        let written = overrides.apply_to(&mut summary.rows);
        summary.updated_at = Utc::now();
        tracing::info!(
            report_id = %report,
            cells = written,
            updated_at = %summary.updated_at,
            "summary overrides stored"
        );
        Ok(summary.updated_at)
    }
}
