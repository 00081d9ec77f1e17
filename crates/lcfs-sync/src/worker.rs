//! # Persistence Worker
//!
//! Bridges grid commits to a [`SummaryStore`].
//!
//! ```text
//! SummaryTable ──blur──▶ SyncHandle ──mpsc──▶ worker ──apply/load──▶ SummaryStore
//!      ▲                     │                  │
//!      └──── set_rows ───────┴──── watch ◀──────┘  (rows, saving key)
//! ```
//!
//! Commits are fire-and-forget: the grid never waits for a save. For each
//! commit the worker publishes the saving key, writes the overrides of the
//! cells the schema marks editable,
//! reloads the authoritative rows, publishes them, and clears the saving
//! key. A failed write is logged and followed by a reload when possible;
//! it is not retried.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use lcfs_core::{CellKey, CellPosition, ReportId, SummaryRow};
use lcfs_grid::{CommitSink, SummaryTable};
use lcfs_schema::{build_columns, LedgerLayout, SchemaParams};

use crate::error::SyncError;
use crate::overrides::LineOverrides;
use crate::store::SummaryStore;

/// A commit queued for the worker.
#[derive(Debug)]
struct PendingCommit {
    rows: Vec<SummaryRow>,
    cell: CellPosition,
}

/// Spawns persistence workers.
pub struct PersistenceSync;

impl PersistenceSync {
    /// Load `report` from `store` and spawn a worker for it on the current
    /// tokio runtime.
    ///
    /// `params` must be the ones the grid's columns were built with; the
    /// worker persists exactly the cells that schema marks editable. The
    /// worker runs until every [`SyncHandle`] clone is dropped.
    pub fn spawn(
        store: Arc<dyn SummaryStore>,
        report: ReportId,
        layout: LedgerLayout,
        params: SchemaParams,
        table_id: impl Into<String>,
    ) -> Result<SyncHandle, SyncError> {
        layout
            .validate()
            .map_err(|e| SyncError::InvalidLayout(e.to_string()))?;
        let initial: Arc<[SummaryRow]> = store.load(&report)?.into();
        let (commit_tx, commit_rx) = mpsc::unbounded_channel();
        let (rows_tx, rows_rx) = watch::channel(initial);
        let (saving_tx, saving_rx) = watch::channel(None);

        let worker = Worker {
            store,
            report: report.clone(),
            layout: layout.clone(),
            params: params.clone(),
            table_id: table_id.into(),
            rows: rows_tx,
            saving: saving_tx,
        };
        tokio::spawn(worker.run(commit_rx));

        Ok(SyncHandle {
            report,
            layout: Arc::new(layout),
            params: Arc::new(params),
            commits: commit_tx,
            rows: rows_rx,
            saving: saving_rx,
        })
    }
}

/// Host-side handle to a persistence worker.
///
/// Install it on a grid with [`SummaryTable::with_sink`] and call
/// [`sync_table`](Self::sync_table) whenever either watch channel changes.
#[derive(Clone)]
pub struct SyncHandle {
    report: ReportId,
    layout: Arc<LedgerLayout>,
    params: Arc<SchemaParams>,
    commits: mpsc::UnboundedSender<PendingCommit>,
    rows: watch::Receiver<Arc<[SummaryRow]>>,
    saving: watch::Receiver<Option<CellKey>>,
}

impl std::fmt::Debug for SyncHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncHandle")
            .field("report", &self.report)
            .field("closed", &self.commits.is_closed())
            .finish()
    }
}

impl SyncHandle {
    pub fn report(&self) -> &ReportId {
        &self.report
    }

    /// The most recently published authoritative rows.
    pub fn current_rows(&self) -> Arc<[SummaryRow]> {
        Arc::clone(&self.rows.borrow())
    }

    /// The cell whose save is in flight, if any.
    pub fn saving_key(&self) -> Option<CellKey> {
        self.saving.borrow().clone()
    }

    /// A receiver notified whenever authoritative rows are published.
    pub fn subscribe_rows(&self) -> watch::Receiver<Arc<[SummaryRow]>> {
        self.rows.clone()
    }

    /// A receiver notified whenever the saving key changes.
    pub fn subscribe_saving(&self) -> watch::Receiver<Option<CellKey>> {
        self.saving.clone()
    }

    /// Push the latest rows, the columns derived from them, and the saving
    /// key into `table`.
    ///
    /// Rows are passed by identity, so calling this without a new
    /// publication leaves in-progress edits alone.
    pub fn sync_table(&self, table: &mut SummaryTable) {
        let rows = self.current_rows();
        table.set_columns(build_columns(&rows, &self.params, &self.layout));
        table.set_rows(rows);
        table.set_saving_cell(self.saving_key());
    }

    /// Queue a commit directly, without going through a grid.
    pub fn submit(&self, rows: &[SummaryRow], cell: &CellPosition) -> Result<(), SyncError> {
        self.commits
            .send(PendingCommit {
                rows: rows.to_vec(),
                cell: cell.clone(),
            })
            .map_err(|_| SyncError::WorkerClosed)
    }
}

impl CommitSink for SyncHandle {
    fn cell_committed(&self, rows: &[SummaryRow], cell: &CellPosition) {
        if let Err(e) = self.submit(rows, cell) {
            warn!(report_id = %self.report, cell = %cell, error = %e, "commit dropped");
        }
    }
}

struct Worker {
    store: Arc<dyn SummaryStore>,
    report: ReportId,
    layout: LedgerLayout,
    params: SchemaParams,
    table_id: String,
    rows: watch::Sender<Arc<[SummaryRow]>>,
    saving: watch::Sender<Option<CellKey>>,
}

impl Worker {
    async fn run(self, mut receiver: mpsc::UnboundedReceiver<PendingCommit>) {
        info!(report_id = %self.report, "persistence worker started");
        while let Some(commit) = receiver.recv().await {
            self.process(commit).await;
        }
        info!(report_id = %self.report, "persistence worker stopped (channel closed)");
    }

    async fn process(&self, commit: PendingCommit) {
        let key = CellKey::new(self.table_id.clone(), commit.cell);
        debug!(report_id = %self.report, cell = %key, "saving");
        self.saving.send_replace(Some(key.clone()));

        let columns = build_columns(&commit.rows, &self.params, &self.layout);
        let overrides = LineOverrides::from_editable_cells(&commit.rows, &columns, &self.layout);
        let store = Arc::clone(&self.store);
        let report = self.report.clone();
        let saved = tokio::task::spawn_blocking(move || {
            store.apply(&report, &overrides)?;
            store.load(&report)
        })
        .await;

        match saved {
            Ok(Ok(rows)) => {
                info!(report_id = %self.report, cell = %key, "summary saved");
                self.rows.send_replace(rows.into());
            }
            Ok(Err(e)) => {
                warn!(report_id = %self.report, cell = %key, error = %e, "failed to save summary");
                self.refetch().await;
            }
            Err(e) => {
                warn!(report_id = %self.report, cell = %key, error = %e, "save task aborted");
            }
        }
        self.saving.send_replace(None);
    }

    /// Re-publish the store's rows after a failed write.
    async fn refetch(&self) {
        let store = Arc::clone(&self.store);
        let report = self.report.clone();
        match tokio::task::spawn_blocking(move || store.load(&report)).await {
            Ok(Ok(rows)) => {
                self.rows.send_replace(rows.into());
            }
            Ok(Err(e)) => {
                warn!(report_id = %self.report, error = %e, "failed to reload summary");
            }
            Err(e) => {
                warn!(report_id = %self.report, error = %e, "reload task aborted");
            }
        }
    }
}
