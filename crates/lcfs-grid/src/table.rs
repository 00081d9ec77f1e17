//! # Summary Table
//!
//! The editable grid. Holds the column schema, the last snapshot received
//! from the host, and the local editable copy derived from it. The local
//! copy is an immutable `Arc<[SummaryRow]>` replaced wholesale on every
//! edit, addressed by row index.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use lcfs_core::{CellKey, CellPosition, SummaryRow};
use lcfs_format::{format_field, format_raw, NegativeStyle};
use lcfs_schema::{ColumnDescriptor, ExclusionPair, LedgerLayout};

use crate::edit::{BlurOutcome, EditState};
use crate::error::GridError;
use crate::lock::{NoLock, RowLock};
use crate::render::{RenderedCell, RenderedRow};
use crate::sanitize::{apply_constraint, coerce_commit_value, parse_input, sanitize_input};

/// Receives committed edits.
///
/// Implementations own the network mutation, the saving indicator, error
/// recovery, and re-sync. The grid calls this synchronously from `blur` and
/// does not wait for any outcome.
pub trait CommitSink: Send + Sync {
    /// A cell was committed. `rows` is the full current sequence.
    fn cell_committed(&self, rows: &[SummaryRow], cell: &CellPosition);
}

/// A committed edit, as reported by [`SummaryTable::blur`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellCommit {
    pub position: CellPosition,
    /// Whole-number value now stored in the cell.
    pub value: i64,
    /// Value the cell held when focus arrived.
    pub original: f64,
}

/// Display and side-effect options for a grid.
#[derive(Debug, Clone, PartialEq)]
pub struct TableOptions {
    /// Prefix of every saving-indicator key produced by this table.
    pub table_id: String,
    /// Render negatives in accounting parentheses.
    pub use_parenthesis_for_negative: bool,
    /// Mutually exclusive line pairs.
    pub exclusion_pairs: Vec<ExclusionPair>,
    /// Columns the exclusion pairs apply to.
    pub exclusive_columns: BTreeSet<String>,
}

impl TableOptions {
    /// Options matching a ledger layout: its exclusion pairs over its fuel
    /// columns.
    pub fn for_layout(table_id: impl Into<String>, layout: &LedgerLayout) -> Self {
        Self {
            table_id: table_id.into(),
            use_parenthesis_for_negative: false,
            exclusion_pairs: layout.exclusion_pairs.clone(),
            exclusive_columns: layout.fuels.iter().map(|f| f.as_str().to_string()).collect(),
        }
    }

    fn negative_style(&self) -> NegativeStyle {
        NegativeStyle::from_flag(self.use_parenthesis_for_negative)
    }
}

impl Default for TableOptions {
    fn default() -> Self {
        Self::for_layout("summary", &LedgerLayout::renewable_fuel())
    }
}

/// Headless editable summary grid.
pub struct SummaryTable {
    columns: Vec<ColumnDescriptor>,
    source: Arc<[SummaryRow]>,
    rows: Arc<[SummaryRow]>,
    options: TableOptions,
    lock: Box<dyn RowLock>,
    sink: Option<Arc<dyn CommitSink>>,
    saving: Option<CellKey>,
    edit: EditState,
}

impl std::fmt::Debug for SummaryTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SummaryTable")
            .field("table_id", &self.options.table_id)
            .field("columns", &self.columns.len())
            .field("rows", &self.rows.len())
            .field("edit", &self.edit)
            .field("saving", &self.saving.as_ref().map(ToString::to_string))
            .finish()
    }
}

impl SummaryTable {
    /// Create a grid over `rows` with no lock and no sink.
    pub fn new(
        columns: Vec<ColumnDescriptor>,
        rows: impl Into<Arc<[SummaryRow]>>,
        options: TableOptions,
    ) -> Self {
        let rows = rows.into();
        Self {
            columns,
            source: Arc::clone(&rows),
            rows,
            options,
            lock: Box::new(NoLock),
            sink: None,
            saving: None,
            edit: EditState::Idle,
        }
    }

    /// Builder: install a row lock.
    pub fn with_lock(mut self, lock: impl RowLock + 'static) -> Self {
        self.lock = Box::new(lock);
        self
    }

    /// Builder: install a commit sink.
    pub fn with_sink(mut self, sink: Arc<dyn CommitSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Replace the column schema, e.g. after the dataset changed.
    pub fn set_columns(&mut self, columns: Vec<ColumnDescriptor>) {
        self.columns = columns;
    }

    /// Receive a snapshot from the host.
    ///
    /// A snapshot with a new identity overwrites the local copy, discarding
    /// uncommitted edits and the edit state. Passing the same `Arc` again is
    /// a no-op.
    pub fn set_rows(&mut self, rows: Arc<[SummaryRow]>) {
        if Arc::ptr_eq(&self.source, &rows) {
            return;
        }
        if let Some(cell) = self.edit.cell() {
            tracing::debug!(
                table_id = %self.options.table_id,
                cell = %cell,
                "external refresh discarded in-progress edit"
            );
        }
        self.source = Arc::clone(&rows);
        self.rows = rows;
        self.edit.reset();
    }

    /// Mark the cell whose save is in flight, if any.
    pub fn set_saving_cell(&mut self, key: Option<CellKey>) {
        self.saving = key;
    }

    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    /// The local editable copy.
    pub fn rows(&self) -> &[SummaryRow] {
        &self.rows
    }

    /// A cheap handle to the local editable copy.
    pub fn snapshot(&self) -> Arc<[SummaryRow]> {
        Arc::clone(&self.rows)
    }

    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    pub fn edit_state(&self) -> &EditState {
        &self.edit
    }

    /// Saving-indicator key for a cell of this table.
    pub fn cell_key(&self, position: CellPosition) -> CellKey {
        CellKey::new(self.options.table_id.clone(), position)
    }

    /// The lock reason for a row, when it is locked.
    pub fn lock_reason(&self, row_index: usize) -> Option<&str> {
        let row = self.rows.get(row_index)?;
        self.lock.is_locked(row).then(|| self.lock.reason())
    }

    /// Whether the host should render an input for this cell.
    pub fn is_cell_editable(&self, row_index: usize, column_id: &str) -> bool {
        self.check_editable(row_index, column_id).is_ok()
    }

    /// The raw string an input for this cell is bound to.
    pub fn input_value(&self, row_index: usize, column_id: &str) -> String {
        self.rows
            .get(row_index)
            .map(|row| format_raw(row.get(column_id)))
            .unwrap_or_default()
    }

    /// Focus arrives on a cell: capture its current value.
    pub fn focus(&mut self, row_index: usize, column_id: &str) -> Result<(), GridError> {
        self.check_editable(row_index, column_id)?;
        let original = self.rows[row_index].numeric(column_id);
        self.edit
            .focus(CellPosition::new(row_index, column_id), original);
        Ok(())
    }

    /// A keystroke changed a cell's raw value.
    ///
    /// Sanitizes and clamps the input, stores the resulting string, and
    /// zeroes the exclusion partner when the new value is non-zero, all in
    /// one snapshot replacement. Returns the stored string.
    pub fn change(
        &mut self,
        row_index: usize,
        column_id: &str,
        raw: &str,
    ) -> Result<String, GridError> {
        let column = self.check_editable(row_index, column_id)?;
        let constraint = column.constraint(row_index);

        let sanitized = sanitize_input(raw);
        let stored = apply_constraint(sanitized.clone(), constraint);
        if stored != sanitized {
            tracing::debug!(
                row_index,
                column_id,
                input = %sanitized,
                clamped = %stored,
                "clamped input to cell bounds"
            );
        }

        let rows = Arc::clone(&self.rows);
        let position = CellPosition::new(row_index, column_id);
        self.edit
            .change(position, || rows[row_index].numeric(column_id));

        let mut next = self.rows.to_vec();
        next[row_index].set(column_id, Value::String(stored.clone()));
        if parse_input(&stored).is_some_and(|v| v != 0.0) {
            self.apply_exclusion(&mut next, row_index, column_id);
        }
        self.rows = next.into();
        Ok(stored)
    }

    /// A cell lost focus.
    ///
    /// Only the tracked, edited cell is finalized: its value is floored to a
    /// whole number, stored, and reported to the sink if it differs from the
    /// focus-time value. Any other blur returns `None` and changes nothing.
    pub fn blur(&mut self, row_index: usize, column_id: &str) -> Option<CellCommit> {
        let position = CellPosition::new(row_index, column_id);
        let original = match self.edit.blur(&position) {
            BlurOutcome::Finalize { original } => original,
            BlurOutcome::Unchanged | BlurOutcome::Ignored => return None,
        };

        let row = self.rows.get(row_index)?;
        let value = coerce_commit_value(&format_raw(row.get(column_id)));

        let mut next = self.rows.to_vec();
        next[row_index].set_number(column_id, value as f64);
        self.rows = next.into();

        if value as f64 == original {
            tracing::debug!(row_index, column_id, value, "blur without change; not committing");
            return None;
        }

        tracing::info!(
            table_id = %self.options.table_id,
            row_index,
            column_id,
            value,
            original,
            "cell committed"
        );
        if let Some(sink) = &self.sink {
            sink.cell_committed(&self.rows, &position);
        }
        Some(CellCommit {
            position,
            value,
            original,
        })
    }

    /// Render every row against every column.
    pub fn render(&self) -> Vec<RenderedRow> {
        let style = self.options.negative_style();
        self.rows
            .iter()
            .enumerate()
            .map(|(index, row)| {
                let locked = self.lock.is_locked(row);
                let cells = self
                    .columns
                    .iter()
                    .map(|column| self.render_cell(index, row, column, locked, style))
                    .collect();
                RenderedRow {
                    index,
                    line: row.line,
                    locked,
                    cells,
                }
            })
            .collect()
    }

    fn render_cell(
        &self,
        index: usize,
        row: &SummaryRow,
        column: &ColumnDescriptor,
        locked: bool,
        style: NegativeStyle,
    ) -> RenderedCell {
        if !locked && column.is_cell_editable(index) {
            let key = self.cell_key(CellPosition::new(index, column.id.as_str()));
            return RenderedCell::Input {
                value: format_raw(row.get(&column.id)),
                saving: self.saving.as_ref() == Some(&key),
                constraint: column.constraint(index),
            };
        }

        let value = row.get(&column.id);
        let text = match row.format {
            Some(format) if !column.renders_raw() => format_field(format, value, style),
            _ => format_raw(value),
        };
        let muted = locked && !column.renders_raw();
        RenderedCell::Text {
            text,
            bold: row.bold,
            muted,
            tooltip: muted.then(|| self.lock.reason().to_string()),
        }
    }

    fn check_editable(&self, row_index: usize, column_id: &str) -> Result<&ColumnDescriptor, GridError> {
        let column = self
            .columns
            .iter()
            .find(|c| c.id == column_id)
            .ok_or_else(|| GridError::UnknownColumn(column_id.to_string()))?;
        let row = self.rows.get(row_index).ok_or(GridError::RowOutOfRange {
            index: row_index,
            len: self.rows.len(),
        })?;
        let refuse = |reason: &str| GridError::CellNotEditable {
            row_index,
            column_id: column_id.to_string(),
            reason: reason.to_string(),
        };
        if !column.editable {
            return Err(refuse("column is read-only"));
        }
        if !column.editable_cells.contains(&row_index) {
            return Err(refuse("row is not editable in this column"));
        }
        if self.lock.is_locked(row) {
            return Err(refuse(self.lock.reason()));
        }
        Ok(column)
    }

    /// Zero the exclusion partner of `row_index` in `column_id`.
    ///
    /// A partner row that is globally locked is left untouched.
    fn apply_exclusion(&self, next: &mut [SummaryRow], row_index: usize, column_id: &str) {
        if !self.options.exclusive_columns.contains(column_id) {
            return;
        }
        let Some(line) = next[row_index].line else {
            return;
        };
        for partner in self
            .options
            .exclusion_pairs
            .iter()
            .filter_map(|p| p.partner_of(line))
        {
            let Some(partner_index) = next.iter().position(|r| r.line == Some(partner)) else {
                continue;
            };
            if self.lock.is_locked(&next[partner_index]) {
                tracing::debug!(line, partner, column_id, "exclusion partner locked; left as-is");
                continue;
            }
            tracing::debug!(line, partner, column_id, "zeroing mutually exclusive line");
            next[partner_index].set_number(column_id, 0.0);
        }
    }
}
