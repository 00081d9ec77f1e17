//! # Column Builder
//!
//! Derives column descriptors from the current summary rows. Rows are found
//! by their `line` attribute, so header rows or gaps in the numbering shift
//! indices without breaking the rules. A designated line that is absent is
//! skipped; a base line that is absent counts as `0`.

use serde::{Deserialize, Serialize};

use lcfs_core::{FuelCategory, SummaryRow};

use crate::column::{CellConstraint, ColumnDescriptor};
use crate::layout::LedgerLayout;

/// Inputs to [`build_columns`] beyond the rows themselves.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaParams {
    /// Whether the viewer may edit. `false` yields a read-only schema.
    pub can_edit: bool,
    /// Compliance period, e.g. `"2025"`.
    pub period_id: String,
    /// Whether a prior-year assessed snapshot exists for this report.
    pub has_prior_year_caps: bool,
}

impl SchemaParams {
    pub fn new(can_edit: bool, period_id: impl Into<String>, has_prior_year_caps: bool) -> Self {
        Self {
            can_edit,
            period_id: period_id.into(),
            has_prior_year_caps,
        }
    }

    /// Parameters for enforcing bounds on stored data regardless of who
    /// submitted it: editing allowed, and every prior-year cap present on
    /// the adjustment row applies.
    pub fn enforcing(period_id: impl Into<String>) -> Self {
        Self::new(true, period_id, true)
    }
}

/// Build the ordered column descriptors for a summary.
///
/// Columns are: the line number, the row label, then one value column per
/// fuel in `layout.fuels`.
pub fn build_columns(
    rows: &[SummaryRow],
    params: &SchemaParams,
    layout: &LedgerLayout,
) -> Vec<ColumnDescriptor> {
    let base_row = find_row(rows, layout.base_line).map(|i| &rows[i]);
    if base_row.is_none() {
        tracing::warn!(
            line = layout.base_line,
            "base line missing from summary; retention caps derive from 0"
        );
    }

    let mut columns = Vec::with_capacity(layout.fuels.len() + 2);
    columns.push(ColumnDescriptor::line_number(&layout.line_column, "Line"));
    columns.push(ColumnDescriptor::label(&layout.label_column, ""));

    for &fuel in &layout.fuels {
        columns.push(fuel_column(rows, base_row, fuel, params, layout));
    }

    tracing::debug!(
        columns = columns.len(),
        can_edit = params.can_edit,
        period_id = %params.period_id,
        "built summary columns"
    );
    columns
}

fn fuel_column(
    rows: &[SummaryRow],
    base_row: Option<&SummaryRow>,
    fuel: FuelCategory,
    params: &SchemaParams,
    layout: &LedgerLayout,
) -> ColumnDescriptor {
    let id = fuel.as_str();
    let mut column = ColumnDescriptor::value(id, fuel.label());
    column.editable = params.can_edit && layout.is_fuel_active(fuel, &params.period_id);

    let base_value = base_row.map_or(0.0, |r| r.numeric(id));
    let retention_cap = retention_cap(base_value, layout.retention_rate);
    for line in [layout.retention_line, layout.deferral_line] {
        if let Some(index) = find_row(rows, line) {
            column.editable_cells.insert(index);
            column
                .cell_constraints
                .insert(index, CellConstraint::between(0, retention_cap));
        }
    }

    if let Some(index) = find_row(rows, layout.adjustment_line) {
        // Both effects of the snapshot branch are applied together.
        match prior_year_cap(&rows[index], fuel, params) {
            Some(cap) => {
                column
                    .cell_constraints
                    .insert(index, CellConstraint::between(0, cap));
            }
            None => {
                column.editable_cells.insert(index);
                column
                    .cell_constraints
                    .insert(index, CellConstraint::at_least(0));
            }
        }
    }

    if let Some(index) = find_row(rows, layout.obligation_line) {
        column.editable_cells.insert(index);
        column
            .cell_constraints
            .insert(index, CellConstraint::at_least(0));
    }

    column
}

/// `round(rate × base)` with half-away-from-zero rounding, never negative.
fn retention_cap(base_value: f64, rate: f64) -> i64 {
    let cap = (rate * base_value).round();
    if cap.is_finite() && cap > 0.0 {
        cap as i64
    } else {
        0
    }
}

/// The prior year's assessed value for this fuel, when a snapshot exists
/// and the adjustment row carries a cap for the column.
fn prior_year_cap(row: &SummaryRow, fuel: FuelCategory, params: &SchemaParams) -> Option<i64> {
    if !params.has_prior_year_caps || !row.has_value(fuel.cap_field()) {
        return None;
    }
    Some(row.numeric(fuel.cap_field()).round().max(0.0) as i64)
}

fn find_row(rows: &[SummaryRow], line: u32) -> Option<usize> {
    rows.iter().position(|r| r.line == Some(line))
}

/// Re-apply the schema's bounds to every editable cell of `rows`.
///
/// Cells outside `editable_cells`, and cells in non-editable columns, are
/// left untouched. Used by the backend to enforce the same bounds the grid
/// enforces, regardless of client.
pub fn clamp_rows(rows: &[SummaryRow], columns: &[ColumnDescriptor]) -> Vec<SummaryRow> {
    let mut out = rows.to_vec();
    for column in columns.iter().filter(|c| c.editable) {
        for &index in &column.editable_cells {
            let (Some(row), Some(constraint)) = (out.get_mut(index), column.constraint(index))
            else {
                continue;
            };
            if !row.has_value(&column.id) {
                continue;
            }
            let current = row.numeric(&column.id);
            if constraint.contains(current) {
                continue;
            }
            let clamped = constraint.clamp(current);
            tracing::debug!(
                row_index = index,
                column_id = %column.id,
                from = current,
                to = clamped,
                "clamped override"
            );
            row.set_number(column.id.clone(), clamped);
        }
    }
    out
}
