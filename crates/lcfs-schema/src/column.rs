//! # Column Descriptors
//!
//! One descriptor per column of the summary grid. `editable_cells` and
//! `cell_constraints` are keyed by row *index*, not by ledger line.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// What a column displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnRole {
    /// The ledger line number. Always rendered raw.
    LineNumber,
    /// The row label. Always rendered raw.
    Label,
    /// A numeric ledger value, formatted per row.
    Value,
}

/// Horizontal alignment hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    Left,
    Center,
    Right,
}

/// Inclusive numeric bounds for one cell. Either side may be open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CellConstraint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,
}

impl CellConstraint {
    /// Lower bound only.
    pub fn at_least(min: i64) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    /// Both bounds.
    pub fn between(min: i64, max: i64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Replace a value above `max` with `max` and below `min` with `min`.
    pub fn clamp(&self, value: f64) -> f64 {
        let mut v = value;
        if let Some(max) = self.max {
            if v > max as f64 {
                v = max as f64;
            }
        }
        if let Some(min) = self.min {
            if v < min as f64 {
                v = min as f64;
            }
        }
        v
    }

    /// Whether the value lies within both bounds.
    pub fn contains(&self, value: f64) -> bool {
        self.min.map_or(true, |min| value >= min as f64)
            && self.max.map_or(true, |max| value <= max as f64)
    }
}

/// Descriptor for one grid column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDescriptor {
    /// Column id; matches a row field name.
    pub id: String,
    /// Header label.
    pub label: String,
    pub role: ColumnRole,
    pub align: Align,
    /// Preferred width in character cells.
    pub width: u16,
    /// Whether any cell of this column accepts input.
    pub editable: bool,
    /// Row indices eligible for input when `editable` is set.
    pub editable_cells: BTreeSet<usize>,
    /// Per-row bounds, keyed by row index.
    pub cell_constraints: BTreeMap<usize, CellConstraint>,
}

impl ColumnDescriptor {
    /// A non-editable line-number column.
    pub fn line_number(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::fixed(id, label, ColumnRole::LineNumber, Align::Center, 6)
    }

    /// A non-editable row-label column.
    pub fn label(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::fixed(id, label, ColumnRole::Label, Align::Left, 48)
    }

    /// A numeric value column with no editable cells yet.
    pub fn value(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::fixed(id, label, ColumnRole::Value, Align::Right, 16)
    }

    fn fixed(
        id: impl Into<String>,
        label: impl Into<String>,
        role: ColumnRole,
        align: Align,
        width: u16,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            role,
            align,
            width,
            editable: false,
            editable_cells: BTreeSet::new(),
            cell_constraints: BTreeMap::new(),
        }
    }

    /// Whether the column's cell at `row_index` accepts input, ignoring any
    /// row-level lock.
    pub fn is_cell_editable(&self, row_index: usize) -> bool {
        self.editable && self.editable_cells.contains(&row_index)
    }

    /// Bounds for a row, if any.
    pub fn constraint(&self, row_index: usize) -> Option<CellConstraint> {
        self.cell_constraints.get(&row_index).copied()
    }

    /// Whether this column renders raw values.
    pub fn renders_raw(&self) -> bool {
        matches!(self.role, ColumnRole::LineNumber | ColumnRole::Label)
    }
}
