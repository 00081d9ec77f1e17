//! # Line Overrides
//!
//! The subset of a summary that a user may change: whole-number values of
//! the layout's editable lines, per fuel column. This is all a store needs
//! to persist an edit; every other line is derived server-side.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use lcfs_core::{FuelCategory, SummaryRow};
use lcfs_schema::{ColumnDescriptor, LedgerLayout};

/// Override values keyed by ledger line, then fuel category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineOverrides {
    lines: BTreeMap<u32, BTreeMap<FuelCategory, i64>>,
}

impl LineOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every present fuel value on the layout's editable lines.
    pub fn from_rows(rows: &[SummaryRow], layout: &LedgerLayout) -> Self {
        let mut overrides = Self::new();
        for line in layout.editable_lines() {
            let Some(row) = rows.iter().find(|r| r.line == Some(line)) else {
                continue;
            };
            for &fuel in &layout.fuels {
                if row.has_value(fuel.as_str()) {
                    overrides.insert(line, fuel, whole(row.numeric(fuel.as_str())));
                }
            }
        }
        overrides
    }

    /// Like [`from_rows`](Self::from_rows), restricted to cells the schema
    /// marks editable. Values in read-only columns, or on lines excluded from
    /// editing, are dropped.
    pub fn from_editable_cells(
        rows: &[SummaryRow],
        columns: &[ColumnDescriptor],
        layout: &LedgerLayout,
    ) -> Self {
        let mut overrides = Self::new();
        for column in columns {
            if !layout.is_fuel_column(&column.id) {
                continue;
            }
            let Ok(fuel) = column.id.parse::<FuelCategory>() else {
                continue;
            };
            for (index, row) in rows.iter().enumerate() {
                let Some(line) = row.line.filter(|l| layout.editable_lines().contains(l)) else {
                    continue;
                };
                if column.is_cell_editable(index) && row.has_value(&column.id) {
                    overrides.insert(line, fuel, whole(row.numeric(&column.id)));
                }
            }
        }
        overrides
    }

    pub fn insert(&mut self, line: u32, fuel: FuelCategory, value: i64) {
        self.lines.entry(line).or_default().insert(fuel, value);
    }

    pub fn get(&self, line: u32, fuel: FuelCategory) -> Option<i64> {
        self.lines.get(&line)?.get(&fuel).copied()
    }

    /// Number of overridden cells.
    pub fn len(&self) -> usize {
        self.lines.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `(line, fuel, value)` triples in line order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, FuelCategory, i64)> + '_ {
        self.lines
            .iter()
            .flat_map(|(&line, fuels)| fuels.iter().map(move |(&fuel, &v)| (line, fuel, v)))
    }

    /// Write the overrides into `rows`, matching rows by line. Returns the
    /// number of cells written; overrides for absent lines are skipped.
    pub fn apply_to(&self, rows: &mut [SummaryRow]) -> usize {
        let mut written = 0;
        for (line, fuel, value) in self.iter() {
            match rows.iter_mut().find(|r| r.line == Some(line)) {
                Some(row) => {
                    row.set_number(fuel.as_str(), value as f64);
                    written += 1;
                }
                None => tracing::debug!(line, fuel = %fuel, "override for absent line skipped"),
            }
        }
        written
    }
}

fn whole(value: f64) -> i64 {
    let floored = value.floor();
    if floored.is_finite() {
        floored as i64
    } else {
        0
    }
}
