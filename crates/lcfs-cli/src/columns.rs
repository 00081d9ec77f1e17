//! # Columns Subcommand
//!
//! Prints the column descriptors the grid would use for a summary, as JSON.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use lcfs_schema::{build_columns, ColumnDescriptor, LedgerLayout, SchemaParams};

/// Arguments for the `lcfs columns` subcommand.
#[derive(Args, Debug)]
pub struct ColumnsArgs {
    /// Summary rows (JSON or YAML).
    #[arg(long, value_name = "FILE")]
    pub rows: PathBuf,

    /// Compliance period, e.g. 2025.
    #[arg(long, default_value = "")]
    pub period: String,

    /// Build a read-only schema.
    #[arg(long)]
    pub read_only: bool,

    /// A prior-year assessed snapshot exists for this report.
    #[arg(long)]
    pub prior_year_caps: bool,
}

impl ColumnsArgs {
    pub fn params(&self) -> SchemaParams {
        SchemaParams::new(!self.read_only, self.period.clone(), self.prior_year_caps)
    }
}

/// Derive the columns for `args`.
pub fn columns_for(args: &ColumnsArgs) -> Result<Vec<ColumnDescriptor>> {
    let rows = crate::load_rows(&args.rows)?;
    Ok(build_columns(&rows, &args.params(), &LedgerLayout::renewable_fuel()))
}

/// Execute the columns subcommand.
pub fn run_columns(args: &ColumnsArgs) -> Result<u8> {
    let columns = columns_for(args)?;
    tracing::info!(columns = columns.len(), period = %args.period, "derived column schema");
    println!("{}", serde_json::to_string_pretty(&columns)?);
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows_file(dir: &tempfile::TempDir) -> PathBuf {
        let path = dir.path().join("rows.json");
        let rows: Vec<_> = (1..=11)
            .map(|line| {
                if line == 4 {
                    serde_json::json!({"line": line, "gasoline": 150000, "jetFuel": 40000})
                } else {
                    serde_json::json!({"line": line})
                }
            })
            .collect();
        std::fs::write(&path, serde_json::to_string(&rows).unwrap()).unwrap();
        path
    }

    #[test]
    fn read_only_flag_disables_editing() {
        let dir = tempfile::tempdir().unwrap();
        let args = ColumnsArgs {
            rows: rows_file(&dir),
            period: "2030".into(),
            read_only: true,
            prior_year_caps: false,
        };
        assert!(columns_for(&args).unwrap().iter().all(|c| !c.editable));
    }

    #[test]
    fn jet_fuel_follows_period() {
        let dir = tempfile::tempdir().unwrap();
        let mut args = ColumnsArgs {
            rows: rows_file(&dir),
            period: "2027".into(),
            read_only: false,
            prior_year_caps: false,
        };
        let jet = |cols: Vec<ColumnDescriptor>| cols.into_iter().find(|c| c.id == "jetFuel").unwrap();
        assert!(!jet(columns_for(&args).unwrap()).editable);
        args.period = "2028".into();
        let column = jet(columns_for(&args).unwrap());
        assert!(column.editable);
        assert_eq!(column.constraint(5).and_then(|c| c.max), Some(2_000));
    }
}
