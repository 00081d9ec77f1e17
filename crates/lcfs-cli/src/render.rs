//! # Render Subcommand
//!
//! Prints a summary as a fixed-width text table, the way the grid would
//! draw it. Inputs appear in brackets; locked cells carry a `*` marker and
//! the lock reason is printed beneath the table.

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use lcfs_grid::{LockedLines, RenderedCell, SummaryTable, TableOptions};
use lcfs_schema::{build_columns, Align, ColumnDescriptor, LedgerLayout, SchemaParams};

/// Arguments for the `lcfs render` subcommand.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Summary rows (JSON or YAML).
    #[arg(long, value_name = "FILE")]
    pub rows: PathBuf,

    /// Compliance period; only affects which cells render as inputs.
    #[arg(long, default_value = "")]
    pub period: String,

    /// Render every cell as text.
    #[arg(long)]
    pub read_only: bool,

    /// Show negative values in parentheses.
    #[arg(long)]
    pub parentheses: bool,

    /// Ledger lines locked from an assessed snapshot, e.g. `6,8`.
    #[arg(long, value_delimiter = ',', value_name = "LINES")]
    pub locked_lines: Vec<u32>,
}

/// Build the grid described by `args`.
pub fn table_for(args: &RenderArgs) -> Result<SummaryTable> {
    let rows = crate::load_rows(&args.rows)?;
    let layout = LedgerLayout::renewable_fuel();
    let params = SchemaParams::new(!args.read_only, args.period.clone(), false);
    let columns = build_columns(&rows, &params, &layout);
    let options = TableOptions {
        use_parenthesis_for_negative: args.parentheses,
        ..TableOptions::for_layout("summary", &layout)
    };
    Ok(SummaryTable::new(columns, rows, options).with_lock(LockedLines::new(args.locked_lines.clone())))
}

/// Draw `table` as text.
pub fn render_text(table: &SummaryTable) -> String {
    let columns = table.columns();
    let mut out = String::new();

    let header: Vec<String> = columns
        .iter()
        .map(|c| pad(&c.label, c, Align::Left))
        .collect();
    let _ = writeln!(out, "{}", header.join(" | ").trim_end());
    let rule: Vec<String> = columns.iter().map(|c| "-".repeat(c.width as usize)).collect();
    let _ = writeln!(out, "{}", rule.join("-+-"));

    let mut any_locked = false;
    for row in table.render() {
        let cells: Vec<String> = row
            .cells
            .iter()
            .zip(columns)
            .map(|(cell, column)| {
                let text = match cell {
                    RenderedCell::Input { value, saving, .. } => {
                        if *saving {
                            format!("[{value}…]")
                        } else {
                            format!("[{value}]")
                        }
                    }
                    RenderedCell::Text { text, muted, .. } if *muted => {
                        any_locked = true;
                        format!("{text}*")
                    }
                    RenderedCell::Text { text, .. } => text.clone(),
                };
                pad(&text, column, column.align)
            })
            .collect();
        let _ = writeln!(out, "{}", cells.join(" | ").trim_end());
    }

    if any_locked {
        let reason = (0..table.rows().len())
            .find_map(|i| table.lock_reason(i))
            .unwrap_or_default();
        let _ = writeln!(out, "\n* {reason}");
    }
    out
}

/// Execute the render subcommand.
pub fn run_render(args: &RenderArgs) -> Result<u8> {
    let table = table_for(args)?;
    tracing::debug!(rows = table.rows().len(), locked = ?args.locked_lines, "rendering summary");
    print!("{}", render_text(&table));
    Ok(0)
}

fn pad(text: &str, column: &ColumnDescriptor, align: Align) -> String {
    let width = column.width as usize;
    match align {
        Align::Left => format!("{text:<width$}"),
        Align::Center => format!("{text:^width$}"),
        Align::Right => format!("{text:>width$}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lcfs_core::{RowFormat, SummaryRow};

    fn table(locked: &[u32], parentheses: bool) -> SummaryTable {
        let rows: Vec<SummaryRow> = vec![
            SummaryRow::with_line(4)
                .text("description", "Base volume")
                .number("gasoline", 150_000.0)
                .formatted(RowFormat::Number),
            SummaryRow::with_line(6)
                .text("description", "Retained")
                .number("gasoline", 100.0),
            SummaryRow::with_line(11)
                .text("description", "Penalty")
                .number("gasoline", -1234.5)
                .formatted(RowFormat::Currency),
        ];
        let layout = LedgerLayout::renewable_fuel();
        let columns = build_columns(&rows, &SchemaParams::new(true, "2025", false), &layout);
        let options = TableOptions {
            use_parenthesis_for_negative: parentheses,
            ..TableOptions::default()
        };
        SummaryTable::new(columns, rows, options).with_lock(LockedLines::new(locked.to_vec()))
    }

    #[test]
    fn renders_inputs_and_formatted_text() {
        let text = render_text(&table(&[], false));
        assert!(text.contains("150,000"));
        assert!(text.contains("[100]"));
        assert!(text.contains("-$1,234.50"));
        assert!(!text.contains('*'));
    }

    #[test]
    fn parentheses_style() {
        let text = render_text(&table(&[], true));
        assert!(text.contains("($1,234.50)"));
    }

    #[test]
    fn locked_cells_are_marked_with_reason() {
        let text = render_text(&table(&[6], false));
        assert!(!text.contains("[100]"));
        assert!(text.contains("100*"));
        assert!(text.trim_end().ends_with("* Locked from assessed snapshot"));
    }
}
