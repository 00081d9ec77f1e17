//! # Edit Subcommand
//!
//! Replays scripted edits through the grid. Each `--set line:column=input`
//! becomes a focus, a change carrying `input` verbatim, and a blur on the
//! cell of that ledger line, so sanitization, clamping, mutual exclusion,
//! and commit rules all apply exactly as they would interactively.
//!
//! Prints the resulting rows, every commit, and every refused assignment as
//! JSON. Exits with status 1 when any assignment was refused.

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{bail, Result};
use clap::Args;
use parking_lot::Mutex;
use serde::Serialize;

use lcfs_core::{CellPosition, SummaryRow};
use lcfs_grid::{CellCommit, CommitSink, LockedLines, SummaryTable, TableOptions};
use lcfs_schema::{build_columns, LedgerLayout, SchemaParams};

/// Arguments for the `lcfs edit` subcommand.
#[derive(Args, Debug)]
pub struct EditArgs {
    /// Summary rows (JSON or YAML).
    #[arg(long, value_name = "FILE")]
    pub rows: PathBuf,

    /// Compliance period, e.g. 2025.
    #[arg(long, default_value = "")]
    pub period: String,

    /// A prior-year assessed snapshot exists for this report.
    #[arg(long)]
    pub prior_year_caps: bool,

    /// Ledger lines locked from an assessed snapshot, e.g. `6,8`.
    #[arg(long, value_delimiter = ',', value_name = "LINES")]
    pub locked_lines: Vec<u32>,

    /// Assignment of the form `<line>:<column>=<input>`. Repeatable.
    #[arg(long = "set", value_name = "ASSIGNMENT", required = true)]
    pub assignments: Vec<Assignment>,
}

/// One scripted edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assignment {
    pub line: u32,
    pub column: String,
    pub input: String,
}

impl FromStr for Assignment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (target, input) = s
            .split_once('=')
            .ok_or_else(|| format!("expected <line>:<column>=<input>, got {s:?}"))?;
        let (line, column) = target
            .split_once(':')
            .ok_or_else(|| format!("expected <line>:<column> before '=', got {target:?}"))?;
        let line = line
            .trim()
            .parse()
            .map_err(|_| format!("invalid line number {line:?}"))?;
        let column = column.trim();
        if column.is_empty() {
            return Err(format!("missing column in {s:?}"));
        }
        Ok(Self {
            line,
            column: column.to_string(),
            input: input.to_string(),
        })
    }
}

/// An assignment the grid refused.
#[derive(Debug, Clone, Serialize)]
pub struct Rejection {
    pub assignment: Assignment,
    pub reason: String,
}

/// Result of replaying a script.
#[derive(Debug, Serialize)]
pub struct EditReport {
    pub rows: Vec<SummaryRow>,
    pub commits: Vec<CellCommit>,
    /// Cells reported to the commit sink, in order.
    pub notifications: Vec<CellPosition>,
    pub rejected: Vec<Rejection>,
}

/// Records sink notifications.
#[derive(Default)]
struct Notifications(Mutex<Vec<CellPosition>>);

impl CommitSink for Notifications {
    fn cell_committed(&self, _rows: &[SummaryRow], cell: &CellPosition) {
        self.0.lock().push(cell.clone());
    }
}

/// Replay `assignments` against `rows`.
pub fn replay(
    rows: Vec<SummaryRow>,
    params: &SchemaParams,
    locked_lines: &[u32],
    assignments: &[Assignment],
) -> EditReport {
    let layout = LedgerLayout::renewable_fuel();
    let columns = build_columns(&rows, params, &layout);
    let sink = Arc::new(Notifications::default());
    let mut table = SummaryTable::new(columns, rows, TableOptions::for_layout("summary", &layout))
        .with_lock(LockedLines::new(locked_lines.iter().copied()))
        .with_sink(Arc::clone(&sink) as Arc<dyn CommitSink>);

    let mut commits = Vec::new();
    let mut rejected = Vec::new();
    for assignment in assignments {
        let Some(index) = table
            .rows()
            .iter()
            .position(|r| r.line == Some(assignment.line))
        else {
            tracing::warn!(line = assignment.line, "no row for line");
            rejected.push(Rejection {
                assignment: assignment.clone(),
                reason: format!("no row for line {}", assignment.line),
            });
            continue;
        };

        let applied = table
            .focus(index, &assignment.column)
            .and_then(|()| table.change(index, &assignment.column, &assignment.input));
        match applied {
            Ok(stored) => {
                tracing::debug!(line = assignment.line, column = %assignment.column, %stored, "applied");
                commits.extend(table.blur(index, &assignment.column));
            }
            Err(e) => {
                tracing::warn!(line = assignment.line, column = %assignment.column, error = %e, "edit refused");
                rejected.push(Rejection {
                    assignment: assignment.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    let notifications = sink.0.lock().clone();
    EditReport {
        rows: table.rows().to_vec(),
        commits,
        notifications,
        rejected,
    }
}

/// Execute the edit subcommand.
pub fn run_edit(args: &EditArgs) -> Result<u8> {
    let rows = crate::load_rows(&args.rows)?;
    if rows.is_empty() {
        bail!("rows file is empty: {}", args.rows.display());
    }
    let params = SchemaParams::new(true, args.period.clone(), args.prior_year_caps);
    let report = replay(rows, &params, &args.locked_lines, &args.assignments);
    tracing::info!(
        commits = report.commits.len(),
        rejected = report.rejected.len(),
        "replayed edits"
    );
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(if report.rejected.is_empty() { 0 } else { 1 })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<SummaryRow> {
        (1..=11)
            .map(|line| {
                let row = SummaryRow::with_line(line);
                match line {
                    4 => row.number("gasoline", 150_000.0).number("diesel", 10_000.0),
                    9 => row.number("gasoline", 400.0),
                    _ => row,
                }
            })
            .collect()
    }

    fn set(s: &str) -> Assignment {
        s.parse().unwrap()
    }

    #[test]
    fn parses_assignments() {
        assert_eq!(
            set("6:gasoline=$1,200.50"),
            Assignment {
                line: 6,
                column: "gasoline".into(),
                input: "$1,200.50".into()
            }
        );
        assert!("6gasoline=1".parse::<Assignment>().is_err());
        assert!("x:gasoline=1".parse::<Assignment>().is_err());
        assert!("6:=1".parse::<Assignment>().is_err());
        assert!("6:gasoline".parse::<Assignment>().is_err());
    }

    #[test]
    fn replay_applies_grid_rules() {
        let params = SchemaParams::new(true, "2025", false);
        let report = replay(
            rows(),
            &params,
            &[],
            &[
                set("6:gasoline=$9,999.99"),
                set("7:gasoline=25.9"),
                set("8:diesel=0"),
            ],
        );
        assert_eq!(report.rows[5].numeric("gasoline"), 7_500.0);
        assert_eq!(report.rows[6].numeric("gasoline"), 25.0);
        assert_eq!(report.rows[8].numeric("gasoline"), 0.0);
        // 8:diesel=0 does not change the (empty) cell.
        assert_eq!(report.commits.len(), 2);
        assert_eq!(
            report.notifications,
            vec![CellPosition::new(5, "gasoline"), CellPosition::new(6, "gasoline")]
        );
        assert!(report.rejected.is_empty());
    }

    #[test]
    fn replay_reports_refusals() {
        let params = SchemaParams::new(true, "2025", false);
        let report = replay(
            rows(),
            &params,
            &[6],
            &[set("6:gasoline=1"), set("4:gasoline=1"), set("42:gasoline=1"), set("9:jetFuel=5")],
        );
        assert_eq!(report.rejected.len(), 4);
        assert!(report.commits.is_empty());
        assert!(report.rejected[2].reason.contains("no row for line 42"));
    }
}
