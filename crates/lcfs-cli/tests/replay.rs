//! # Scripted Replay
//!
//! Loads a YAML summary from disk and replays edits through the public CLI
//! functions, checking the rendered table reflects the committed values.

use std::path::PathBuf;

use lcfs_cli::edit::{replay, Assignment};
use lcfs_cli::load_rows;
use lcfs_cli::render::{render_text, table_for, RenderArgs};
use lcfs_schema::SchemaParams;

const SUMMARY_YAML: &str = "\
- line: 4
  description: Total renewable fuel required
  gasoline: 200000
  diesel: 80000
  format: number
- line: 6
  description: Net volume retained
  gasoline: 0
  diesel: 0
- line: 7
  description: Net volume previously retained
  gasoline: 0
  diesel: 0
- line: 8
  description: Obligation deferred
  gasoline: 0
  diesel: 0
- line: 9
  description: Obligation added
  gasoline: 0
  diesel: 250
";

fn write_summary(dir: &tempfile::TempDir) -> PathBuf {
    let path = dir.path().join("summary.yaml");
    std::fs::write(&path, SUMMARY_YAML).unwrap();
    path
}

#[test]
fn yaml_summary_replay_and_render() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_summary(&dir);
    let rows = load_rows(&path).unwrap();
    assert_eq!(rows.len(), 5);

    let script: Vec<Assignment> = ["6:gasoline=12000", "7:diesel=300"]
        .iter()
        .map(|s| s.parse().unwrap())
        .collect();
    let report = replay(rows, &SchemaParams::new(true, "2025", false), &[], &script);

    assert!(report.rejected.is_empty());
    assert_eq!(report.commits.len(), 2);
    assert_eq!(report.commits[0].value, 10_000);
    // Line 9 diesel is cleared by the edit to line 7.
    assert_eq!(report.rows[4].numeric("diesel"), 0.0);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["commits"][1]["position"]["columnId"], "diesel");

    let args = RenderArgs {
        rows: path,
        period: "2025".into(),
        read_only: true,
        parentheses: false,
        locked_lines: vec![9],
    };
    let text = render_text(&table_for(&args).unwrap());
    assert!(text.contains("200,000"));
    assert!(text.contains("250*"));
    assert!(!text.contains('['));
}
