//! # lcfs-cli — CLI for the Summary Grid
//!
//! Drives the schema builder and the headless grid from the command line,
//! for inspecting fixtures and reproducing editing sessions.
//!
//! ## Subcommands
//!
//! - `lcfs columns` — print the column descriptors derived for a summary.
//! - `lcfs render` — print a summary as a text table.
//! - `lcfs edit` — replay `line:column=input` assignments through the grid.
//!
//! Row files are JSON, or YAML when the extension is `.yaml`/`.yml`.

pub mod columns;
pub mod edit;
pub mod render;

use std::path::Path;

use anyhow::{Context, Result};

use lcfs_core::SummaryRow;

/// Read summary rows from a JSON or YAML file.
pub fn load_rows(path: &Path) -> Result<Vec<SummaryRow>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read rows file: {}", path.display()))?;
    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    let rows = if is_yaml {
        serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse rows YAML: {}", path.display()))?
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse rows JSON: {}", path.display()))?
    };
    Ok(rows)
}
