//! # lcfs CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use lcfs_cli::columns::{run_columns, ColumnsArgs};
use lcfs_cli::edit::{run_edit, EditArgs};
use lcfs_cli::render::{run_render, RenderArgs};

/// LCFS summary grid toolchain.
///
/// Derives column schemas, renders compliance summaries, and replays
/// scripted edits through the editable grid.
#[derive(Parser, Debug)]
#[command(name = "lcfs", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the column descriptors derived for a summary.
    Columns(ColumnsArgs),

    /// Print a summary as a text table.
    Render(RenderArgs),

    /// Replay `line:column=input` edits through the grid.
    Edit(EditArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Columns(args) => run_columns(&args),
        Commands::Render(args) => run_render(&args),
        Commands::Edit(args) => run_edit(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}
