//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor: the summary store, the ledger layout that
//! drives schema derivation, and the runtime configuration.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;

use lcfs_core::{LcfsError, ReportId, SummaryRow};
use lcfs_schema::{LedgerLayout, SchemaError};
use lcfs_sync::InMemoryStore;

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// JSON file mapping report ids to summaries, loaded at startup. Each
    /// entry is either a rows array or `{"period_id": .., "rows": [..]}`.
    pub seed_file: Option<PathBuf>,
}

impl AppConfig {
    /// Build configuration from `PORT` and `LCFS_SEED_FILE`.
    ///
    /// An unset or unparsable `PORT` falls back to 8080.
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);
        let seed_file = std::env::var_os("LCFS_SEED_FILE")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        Self { port, seed_file }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            seed_file: None,
        }
    }
}

/// One report in a seed file.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SeedEntry {
    Rows(Vec<SummaryRow>),
    Report {
        #[serde(default)]
        period_id: String,
        rows: Vec<SummaryRow>,
    },
}

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: InMemoryStore,
    pub layout: Arc<LedgerLayout>,
    pub config: AppConfig,
}

impl AppState {
    /// Empty store, renewable fuel layout, default configuration.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    pub fn with_config(config: AppConfig) -> Self {
        Self {
            store: InMemoryStore::new(),
            layout: Arc::new(LedgerLayout::renewable_fuel()),
            config,
        }
    }

    /// State for a custom ledger layout. The layout is validated first.
    pub fn with_layout(config: AppConfig, layout: LedgerLayout) -> Result<Self, SchemaError> {
        layout.validate()?;
        Ok(Self {
            store: InMemoryStore::new(),
            layout: Arc::new(layout),
            config,
        })
    }

    /// Insert every report found in a JSON seed file, returning how many
    /// were loaded.
    pub fn load_seed(&self, path: &Path) -> Result<usize, LcfsError> {
        let raw = std::fs::read_to_string(path)?;
        let reports: BTreeMap<ReportId, SeedEntry> = serde_json::from_str(&raw)?;
        let count = reports.len();
        for (id, entry) in reports {
            let (period_id, rows) = match entry {
                SeedEntry::Rows(rows) => (String::new(), rows),
                SeedEntry::Report { period_id, rows } => (period_id, rows),
            };
            tracing::debug!(report_id = %id, %period_id, rows = rows.len(), "seeded report");
            self.store.insert_for_period(id, period_id, rows);
        }
        Ok(count)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
