//! # Report Summary API
//!
//! ## Endpoints
//!
//! - `GET /v1/reports/{report_id}/summary` — rows plus the column schema
//!   derived for the caller's edit rights and compliance period.
//! - `PUT /v1/reports/{report_id}/summary` — write the editable lines of a
//!   submitted summary. Values are clamped to the same bounds the grid
//!   enforces before they reach the store; cells the schema marks
//!   read-only are ignored. Last write wins.
//!
//! Bounds for a write come from the stored report alone: its rows, its
//! compliance period, and every prior-year cap its adjustment line carries.
//! Nothing in the request body can widen them.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use lcfs_core::{ReportId, SummaryRow};
use lcfs_schema::{build_columns, clamp_rows, ColumnDescriptor, SchemaParams};
use lcfs_sync::{LineOverrides, StoredSummary, SummaryStore};

use crate::error::AppError;
use crate::extractors::{extract_query, extract_validated_json, Validate};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / Response types
// ---------------------------------------------------------------------------

/// Query parameters for reading a summary.
///
/// An empty `period_id` falls back to the stored report's period.
#[derive(Debug, Default, Deserialize)]
pub struct SummaryQuery {
    #[serde(default)]
    pub can_edit: bool,
    #[serde(default)]
    pub period_id: String,
    #[serde(default)]
    pub has_prior_year_caps: bool,
}

/// Request body for writing a summary. Only override values are read from
/// `rows`; other fields a client sends are ignored.
#[derive(Debug, Deserialize)]
pub struct UpdateSummaryRequest {
    pub rows: Vec<SummaryRow>,
}

impl Validate for UpdateSummaryRequest {
    fn validate(&self) -> Result<(), String> {
        if self.rows.is_empty() {
            return Err("rows must not be empty".to_string());
        }
        Ok(())
    }
}

/// A summary with the schema the grid should render it with.
#[derive(Debug, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub report_id: ReportId,
    pub rows: Vec<SummaryRow>,
    pub columns: Vec<ColumnDescriptor>,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Build the summary router.
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/v1/reports/{report_id}/summary",
        get(get_summary).put(put_summary),
    )
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /v1/reports/{report_id}/summary
async fn get_summary(
    State(state): State<AppState>,
    Path(report_id): Path<String>,
    query: Result<Query<SummaryQuery>, QueryRejection>,
) -> Result<Json<SummaryResponse>, AppError> {
    let query = extract_query(query)?;
    let report = ReportId::new(report_id)?;
    let stored = stored_summary(&state, &report)?;
    let period_id = if query.period_id.is_empty() {
        stored.period_id.clone()
    } else {
        query.period_id
    };
    let params = SchemaParams::new(query.can_edit, period_id, query.has_prior_year_caps);
    Ok(Json(summary_response(&state, report, stored, &params)))
}

/// PUT /v1/reports/{report_id}/summary
///
/// The submitted rows supply only override values. Bounds are derived from
/// the stored summary, so a client cannot raise a cap by submitting a
/// different base line, period, or snapshot flag.
async fn put_summary(
    State(state): State<AppState>,
    Path(report_id): Path<String>,
    body: Result<Json<UpdateSummaryRequest>, JsonRejection>,
) -> Result<Json<SummaryResponse>, AppError> {
    let req = extract_validated_json(body)?;
    let report = ReportId::new(report_id)?;
    let layout = state.layout.as_ref();
    let stored = stored_summary(&state, &report)?;
    let params = SchemaParams::enforcing(stored.period_id);

    let mut merged = stored.rows;
    let columns = build_columns(&merged, &params, layout);
    LineOverrides::from_rows(&req.rows, layout).apply_to(&mut merged);
    let clamped = clamp_rows(&merged, &columns);
    let overrides = LineOverrides::from_editable_cells(&clamped, &columns, layout);

    let updated_at = state.store.apply(&report, &overrides)?;
    tracing::info!(
        report_id = %report,
        cells = overrides.len(),
        %updated_at,
        "summary updated"
    );
    let stored = stored_summary(&state, &report)?;
    Ok(Json(summary_response(&state, report, stored, &params)))
}

fn stored_summary(state: &AppState, report: &ReportId) -> Result<StoredSummary, AppError> {
    state
        .store
        .get(report)
        .ok_or_else(|| AppError::NotFound(format!("report {report}")))
}

fn summary_response(
    state: &AppState,
    report: ReportId,
    stored: StoredSummary,
    params: &SchemaParams,
) -> SummaryResponse {
    let columns = build_columns(&stored.rows, params, &state.layout);
    SummaryResponse {
        report_id: report,
        rows: stored.rows,
        columns,
        updated_at: stored.updated_at,
    }
}
