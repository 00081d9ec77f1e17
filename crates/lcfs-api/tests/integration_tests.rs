//! # Integration Tests for lcfs-api
//!
//! Health probes, summary reads with schema derivation, and summary writes
//! with server-side clamping and read-only filtering.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use lcfs_api::state::AppState;
use lcfs_core::{ReportId, SummaryRow};

const REPORT: &str = "CR-2025-0007";

fn ledger() -> Vec<SummaryRow> {
    (1..=11)
        .map(|line| {
            let row = SummaryRow::with_line(line).text("description", format!("Line {line}"));
            match line {
                4 => row.number("gasoline", 150_000.0).number("diesel", 20_000.0),
                7 => row.number("gasoline", 0.0).number("maxGasoline", 5_000.0),
                _ => row,
            }
        })
        .collect()
}

/// Helper: build the test app with one seeded report.
fn test_app() -> (axum::Router, AppState) {
    let state = AppState::new();
    state.store.insert(ReportId::new(REPORT).unwrap(), ledger());
    (lcfs_api::app(state.clone()), state)
}

/// Helper: read response body as JSON.
async fn body_json(response: axum::http::Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn put_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

fn column<'a>(body: &'a Value, id: &str) -> &'a Value {
    body["columns"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["id"] == id)
        .unwrap()
}

fn row_value(body: &Value, line: u64, field: &str) -> Value {
    body["rows"]
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["line"] == line)
        .map(|r| r[field].clone())
        .unwrap_or(Value::Null)
}

// -- Health Probes ------------------------------------------------------------

#[tokio::test]
async fn test_liveness_probe() {
    let (app, _) = test_app();
    let response = app.oneshot(get("/health/liveness")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_readiness_probe() {
    let (app, _) = test_app();
    let response = app.oneshot(get("/health/readiness")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

// -- Read ---------------------------------------------------------------------

#[tokio::test]
async fn test_get_summary_derives_schema() {
    let (app, _) = test_app();
    let response = app
        .oneshot(get(&format!(
            "/v1/reports/{REPORT}/summary?can_edit=true&period_id=2025"
        )))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;

    assert_eq!(body["report_id"], REPORT);
    assert_eq!(body["rows"].as_array().unwrap().len(), 11);

    let gasoline = column(&body, "gasoline");
    assert_eq!(gasoline["editable"], true);
    assert_eq!(gasoline["editableCells"], json!([5, 6, 7, 8]));
    assert_eq!(gasoline["cellConstraints"]["5"], json!({"min": 0, "max": 7500}));
    assert_eq!(column(&body, "jetFuel")["editable"], false);
}

#[tokio::test]
async fn test_get_summary_read_only_by_default() {
    let (app, _) = test_app();
    let response = app
        .oneshot(get(&format!("/v1/reports/{REPORT}/summary")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    for column in body["columns"].as_array().unwrap() {
        assert_eq!(column["editable"], false);
    }
}

#[tokio::test]
async fn test_get_unknown_report_returns_404() {
    let (app, _) = test_app();
    let response = app
        .oneshot(get("/v1/reports/CR-missing/summary"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_get_with_malformed_query_returns_400() {
    let (app, _) = test_app();
    let response = app
        .oneshot(get(&format!("/v1/reports/{REPORT}/summary?can_edit=maybe")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// -- Write --------------------------------------------------------------------

#[tokio::test]
async fn test_put_clamps_and_stores_overrides() {
    let (app, state) = test_app();
    let mut rows = ledger();
    rows[5].set_number("gasoline", 9_000.0);
    rows[7].set_number("diesel", 600.4);
    let body = json!({ "rows": rows, "period_id": "2025" });

    let response = app
        .oneshot(put_json(&format!("/v1/reports/{REPORT}/summary"), &body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;

    assert_eq!(row_value(&body, 6, "gasoline"), json!(7500));
    assert_eq!(row_value(&body, 8, "diesel"), json!(600));

    let stored = state.store.get(&ReportId::new(REPORT).unwrap()).unwrap();
    assert_eq!(stored.rows[5].numeric("gasoline"), 7_500.0);
}

#[tokio::test]
async fn test_put_ignores_read_only_cells_and_base_line() {
    let (app, state) = test_app();
    let mut rows = ledger();
    // Raising the base line must not raise the retention cap.
    rows[3].set_number("gasoline", 10_000_000.0);
    rows[5].set_number("gasoline", 100_000.0);
    // Line 7 is capped by the prior-year snapshot and not editable.
    rows[6].set_number("gasoline", 4_000.0);
    // Jet fuel is inactive before 2028.
    rows[8].set_number("jetFuel", 50.0);
    let body = json!({ "rows": rows, "period_id": "2025", "has_prior_year_caps": true });

    let response = app
        .oneshot(put_json(&format!("/v1/reports/{REPORT}/summary"), &body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let stored = state.store.get(&ReportId::new(REPORT).unwrap()).unwrap();
    assert_eq!(stored.rows[3].numeric("gasoline"), 150_000.0);
    assert_eq!(stored.rows[5].numeric("gasoline"), 7_500.0);
    assert_eq!(stored.rows[6].numeric("gasoline"), 0.0);
    assert!(!stored.rows[8].has_value("jetFuel"));
}

#[tokio::test]
async fn test_put_empty_rows_returns_422() {
    let (app, _) = test_app();
    let response = app
        .oneshot(put_json(
            &format!("/v1/reports/{REPORT}/summary"),
            &json!({ "rows": [], "period_id": "2025" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_put_malformed_json_returns_400() {
    let (app, _) = test_app();
    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(format!("/v1/reports/{REPORT}/summary"))
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_put_unknown_report_returns_404() {
    let (app, _) = test_app();
    let response = app
        .oneshot(put_json(
            "/v1/reports/CR-missing/summary",
            &json!({ "rows": ledger(), "period_id": "2025" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_put_cannot_bypass_prior_year_cap() {
    let (app, state) = test_app();
    let body = json!({
        "rows": [{ "line": 7, "gasoline": 1_000_000 }],
        "period_id": "2025",
        "has_prior_year_caps": false,
    });

    let response = app
        .oneshot(put_json(&format!("/v1/reports/{REPORT}/summary"), &body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(column(&body, "gasoline")["cellConstraints"]["6"], json!({"min": 0, "max": 5000}));

    let stored = state.store.get(&ReportId::new(REPORT).unwrap()).unwrap();
    assert_eq!(stored.rows[6].numeric("gasoline"), 0.0);
    assert!(stored.rows[6].numeric("gasoline") <= stored.rows[6].numeric("maxGasoline"));
}

#[tokio::test]
async fn test_put_uses_stored_period() {
    let state = AppState::new();
    let early = ReportId::new("CR-2025-0100").unwrap();
    let late = ReportId::new("CR-2028-0100").unwrap();
    state.store.insert_for_period(early.clone(), "2025", ledger());
    state.store.insert_for_period(late.clone(), "2028", ledger());

    for id in [&early, &late] {
        let body = json!({ "rows": [{ "line": 9, "jetFuel": 75 }], "period_id": "2030" });
        let response = lcfs_api::app(state.clone())
            .oneshot(put_json(&format!("/v1/reports/{id}/summary"), &body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    assert!(!state.store.get(&early).unwrap().rows[8].has_value("jetFuel"));
    assert_eq!(state.store.get(&late).unwrap().rows[8].numeric("jetFuel"), 75.0);
}

#[tokio::test]
async fn test_get_defaults_to_stored_period() {
    let state = AppState::new();
    let id = ReportId::new("CR-2028-0200").unwrap();
    state.store.insert_for_period(id.clone(), "2028", ledger());
    let response = lcfs_api::app(state)
        .oneshot(get(&format!("/v1/reports/{id}/summary?can_edit=true")))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(column(&body, "jetFuel")["editable"], true);
}
