//! # lcfs-api — Axum API for Compliance Report Summaries
//!
//! Serves the summary rows of a compliance report together with the column
//! schema the editable grid renders them with, and accepts the user's line
//! overrides back.
//!
//! ## API Surface
//!
//! | Route                                  | Module               |
//! |----------------------------------------|----------------------|
//! | `GET /v1/reports/{report_id}/summary`  | [`routes::summary`]  |
//! | `PUT /v1/reports/{report_id}/summary`  | [`routes::summary`]  |
//! | `GET /health/liveness`, `/health/readiness` | this module     |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → CorsLayer → Handler
//! ```

pub mod error;
pub mod extractors;
pub mod routes;
pub mod state;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Assemble the full application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .merge(routes::summary::router())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let health = Router::new()
        .route("/health/liveness", axum::routing::get(liveness))
        .route("/health/readiness", axum::routing::get(readiness));

    Router::new().merge(health).merge(api)
}

/// Liveness probe — always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe — returns 200 when the application is ready to serve.
async fn readiness() -> &'static str {
    "ready"
}
