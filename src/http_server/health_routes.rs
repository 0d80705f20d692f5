//! Health Route
//!
//! `/health` names the backing store and counts the cats in it. A store that
//! cannot be read turns the check into `503 Service Unavailable`.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

use super::cat_routes::CatState;
use crate::observability::Logger;
use crate::service::CatService;

/// Body of `GET /health`
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub store: &'static str,
    /// Absent when the store could not be read
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cats: Option<usize>,
    pub version: &'static str,
}

pub fn health_routes(state: Arc<CatState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(state)
}

async fn health_handler(
    State(state): State<Arc<CatState>>,
) -> (StatusCode, Json<HealthResponse>) {
    let (status, report) = check(&state.service);
    (status, Json(report))
}

fn check(service: &CatService) -> (StatusCode, HealthResponse) {
    let (status, label, cats) = match service.count() {
        Ok(cats) => (StatusCode::OK, "ok", Some(cats)),
        Err(err) => {
            Logger::error("HEALTH_CHECK_FAILED", &[("detail", err.to_string().as_str())]);
            (StatusCode::SERVICE_UNAVAILABLE, "unavailable", None)
        }
    };

    let report = HealthResponse {
        status: label,
        store: service.store_kind(),
        cats,
        version: env!("CARGO_PKG_VERSION"),
    };
    (status, report)
}
