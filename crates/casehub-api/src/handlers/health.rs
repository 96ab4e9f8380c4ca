//! Health check handler.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;

use casehub_core::types::outcome::Outcome;

use crate::dto::response::HealthResponse;
use crate::error::outcome_response;
use crate::state::AppState;

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Response {
    let store = match state.store.health_check().await {
        Ok(healthy) => healthy,
        Err(e) => {
            tracing::warn!(error = %e, "Store health check failed");
            false
        }
    };

    let response = HealthResponse {
        status: if store { "ok" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        store,
    };
    let outcome = if store {
        Outcome::Ok(response)
    } else {
        Outcome::ReadDegraded(response)
    };
    outcome_response(outcome, StatusCode::OK)
}
