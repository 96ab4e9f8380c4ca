//! Access code handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;

use casehub_core::types::id::CaseId;

use crate::error::{ApiError, optional_response, outcome_response};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/access/{code} (anonymous)
pub async fn resolve(State(state): State<AppState>, Path(code): Path<String>) -> Response {
    optional_response(state.sharing.resolve_access_code(&code).await, "access code")
}

/// POST /api/cases/{id}/access-codes
pub async fn issue(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(case_id): Path<CaseId>,
) -> Result<Response, ApiError> {
    let outcome = state
        .sharing
        .issue_access_code(case_id, auth.actor())
        .await?;
    Ok(outcome_response(outcome, StatusCode::CREATED))
}

/// GET /api/cases/{id}/access-codes
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(case_id): Path<CaseId>,
) -> Result<Response, ApiError> {
    let outcome = state
        .sharing
        .list_access_codes(case_id, auth.actor())
        .await?;
    Ok(outcome_response(outcome, StatusCode::OK))
}

/// DELETE /api/cases/{id}/access-codes/{code}
pub async fn revoke(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((case_id, code)): Path<(CaseId, String)>,
) -> Result<Response, ApiError> {
    let outcome = state
        .sharing
        .revoke_access_code(case_id, auth.actor(), &code)
        .await?;
    Ok(outcome_response(outcome, StatusCode::OK))
}
