//! Direct share handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;

use casehub_core::types::id::{CaseId, UserId};

use crate::dto::request::{ShareWithUserRequest, UpdatePermissionsRequest};
use crate::error::{ApiError, outcome_response};
use crate::extractors::AuthUser;
use crate::handlers::validated;
use crate::state::AppState;

/// GET /api/cases/{id}/shares
pub async fn sharing_overview(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(case_id): Path<CaseId>,
) -> Result<Response, ApiError> {
    let outcome = state
        .sharing
        .sharing_overview(case_id, auth.actor())
        .await?;
    Ok(outcome_response(outcome, StatusCode::OK))
}

/// POST /api/cases/{id}/shares
pub async fn share_with_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(case_id): Path<CaseId>,
    Json(req): Json<ShareWithUserRequest>,
) -> Result<Response, ApiError> {
    let req = validated(req)?;
    let outcome = state
        .sharing
        .share_with_user(case_id, auth.actor(), &req.email)
        .await?;
    Ok(outcome_response(outcome, StatusCode::CREATED))
}

/// PUT /api/cases/{id}/shares/{user_id}
pub async fn update_permissions(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((case_id, user_id)): Path<(CaseId, UserId)>,
    Json(req): Json<UpdatePermissionsRequest>,
) -> Result<Response, ApiError> {
    let outcome = state
        .sharing
        .update_permissions(case_id, auth.actor(), user_id, req.into())
        .await?;
    Ok(outcome_response(outcome, StatusCode::OK))
}

/// DELETE /api/cases/{id}/shares/{user_id}
pub async fn unshare(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((case_id, user_id)): Path<(CaseId, UserId)>,
) -> Result<Response, ApiError> {
    let outcome = state.sharing.unshare(case_id, auth.actor(), user_id).await?;
    Ok(outcome_response(outcome, StatusCode::OK))
}
