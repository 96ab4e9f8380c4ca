//! Invitation handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;

use casehub_core::types::id::{CaseId, InviteId};

use crate::dto::request::CreateInviteRequest;
use crate::error::{ApiError, optional_response, outcome_response};
use crate::extractors::{AuthUser, RequestOrigin};
use crate::handlers::validated;
use crate::state::AppState;

/// POST /api/cases/{id}/invites
pub async fn create_invite(
    State(state): State<AppState>,
    auth: AuthUser,
    RequestOrigin(origin): RequestOrigin,
    Path(case_id): Path<CaseId>,
    Json(req): Json<CreateInviteRequest>,
) -> Result<Response, ApiError> {
    let req = validated(req)?;
    let outcome = state
        .sharing
        .create_invite(case_id, auth.actor(), &req.email, req.permissions(), &origin)
        .await?;
    Ok(outcome_response(outcome, StatusCode::CREATED))
}

/// GET /api/cases/{id}/invites
pub async fn list_pending(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(case_id): Path<CaseId>,
) -> Result<Response, ApiError> {
    let outcome = state
        .sharing
        .list_pending_invites(case_id, auth.actor())
        .await?;
    Ok(outcome_response(outcome, StatusCode::OK))
}

/// DELETE /api/cases/{id}/invites/{invite_id}
pub async fn cancel_invite(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((case_id, invite_id)): Path<(CaseId, InviteId)>,
) -> Result<Response, ApiError> {
    let outcome = state
        .sharing
        .cancel_invite(case_id, auth.actor(), invite_id)
        .await?;
    Ok(outcome_response(outcome, StatusCode::OK))
}

/// GET /api/invites/{token} (public)
pub async fn preview_invite(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Response {
    optional_response(state.sharing.preview_invite(&token).await, "invite")
}

/// POST /api/invites/{token}/redeem
pub async fn redeem_invite(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(token): Path<String>,
) -> Result<Response, ApiError> {
    let outcome = state.sharing.redeem_invite(&token, auth.actor()).await?;
    Ok(outcome_response(outcome, StatusCode::OK))
}
