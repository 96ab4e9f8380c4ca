//! `AuthUser` extractor: verifies an optional bearer token into an [`Actor`].

use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;

use casehub_auth::Actor;
use casehub_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// The actor behind a request, if any.
///
/// A request without an `Authorization` header extracts as `AuthUser(None)`
/// and is left for the sharing services to reject where authentication is
/// required. A header that is present but malformed, or a token that fails
/// verification, is rejected here.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Option<Actor>);

impl AuthUser {
    /// The authenticated actor, if any.
    pub fn actor(&self) -> Option<&Actor> {
        self.0.as_ref()
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = <TypedHeader<Authorization<Bearer>> as OptionalFromRequestParts<
            AppState,
        >>::from_request_parts(parts, state)
        .await
        .map_err(|_| AppError::authentication("Invalid Authorization header format"))?;

        let Some(TypedHeader(Authorization(bearer))) = header else {
            return Ok(Self(None));
        };

        let claims = state.jwt_decoder.decode(bearer.token())?;
        tracing::debug!(actor_id = %claims.sub, "Authenticated request");

        Ok(Self(Some(claims.into_actor())))
    }
}
