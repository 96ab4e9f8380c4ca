//! Origin used when building invite links.

use axum::extract::FromRequestParts;
use axum::http::header::{HOST, HeaderName, ORIGIN};
use axum::http::request::Parts;

use casehub_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Scheme and authority invite links are rooted at.
///
/// Taken from `invite.public_origin` when configured, otherwise from the
/// request's `Origin` header, otherwise `http://` plus its `Host`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOrigin(pub String);

impl FromRequestParts<AppState> for RequestOrigin {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(origin) = &state.config.invite.public_origin {
            return Ok(Self(origin.trim_end_matches('/').to_string()));
        }

        let header = |name: HeaderName| {
            parts
                .headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .filter(|v| !v.is_empty() && *v != "null")
        };

        if let Some(origin) = header(ORIGIN) {
            return Ok(Self(origin.trim_end_matches('/').to_string()));
        }
        if let Some(host) = header(HOST) {
            return Ok(Self(format!("http://{host}")));
        }

        Err(AppError::validation("Cannot determine the origin for invite links").into())
    }
}
