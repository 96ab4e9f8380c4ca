//! Maps domain errors and outcomes to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use casehub_core::error::{AppError, ErrorKind, ShareError};
use casehub_core::types::outcome::Outcome;

/// HTTP status for an error kind.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Authentication => StatusCode::UNAUTHORIZED,
        ErrorKind::Authorization => StatusCode::FORBIDDEN,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::Expired => StatusCode::GONE,
        ErrorKind::EmailMismatch | ErrorKind::Validation => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorKind::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorKind::Internal
        | ErrorKind::Database
        | ErrorKind::Configuration
        | ErrorKind::Serialization => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Error returned from handlers.
///
/// Sharing failures keep their structured `{code, detail}` form in the body;
/// infrastructure failures carry only a kind and a message.
#[derive(Debug)]
pub enum ApiError {
    /// A sharing pre-flight failure.
    Share(ShareError),
    /// Anything else.
    App(AppError),
}

impl From<ShareError> for ApiError {
    fn from(err: ShareError) -> Self {
        Self::Share(err)
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self::App(err)
    }
}

#[derive(Debug, Serialize)]
struct ErrorEnvelope<'a> {
    success: bool,
    error: ErrorDetail<'a>,
}

#[derive(Debug, Serialize)]
struct ErrorDetail<'a> {
    kind: String,
    #[serde(flatten)]
    share: Option<&'a ShareError>,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (kind, share, message) = match &self {
            Self::Share(err) => (err.kind(), Some(err), err.to_string()),
            Self::App(err) => (err.kind, None, err.message.clone()),
        };

        let status = status_for(kind);
        if status.is_server_error() {
            tracing::error!(error = %message, "Internal server error");
        }

        let body = ErrorEnvelope {
            success: false,
            error: ErrorDetail {
                kind: kind.to_string(),
                share,
                message,
            },
        };
        (status, Json(body)).into_response()
    }
}

/// Render an outcome with `status` on success.
///
/// Degraded reads are still `200`; failed writes take the status of their
/// error.
pub fn outcome_response<T: Serialize>(outcome: Outcome<T>, status: StatusCode) -> Response {
    let status = match &outcome {
        Outcome::Ok(_) => status,
        Outcome::ReadDegraded(_) => StatusCode::OK,
        Outcome::WriteFailed(err) => status_for(err.kind()),
    };
    (status, Json(outcome.to_body())).into_response()
}

/// Render an outcome whose payload may be absent; absence is a `404`.
pub fn optional_response<T: Serialize>(outcome: Outcome<Option<T>>, what: &str) -> Response {
    match outcome {
        Outcome::Ok(None) => ApiError::Share(ShareError::not_found(what)).into_response(),
        Outcome::Ok(Some(data)) => outcome_response(Outcome::Ok(data), StatusCode::OK),
        other => outcome_response(other, StatusCode::OK),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use casehub_core::error::ConflictReason;
    use http_body_util::BodyExt;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body")
            .to_bytes();
        serde_json::from_slice(&bytes).expect("json")
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_for(ErrorKind::Expired), StatusCode::GONE);
        assert_eq!(
            status_for(ErrorKind::EmailMismatch),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(status_for(ErrorKind::Authentication), StatusCode::UNAUTHORIZED);
        assert_eq!(status_for(ErrorKind::Database), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_share_error_body_keeps_code() {
        let response =
            ApiError::from(ShareError::Conflict(ConflictReason::AlreadyShared)).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "conflict");
        assert_eq!(body["error"]["detail"], "already_shared");
    }

    #[tokio::test]
    async fn test_missing_optional_payload_is_not_found() {
        let response = optional_response::<u8>(Outcome::Ok(None), "invite");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_degraded_read_is_ok_and_flagged() {
        let response = outcome_response(Outcome::ReadDegraded(Vec::<u8>::new()), StatusCode::OK);
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["degraded"], true);
    }
}
