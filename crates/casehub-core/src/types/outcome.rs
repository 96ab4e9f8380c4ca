//! Structured result of a sharing operation that passed its pre-flight checks.

use serde::Serialize;

use crate::error::ShareError;

/// What happened after authorization succeeded.
///
/// Reads never fail outright: a store failure yields [`Outcome::ReadDegraded`]
/// carrying fallback data (typically empty). Writes surface their failure as
/// [`Outcome::WriteFailed`] instead of silently doing nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// The operation succeeded.
    Ok(T),
    /// A read failed; the payload is the fallback value shown instead.
    ReadDegraded(T),
    /// A write failed.
    WriteFailed(ShareError),
}

impl<T> Outcome<T> {
    /// Whether the operation achieved what it set out to do.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    /// Whether this is a degraded read.
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::ReadDegraded(_))
    }

    /// The payload, whether genuine or fallback.
    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Ok(data) | Self::ReadDegraded(data) => Some(data),
            Self::WriteFailed(_) => None,
        }
    }

    /// The write failure, if any.
    pub fn error(&self) -> Option<&ShareError> {
        match self {
            Self::WriteFailed(err) => Some(err),
            _ => None,
        }
    }

    /// Consume into the payload, whether genuine or fallback.
    pub fn into_data(self) -> Option<T> {
        match self {
            Self::Ok(data) | Self::ReadDegraded(data) => Some(data),
            Self::WriteFailed(_) => None,
        }
    }

    /// Transform the payload, keeping the discriminant.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Self::Ok(data) => Outcome::Ok(f(data)),
            Self::ReadDegraded(data) => Outcome::ReadDegraded(f(data)),
            Self::WriteFailed(err) => Outcome::WriteFailed(err),
        }
    }

    /// The caller-facing `{success, data?, degraded?, error?}` shape.
    pub fn to_body(&self) -> OutcomeBody<'_, T> {
        match self {
            Self::Ok(data) => OutcomeBody {
                success: true,
                data: Some(data),
                degraded: None,
                error: None,
            },
            Self::ReadDegraded(data) => OutcomeBody {
                success: true,
                data: Some(data),
                degraded: Some(true),
                error: None,
            },
            Self::WriteFailed(err) => OutcomeBody {
                success: false,
                data: None,
                degraded: None,
                error: Some(ErrorBody {
                    kind: err.kind().to_string(),
                    error: err,
                    message: err.to_string(),
                }),
            },
        }
    }
}

impl<T> From<Result<T, ShareError>> for Outcome<T> {
    fn from(result: Result<T, ShareError>) -> Self {
        match result {
            Ok(data) => Self::Ok(data),
            Err(err) => Self::WriteFailed(err),
        }
    }
}

/// Serializable view of an [`Outcome`].
#[derive(Debug, Serialize)]
pub struct OutcomeBody<'a, T> {
    /// Whether the operation succeeded (degraded reads count as success).
    pub success: bool,
    /// Payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<&'a T>,
    /// Present and `true` when the payload is a fallback.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degraded: Option<bool>,
    /// Failure details for writes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody<'a>>,
}

/// Failure details inside an [`OutcomeBody`].
#[derive(Debug, Serialize)]
pub struct ErrorBody<'a> {
    /// Error kind, e.g. `CONFLICT`.
    pub kind: String,
    /// Structured error (`{"code": …, "detail": …}`).
    #[serde(flatten)]
    pub error: &'a ShareError,
    /// Human-readable message suitable for inline display.
    pub message: String,
}
