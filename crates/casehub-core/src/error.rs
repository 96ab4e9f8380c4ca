//! Unified application error types for CaseHub.
//!
//! Infrastructure failures (configuration, database, serialization) are
//! carried by [`AppError`]. The sharing subsystem's own taxonomy is
//! [`ShareError`]; it converts into `AppError` at the HTTP boundary.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::traits::store::StoreError;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// The requested resource was not found.
    NotFound,
    /// No authenticated actor, or the bearer token was rejected.
    Authentication,
    /// The actor is authenticated but may not perform the action.
    Authorization,
    /// Input validation failed.
    Validation,
    /// A conflict occurred (duplicate entry, already shared, etc.).
    Conflict,
    /// The addressed invite is past its expiry.
    Expired,
    /// The signed-in identity does not match the invite's bound email.
    EmailMismatch,
    /// An internal server error occurred.
    Internal,
    /// A database error occurred.
    Database,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// The service is temporarily unavailable.
    ServiceUnavailable,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Authentication => write!(f, "AUTHENTICATION"),
            Self::Authorization => write!(f, "AUTHORIZATION"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Conflict => write!(f, "CONFLICT"),
            Self::Expired => write!(f, "EXPIRED"),
            Self::EmailMismatch => write!(f, "EMAIL_MISMATCH"),
            Self::Internal => write!(f, "INTERNAL"),
            Self::Database => write!(f, "DATABASE"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::ServiceUnavailable => write!(f, "SERVICE_UNAVAILABLE"),
        }
    }
}

/// The unified application error used throughout CaseHub.
///
/// All crate-specific errors are mapped into `AppError` using `From` impls
/// or explicit `.map_err()` calls. This provides a single error type for
/// the entire application boundary.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create an authentication error.
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authentication, message)
    }

    /// Create an authorization error.
    pub fn authorization(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authorization, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create a service-unavailable error.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ServiceUnavailable, message)
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        let kind = match err {
            StoreError::UniqueViolation { .. } => ErrorKind::Conflict,
            _ => ErrorKind::Database,
        };
        Self::with_source(kind, format!("Store error: {err}"), err)
    }
}

/// Which uniqueness rule a conflicting sharing request ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictReason {
    /// A share already exists for this (case, grantee) pair.
    AlreadyShared,
    /// A pending invite already exists for this (case, email) pair.
    AlreadyInvited,
    /// The email belongs to a registered identity; share directly instead.
    AlreadyRegistered,
    /// The owner tried to share a case with themselves.
    SelfShare,
}

impl fmt::Display for ConflictReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyShared => write!(f, "case is already shared with this user"),
            Self::AlreadyInvited => write!(f, "a pending invite already exists for this email"),
            Self::AlreadyRegistered => {
                write!(f, "this email belongs to a registered user; share directly instead")
            }
            Self::SelfShare => write!(f, "you cannot share a case with yourself"),
        }
    }
}

/// Failure taxonomy of the sharing and invitation subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "code", content = "detail", rename_all = "snake_case")]
pub enum ShareError {
    /// No actor is attached to the request.
    #[error("authentication required")]
    Unauthenticated,
    /// The actor is not the owner of the case.
    #[error("only the case owner may perform this action")]
    Forbidden,
    /// A case, identity, invite, or access code does not exist.
    #[error("{0} not found")]
    NotFound(String),
    /// A uniqueness rule was violated.
    #[error("conflict: {0}")]
    Conflict(ConflictReason),
    /// The invite is past its expiry.
    #[error("invite has expired")]
    Expired,
    /// The signed-in email differs from the email the invite was sent to.
    #[error("this invite was sent to a different email address")]
    EmailMismatch,
    /// Malformed caller input (email, code, token).
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// A persistence failure other than a uniqueness violation. Retryable.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ShareError {
    /// Shorthand for a not-found error naming the missing thing.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    /// Returns the matching [`ErrorKind`].
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Unauthenticated => ErrorKind::Authentication,
            Self::Forbidden => ErrorKind::Authorization,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Conflict(_) => ErrorKind::Conflict,
            Self::Expired => ErrorKind::Expired,
            Self::EmailMismatch => ErrorKind::EmailMismatch,
            Self::InvalidInput(_) => ErrorKind::Validation,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }
}

impl From<ShareError> for AppError {
    fn from(err: ShareError) -> Self {
        Self::new(err.kind(), err.to_string())
    }
}

impl From<StoreError> for ShareError {
    fn from(err: StoreError) -> Self {
        Self::Internal(err.to_string())
    }
}
