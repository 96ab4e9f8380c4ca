//! Convenience result type aliases for CaseHub.

use crate::error::{AppError, ShareError};

/// A specialized `Result` type for infrastructure operations.
///
/// This is defined as a convenience so that every crate does not need to
/// write `Result<T, AppError>` explicitly.
pub type AppResult<T> = Result<T, AppError>;

/// Result of a sharing operation's pre-flight (authentication, ownership,
/// input validation). Failures here abort before any I/O side effect.
pub type ShareResult<T> = Result<T, ShareError>;
