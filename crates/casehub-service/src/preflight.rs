//! Routing of pre-flight failures.
//!
//! Loading the case to check ownership can fail for infrastructure reasons.
//! That failure is not an authorization verdict, so it is folded into the
//! operation's outcome: a write reports it, a read degrades.

use tracing::warn;

use casehub_core::error::ShareError;
use casehub_core::result::ShareResult;
use casehub_core::types::outcome::Outcome;

/// Resolve a pre-flight failure of a write operation.
pub fn for_write<T>(err: ShareError) -> ShareResult<Outcome<T>> {
    match err {
        ShareError::Internal(_) => Ok(Outcome::WriteFailed(err)),
        other => Err(other),
    }
}

/// Resolve a pre-flight failure of a read operation, substituting `fallback`.
pub fn for_read<T>(err: ShareError, fallback: T) -> ShareResult<Outcome<T>> {
    match err {
        ShareError::Internal(message) => {
            warn!(error = %message, "Serving degraded read after failed ownership lookup");
            Ok(Outcome::ReadDegraded(fallback))
        }
        other => Err(other),
    }
}
