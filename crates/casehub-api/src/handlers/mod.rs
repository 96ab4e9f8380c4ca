//! HTTP request handlers organized by resource.

pub mod access;
pub mod health;
pub mod invites;
pub mod shares;

use validator::Validate;

use casehub_core::error::AppError;

use crate::error::ApiError;

/// Run `validator` rules on a request body.
pub(crate) fn validated<T: Validate>(req: T) -> Result<T, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    Ok(req)
}
