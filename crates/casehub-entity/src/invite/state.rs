//! Derived invite lifecycle state.
//!
//! Nothing is persisted: an existing row is either pending or
//! latent-expired, and every terminal state (redeemed, expired, cancelled)
//! is represented by the row being gone.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of an invite as observed at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InviteState {
    /// Row exists and expiry is in the future.
    Pending,
    /// Row exists but expiry has passed; removed on next redeem or sweep.
    LatentExpired,
    /// No row: redeemed, expired-and-removed, or cancelled.
    Gone,
}

impl InviteState {
    /// Derive the state from row presence and expiry.
    pub fn observe(expires_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Self {
        match expires_at {
            None => Self::Gone,
            Some(expires_at) if expires_at > now => Self::Pending,
            Some(_) => Self::LatentExpired,
        }
    }

    /// Whether a redemption may proceed.
    pub fn is_redeemable(&self) -> bool {
        matches!(self, Self::Pending)
    }
}
