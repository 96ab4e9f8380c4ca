//! Invitation configuration.

use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Invite lifetime and link settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InviteConfig {
    /// How long an invite stays redeemable, in hours.
    #[serde(default = "default_ttl_hours")]
    pub ttl_hours: u32,
    /// Origin used to build invite links when the request carries none.
    #[serde(default)]
    pub public_origin: Option<String>,
}

impl Default for InviteConfig {
    fn default() -> Self {
        Self {
            ttl_hours: default_ttl_hours(),
            public_origin: None,
        }
    }
}

impl InviteConfig {
    /// Invite lifetime. Never shorter than one hour, so expiry is always
    /// strictly after creation.
    pub fn ttl(&self) -> Duration {
        Duration::hours(i64::from(self.ttl_hours.max(1)))
    }
}

fn default_ttl_hours() -> u32 {
    7 * 24
}
