//! Access code configuration.

use serde::{Deserialize, Serialize};

/// Access code issuance settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessCodeConfig {
    /// How many fresh codes to try before giving up on collisions.
    #[serde(default = "default_max_issue_attempts")]
    pub max_issue_attempts: u32,
}

impl Default for AccessCodeConfig {
    fn default() -> Self {
        Self {
            max_issue_attempts: default_max_issue_attempts(),
        }
    }
}

fn default_max_issue_attempts() -> u32 {
    5
}
