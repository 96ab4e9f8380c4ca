//! Background worker configuration.

use serde::{Deserialize, Serialize};

/// Background maintenance configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Whether the scheduler runs at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Cron expression (with seconds) for the expired-invite sweep.
    #[serde(default = "default_invite_sweep_cron")]
    pub invite_sweep_cron: String,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            invite_sweep_cron: default_invite_sweep_cron(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_invite_sweep_cron() -> String {
    "0 */30 * * * *".to_string()
}
