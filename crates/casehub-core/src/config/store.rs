//! Store backend selection.

use serde::{Deserialize, Serialize};

/// Which [`RecordStore`](crate::traits::RecordStore) implementation to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// PostgreSQL via the `database` section.
    #[default]
    Postgres,
    /// Process-local store; data is lost on restart.
    Memory,
}

/// Store configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Backend to use.
    #[serde(default)]
    pub backend: StoreBackend,
}
