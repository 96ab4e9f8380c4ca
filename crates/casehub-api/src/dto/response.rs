//! Response DTOs.

use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the store does not answer.
    pub status: String,
    /// Server version.
    pub version: String,
    /// Whether the record store answered its health probe.
    pub store: bool,
}
