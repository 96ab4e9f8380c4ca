//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use casehub_auth::JwtDecoder;
use casehub_core::config::AppConfig;
use casehub_core::traits::store::RecordStore;
use casehub_service::ShareController;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Record store, for health checks
    pub store: Arc<dyn RecordStore>,
    /// Bearer token verifier
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Sharing facade
    pub sharing: ShareController,
}

impl AppState {
    /// Assemble state from already-built parts.
    pub fn new(
        config: Arc<AppConfig>,
        store: Arc<dyn RecordStore>,
        sharing: ShareController,
    ) -> Self {
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));
        Self {
            config,
            store,
            jwt_decoder,
            sharing,
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("store", &self.store)
            .field("sharing", &self.sharing)
            .finish_non_exhaustive()
    }
}
