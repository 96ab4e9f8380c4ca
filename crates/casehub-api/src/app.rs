//! Application builder: wires services, router, middleware, and state.

use std::sync::Arc;

use axum::Router;

use casehub_auth::AuthorizationGuard;
use casehub_core::config::AppConfig;
use casehub_database::Repositories;
use casehub_service::{AccessCodeGateway, AuditRecorder, InviteLedger, ShareController, ShareRegistry};

use crate::router::build_router;
use crate::state::AppState;

/// Builds the sharing services over `repos` and fronts them with a controller.
pub fn build_sharing(config: &AppConfig, repos: &Repositories) -> ShareController {
    let guard = AuthorizationGuard::new(repos.cases.clone());
    let identities = Arc::new(repos.profiles.clone());

    let registry = ShareRegistry::new(guard.clone(), identities.clone(), repos.shares.clone());
    let ledger = InviteLedger::new(
        guard.clone(),
        identities,
        repos.invites.clone(),
        repos.shares.clone(),
        repos.cases.clone(),
        config.invite.ttl(),
    );
    let gateway = AccessCodeGateway::new(
        guard,
        repos.access_codes.clone(),
        repos.cases.clone(),
        repos.content.clone(),
        config.access_code.max_issue_attempts,
    );
    let audit = AuditRecorder::new(Arc::new(repos.audit.clone()));

    ShareController::new(registry, ledger, gateway, audit)
}

/// Builds the complete Axum application over `repos`.
pub fn build_app(config: Arc<AppConfig>, repos: &Repositories) -> Router {
    let sharing = build_sharing(&config, repos);
    build_router(AppState::new(config, repos.store.clone(), sharing))
}
