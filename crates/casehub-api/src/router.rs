//! Route definitions for the CaseHub sharing HTTP API.
//!
//! All routes are mounted under `/api`. The router receives `AppState` and
//! passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router,
    extract::Request,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::middleware::cors::build_cors_layer;
use crate::middleware::logging::mask_secrets;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(share_routes())
        .merge(invite_routes())
        .merge(access_routes())
        .merge(health_routes());

    let cors = build_cors_layer(&state.config.server.cors);
    let trace = TraceLayer::new_for_http().make_span_with(|request: &Request| {
        tracing::info_span!(
            "http",
            method = %request.method(),
            path = %mask_secrets(request.uri().path()),
        )
    });

    Router::new()
        .nest("/api", api_routes)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .layer(trace)
        .layer(cors)
        .with_state(state)
}

/// Owner share management
fn share_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/cases/{id}/shares",
            get(handlers::shares::sharing_overview).post(handlers::shares::share_with_user),
        )
        .route(
            "/cases/{id}/shares/{user_id}",
            put(handlers::shares::update_permissions).delete(handlers::shares::unshare),
        )
}

/// Owner invite management, public preview, and redemption
fn invite_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/cases/{id}/invites",
            get(handlers::invites::list_pending).post(handlers::invites::create_invite),
        )
        .route(
            "/cases/{id}/invites/{invite_id}",
            delete(handlers::invites::cancel_invite),
        )
        .route("/invites/{token}", get(handlers::invites::preview_invite))
        .route("/invites/{token}/redeem", post(handlers::invites::redeem_invite))
}

/// Owner access-code management and anonymous resolution
fn access_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/cases/{id}/access-codes",
            get(handlers::access::list).post(handlers::access::issue),
        )
        .route(
            "/cases/{id}/access-codes/{code}",
            delete(handlers::access::revoke),
        )
        .route("/access/{code}", get(handlers::access::resolve))
}

/// Health check
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
