//! # casehub-api
//!
//! HTTP API layer for CaseHub sharing built on Axum.
//!
//! Provides the sharing, invitation, and access-code endpoints, request
//! logging and CORS middleware, the bearer-token extractor, DTOs, and
//! error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, build_sharing};
pub use router::build_router;
pub use error::ApiError;
pub use state::AppState;
