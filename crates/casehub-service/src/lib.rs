//! # casehub-service
//!
//! Business logic for case sharing. Each service owns one concern and is
//! built by constructor injection over the typed repositories:
//!
//! - [`ShareRegistry`] grants access to registered identities.
//! - [`InviteLedger`] offers access to unregistered emails by token.
//! - [`AccessCodeGateway`] resolves anonymous read-only access codes.
//! - [`ShareController`] fronts all three and records audit entries.
//!
//! Authentication, ownership, and input-shape failures are returned as
//! `Err(ShareError)` before anything is written. Past that point every
//! operation answers with an [`Outcome`](casehub_core::Outcome).

pub mod access;
pub mod audit;
pub mod controller;
pub mod invite;
pub mod preflight;
pub mod share;

#[cfg(test)]
pub(crate) mod testing;

pub use access::{AccessCodeGateway, IssuedAccessCode};
pub use audit::{AuditRecorder, AuditSink};
pub use controller::{ShareController, SharingOverview};
pub use invite::{InviteLedger, Redemption};
pub use share::ShareRegistry;
