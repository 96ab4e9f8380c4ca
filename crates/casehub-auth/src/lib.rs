//! # casehub-auth
//!
//! Who is acting and whether they may act.
//!
//! ## Modules
//!
//! - `actor` — the authenticated identity attached to a request
//! - `guard` — authentication and case-ownership checks
//! - `identity` — identity lookup by email
//! - `jwt` — bearer-token verification (tokens are issued elsewhere)
//! - `secret` — invite token and access code generation

pub mod actor;
pub mod guard;
pub mod identity;
pub mod jwt;
pub mod secret;

pub use actor::Actor;
pub use guard::AuthorizationGuard;
pub use identity::IdentityDirectory;
pub use jwt::{Claims, JwtDecoder, JwtEncoder};
