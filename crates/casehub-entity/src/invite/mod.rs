//! Invite domain entities.

pub mod model;
pub mod state;

pub use model::{Invite, InviteCreated, InvitePreview, PendingInvite};
pub use state::InviteState;
