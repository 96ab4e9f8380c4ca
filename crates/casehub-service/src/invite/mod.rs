//! Token-addressed invitations for unregistered emails.

pub mod ledger;

pub use ledger::{InviteLedger, Redemption};
