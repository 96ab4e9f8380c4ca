//! Built-in job implementations.

pub mod invite_sweep;

pub use invite_sweep::InviteSweepJob;
