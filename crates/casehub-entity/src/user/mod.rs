//! Identity profiles and email handling.

pub mod email;
pub mod model;

pub use email::normalize_email;
pub use model::Profile;
