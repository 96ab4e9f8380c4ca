//! Direct sharing with registered identities.

pub mod registry;

pub use registry::ShareRegistry;
