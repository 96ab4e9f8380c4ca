//! Anonymous, read-only case access by capability code.

pub mod gateway;

pub use gateway::{AccessCodeGateway, IssuedAccessCode};
