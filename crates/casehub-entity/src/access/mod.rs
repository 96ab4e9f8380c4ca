//! Anonymous access codes and the content bundle they unlock.

pub mod model;

pub use model::{AccessCode, CaseBundle};
