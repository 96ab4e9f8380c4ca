//! Case records and the content attached to them.

pub mod content;
pub mod model;

pub use content::{CaseEmail, CaseEvent};
pub use model::Case;
