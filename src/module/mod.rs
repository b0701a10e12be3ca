//! Module aggregate: substat lines, enhancement budget, matrix slot, and
//! manual-edit validation.

pub mod edit;
pub mod types;

pub use edit::*;
pub use types::*;
