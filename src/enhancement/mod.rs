//! Enhancement engine: substat eligibility, the two-regime probability
//! model, and random enhancement application.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
