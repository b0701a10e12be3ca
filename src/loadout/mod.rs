//! Loadouts: six typed equipment slots and read-only stat aggregation over
//! the modules assigned to them.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
