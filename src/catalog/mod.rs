//! Stat and module-type catalog: closed enums plus the immutable
//! roll-value, scoring-weight, and matrix tables.

pub mod tables;
pub mod types;

pub use tables::*;
pub use types::*;
