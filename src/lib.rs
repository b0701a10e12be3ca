//! Mathic - Module Enhancement Engine
//!
//! Core logic for gacha-style equipment modules: catalog data, probabilistic
//! enhancement, value scoring, loadout aggregation, and persistence.

pub mod catalog;
pub mod enhancement;
pub mod error;
pub mod loadout;
pub mod module;
pub mod persistence;
pub mod scoring;
pub mod state;
