use crate::catalog::{ModuleType, Stat};
use thiserror::Error;

/// Engine-level failures. All of these are normal synchronous outcomes the
/// caller must handle, never panics.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MathicError {
    /// Requested module type / main stat pairing is not in the catalog.
    #[error("{main_stat} is not a valid main stat for {module_type}")]
    InvalidConfiguration {
        module_type: ModuleType,
        main_stat: Stat,
    },

    /// Module is at its roll cap: all four substats at 5/5 rolls, or the
    /// total enhancement budget is exhausted. Expected terminal condition.
    #[error("module cannot be enhanced further")]
    CannotEnhance,

    /// Attempt to set a substat equal to the main stat, a type-restricted
    /// stat, or a duplicate of an existing substat.
    #[error("{0} is not allowed as a substat on this module")]
    RestrictionViolation(Stat),

    /// Roll count outside [1,5], above the per-substat cap for the current
    /// substat count, or exceeding the module's total roll budget.
    #[error("invalid roll count {0}")]
    InvalidRollCount(u8),

    /// Substat value not achievable for its stat and roll count.
    #[error("{value} is not an achievable value for {stat} at {rolls} rolls")]
    UnachievableValue { stat: Stat, rolls: u8, value: f64 },

    /// Matrix does not exist or cannot be equipped on this module type.
    #[error("matrix {0:?} cannot be assigned to this module type")]
    InvalidMatrixForType(String),

    /// Matrix stack count outside [1,3].
    #[error("invalid matrix count {0}")]
    InvalidCount(u8),

    /// Module type is not compatible with the requested loadout slot.
    #[error("{module_type} modules cannot occupy slot {slot}")]
    SlotMismatch { module_type: ModuleType, slot: u8 },

    #[error("module not found")]
    ModuleNotFound,

    #[error("loadout not found")]
    LoadoutNotFound,
}
