use super::types::Loadout;
use crate::catalog::Stat;
use crate::error::MathicError;
use crate::module::Module;
use std::collections::HashMap;
use uuid::Uuid;

/// Assign a module to a slot. Slot-to-type compatibility is enforced here,
/// at assignment time: an incompatible module fails and the loadout is left
/// untouched.
pub fn assign_module(
    loadout: &mut Loadout,
    slot: u8,
    module: &Module,
) -> Result<(), MathicError> {
    if !Loadout::is_valid_slot(slot) || !module.module_type.allowed_in_slot(slot) {
        return Err(MathicError::SlotMismatch {
            module_type: module.module_type,
            slot,
        });
    }
    loadout.set(slot, Some(module.id));
    Ok(())
}

/// Empty a slot, returning the module id that occupied it.
pub fn remove_module(loadout: &mut Loadout, slot: u8) -> Option<Uuid> {
    let previous = loadout.get(slot);
    loadout.set(slot, None);
    previous
}

/// Sum the main-stat and substat contributions of every assigned module
/// into one stat total map. Dangling ids (deleted modules) are skipped.
pub fn loadout_totals(
    loadout: &Loadout,
    modules: &HashMap<Uuid, Module>,
) -> HashMap<Stat, f64> {
    let mut totals = HashMap::new();
    for (_, module_id) in loadout.assigned() {
        if let Some(module) = modules.get(&module_id) {
            for (stat, value) in module.total_stats() {
                *totals.entry(stat).or_insert(0.0) += value;
            }
        }
    }
    totals
}
