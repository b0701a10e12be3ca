//! Manual module editing with the same validation the random paths use.
//! Nothing here is partially applied: every operation validates fully, then
//! mutates.

use super::types::{Module, Substat, MAX_SUBSTATS, MAX_SUBSTAT_ROLLS};
use crate::catalog::{Catalog, Stat};
use crate::error::MathicError;

/// Add a substat line by hand (editor path). Enforces the three-part filter,
/// roll bounds, the 1-roll cap while slots remain unfilled, the total roll
/// budget, and value achievability.
pub fn add_substat(
    catalog: &Catalog,
    module: &mut Module,
    stat: Stat,
    value: f64,
    rolls: u8,
) -> Result<(), MathicError> {
    if module.substats.len() >= MAX_SUBSTATS {
        return Err(MathicError::RestrictionViolation(stat));
    }
    module.substat_allowed(stat)?;
    validate_rolls(module, module.substats.len() + 1, rolls, None)?;
    if !catalog.is_achievable(stat, rolls, value) {
        return Err(MathicError::UnachievableValue { stat, rolls, value });
    }

    module.substats.push(Substat::new(stat, value, rolls));
    module.sync_enhancement_tracking();
    Ok(())
}

/// Change a substat's roll count. The value is re-clamped into the
/// achievable range for the new count.
pub fn set_substat_rolls(
    catalog: &Catalog,
    module: &mut Module,
    index: usize,
    rolls: u8,
) -> Result<(), MathicError> {
    if index >= module.substats.len() {
        return Err(MathicError::ModuleNotFound);
    }
    validate_rolls(module, module.substats.len(), rolls, Some(index))?;

    let stat = module.substats[index].stat;
    let range = catalog.roll_range(stat);
    let min = (range.min * rolls as u32) as f64;
    let max = (range.max * rolls as u32) as f64;

    let substat = &mut module.substats[index];
    substat.rolls_used = rolls;
    substat.value = substat.value.clamp(min, max);
    module.sync_enhancement_tracking();
    Ok(())
}

pub fn remove_substat(module: &mut Module, index: usize) -> Result<Substat, MathicError> {
    if index >= module.substats.len() {
        return Err(MathicError::ModuleNotFound);
    }
    let removed = module.substats.remove(index);
    module.sync_enhancement_tracking();
    Ok(removed)
}

/// Reconfigure the post-initial enhancement budget, 0-5.
pub fn set_max_enhancements(module: &mut Module, value: u8) -> Result<(), MathicError> {
    if value > 5 {
        return Err(MathicError::InvalidRollCount(value));
    }
    module.max_enhancements = value;
    module.sync_enhancement_tracking();
    Ok(())
}

/// Change the main stat (editor path). Rejected if the stat is not a valid
/// option for the type or an existing substat already carries it.
pub fn set_main_stat(
    catalog: &Catalog,
    module: &mut Module,
    main_stat: Stat,
) -> Result<(), MathicError> {
    let value = catalog
        .main_stat_max(module.module_type, main_stat)
        .ok_or(MathicError::InvalidConfiguration {
            module_type: module.module_type,
            main_stat,
        })?;
    if module.has_substat(main_stat) {
        return Err(MathicError::RestrictionViolation(main_stat));
    }
    module.main_stat = main_stat;
    module.main_stat_value = value;
    Ok(())
}

/// Shared roll-count validation. `substat_count` is the line count after the
/// edit; `editing` is the index whose rolls are being replaced, if any.
fn validate_rolls(
    module: &Module,
    substat_count: usize,
    rolls: u8,
    editing: Option<usize>,
) -> Result<(), MathicError> {
    if rolls == 0 || rolls > MAX_SUBSTAT_ROLLS {
        return Err(MathicError::InvalidRollCount(rolls));
    }
    // Until the fourth slot fills, every line holds exactly its initial roll.
    if substat_count < MAX_SUBSTATS && rolls != 1 {
        return Err(MathicError::InvalidRollCount(rolls));
    }
    if substat_count == MAX_SUBSTATS {
        let existing: u8 = module
            .substats
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != editing)
            .map(|(_, s)| s.rolls_used)
            .sum();
        let total = existing + rolls;
        // One initial roll per line is free; the rest draw on the budget.
        if total.saturating_sub(MAX_SUBSTATS as u8) > module.max_total_rolls() {
            return Err(MathicError::InvalidRollCount(rolls));
        }
    }
    Ok(())
}
