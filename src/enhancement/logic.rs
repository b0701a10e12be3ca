use super::types::EnhanceOutcome;
use crate::catalog::{Catalog, Stat};
use crate::error::MathicError;
use crate::module::{Module, Substat, INITIAL_SUBSTAT_ROLLS, MAX_SUBSTATS, MAX_SUBSTAT_ROLLS};
use rand::Rng;

/// Substats this module may still gain: the catalog minus the main stat,
/// the type's restricted set, and stats already present. Recomputed on every
/// call — main stat, type, and existing lines can all change between calls.
pub fn available_substats(catalog: &Catalog, module: &Module) -> Vec<Stat> {
    catalog
        .substats()
        .into_iter()
        .filter(|stat| module.substat_allowed(*stat).is_ok())
        .collect()
}

/// Probability of each stat being the target of the next enhancement.
///
/// Below four substats every eligible stat is equally likely to become the
/// next new line. At four substats each existing line is weighted by its
/// remaining rolls (`5 - rolls_used`); once the total budget is spent the
/// mapping is all zeros and the module is terminal.
pub fn substat_probabilities(catalog: &Catalog, module: &Module) -> Vec<(Stat, f64)> {
    if module.substats.len() < MAX_SUBSTATS {
        let eligible = available_substats(catalog, module);
        let share = 1.0 / eligible.len() as f64;
        return eligible.into_iter().map(|stat| (stat, share)).collect();
    }

    let remaining =
        module.max_total_rolls() as i32 - module.total_enhancement_rolls as i32;
    let weights: Vec<u32> = module
        .substats
        .iter()
        .map(|s| (MAX_SUBSTAT_ROLLS - s.rolls_used) as u32)
        .collect();
    let total: u32 = weights.iter().sum();

    module
        .substats
        .iter()
        .zip(weights)
        .map(|(substat, weight)| {
            let probability = if remaining <= 0 || total == 0 {
                0.0
            } else {
                weight as f64 / total as f64
            };
            (substat.stat, probability)
        })
        .collect()
}

/// Apply exactly one random enhancement event.
///
/// Slot-filling regime creates a new line with its initial roll, leaving the
/// budget and level untouched; reinforcement adds one roll to a
/// weighted-random existing line, spending one budget point and raising the
/// level. Fails with `CannotEnhance` when the module is at its roll cap.
pub fn enhance_module_random(
    catalog: &Catalog,
    module: &mut Module,
    rng: &mut impl Rng,
) -> Result<EnhanceOutcome, MathicError> {
    if module.is_enhancement_capped() {
        return Err(MathicError::CannotEnhance);
    }

    if module.substats.len() < MAX_SUBSTATS {
        let stat = draw_new_substat(catalog, module, rng)?;
        return Ok(EnhanceOutcome::NewSubstat(stat));
    }

    // Weighted draw over lines that can still roll.
    let weights: Vec<u32> = module
        .substats
        .iter()
        .map(|s| (MAX_SUBSTAT_ROLLS - s.rolls_used) as u32)
        .collect();
    let total: u32 = weights.iter().sum();
    debug_assert!(total > 0, "capped modules are rejected above");

    let mut pick = rng.gen_range(0..total);
    let mut index = 0;
    for (i, weight) in weights.iter().enumerate() {
        if pick < *weight {
            index = i;
            break;
        }
        pick -= weight;
    }

    let stat = module.substats[index].stat;
    let roll = roll_value(catalog, stat, rng);
    let substat = &mut module.substats[index];
    substat.rolls_used += 1;
    substat.value += roll;
    module.total_enhancement_rolls += 1;
    module.level += 1;
    Ok(EnhanceOutcome::Reinforced(stat))
}

/// Enhance a caller-chosen substat (the editor's manual enhance). A stat not
/// yet on the module becomes a new line while slots remain; an existing line
/// is reinforced only once all four slots are filled.
pub fn enhance_module_substat(
    catalog: &Catalog,
    module: &mut Module,
    stat: Stat,
    rng: &mut impl Rng,
) -> Result<EnhanceOutcome, MathicError> {
    if module.is_enhancement_capped() {
        return Err(MathicError::CannotEnhance);
    }

    match module.substats.iter().position(|s| s.stat == stat) {
        None => {
            if module.substats.len() >= MAX_SUBSTATS {
                return Err(MathicError::RestrictionViolation(stat));
            }
            module.substat_allowed(stat)?;
            let value = roll_value(catalog, stat, rng);
            module.substats.push(Substat::new(stat, value, 1));
            Ok(EnhanceOutcome::NewSubstat(stat))
        }
        Some(index) => {
            // Existing lines only reinforce in the four-substat regime.
            if module.substats.len() < MAX_SUBSTATS || !module.substats[index].can_enhance() {
                return Err(MathicError::CannotEnhance);
            }
            let roll = roll_value(catalog, stat, rng);
            let substat = &mut module.substats[index];
            substat.rolls_used += 1;
            substat.value += roll;
            module.total_enhancement_rolls += 1;
            module.level += 1;
            Ok(EnhanceOutcome::Reinforced(stat))
        }
    }
}

/// Enhance repeatedly, stopping at the first failure. Returns the outcomes
/// that did land.
pub fn enhance_module_multiple(
    catalog: &Catalog,
    module: &mut Module,
    times: u32,
    rng: &mut impl Rng,
) -> Vec<EnhanceOutcome> {
    let mut outcomes = Vec::new();
    for _ in 0..times {
        match enhance_module_random(catalog, module, rng) {
            Ok(outcome) => outcomes.push(outcome),
            Err(_) => break,
        }
    }
    outcomes
}

/// Bulk-seed up to `count` random substats (bounded at four total). Used for
/// quick module seeding; touches neither the budget nor the level.
pub fn generate_random_substats(
    catalog: &Catalog,
    module: &mut Module,
    count: usize,
    rng: &mut impl Rng,
) -> usize {
    let mut added = 0;
    while added < count && module.substats.len() < MAX_SUBSTATS {
        if draw_new_substat(catalog, module, rng).is_err() {
            break;
        }
        added += 1;
    }
    added
}

/// Pure budget helper for editors validating manually-entered roll counts.
pub fn max_possible_total_rolls(module: &Module) -> u8 {
    INITIAL_SUBSTAT_ROLLS + module.max_enhancements
}

fn draw_new_substat(
    catalog: &Catalog,
    module: &mut Module,
    rng: &mut impl Rng,
) -> Result<Stat, MathicError> {
    let eligible = available_substats(catalog, module);
    if eligible.is_empty() {
        return Err(MathicError::CannotEnhance);
    }
    let stat = eligible[rng.gen_range(0..eligible.len())];
    let value = roll_value(catalog, stat, rng);
    module.substats.push(Substat::new(stat, value, 1));
    Ok(stat)
}

fn roll_value(catalog: &Catalog, stat: Stat, rng: &mut impl Rng) -> f64 {
    let range = catalog.roll_range(stat);
    rng.gen_range(range.min..=range.max) as f64
}
