//! Module value analysis: category scores, overall quality, and budget
//! usage. Pure functions of the module's current state.

use crate::catalog::{Catalog, ModuleType, Stat};
use crate::module::{Module, MAX_SUBSTATS};
use serde::{Deserialize, Serialize};

/// Result of a value analysis. Everything here is derived; nothing mutates
/// the module.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModuleValue {
    pub total_value: f64,
    /// Realized quality against a perfectly-rolled module of this type and
    /// main stat, 0-100.
    pub efficiency: f64,
    /// Share of the enhancement budget spent, 0-100. Independent of which
    /// stats were chosen.
    pub roll_efficiency: f64,
    pub defense_score: f64,
    pub support_score: f64,
    pub offense_score: f64,
}

/// Score a module across the three categories and derive its aggregate
/// quality metrics.
pub fn calculate_module_value(catalog: &Catalog, module: &Module) -> ModuleValue {
    let mut defense_score = 0.0;
    let mut support_score = 0.0;
    let mut offense_score = 0.0;

    for (stat, value) in module.total_stats() {
        let weights = catalog.category_weights(stat);
        defense_score += value * weights.defense;
        support_score += value * weights.support;
        offense_score += value * weights.offense;
    }

    let total_value = defense_score + support_score + offense_score;

    let ceiling = theoretical_max_value(catalog, module.module_type, module.main_stat);
    let efficiency = if ceiling > 0.0 {
        (total_value / ceiling * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    };

    let roll_efficiency =
        module.total_enhancement_rolls as f64 / module.max_total_rolls() as f64 * 100.0;

    ModuleValue {
        total_value,
        efficiency,
        roll_efficiency,
        defense_score,
        support_score,
        offense_score,
    }
}

/// Best total value a module of this type and main stat could ever reach:
/// the main stat at its maximum plus the four strongest eligible substats
/// fully rolled to 5/5.
pub fn theoretical_max_value(catalog: &Catalog, module_type: ModuleType, main_stat: Stat) -> f64 {
    let main_value = catalog.main_stat_max(module_type, main_stat).unwrap_or(0.0);
    let main_contribution = main_value * catalog.category_weights(main_stat).total();

    let mut candidate_values: Vec<f64> = catalog
        .substats()
        .into_iter()
        .filter(|stat| {
            *stat != main_stat && !module_type.restricted_substats().contains(stat)
        })
        .map(|stat| catalog.max_value(stat) * catalog.category_weights(stat).total())
        .collect();
    candidate_values.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));

    main_contribution + candidate_values.iter().take(MAX_SUBSTATS).sum::<f64>()
}
