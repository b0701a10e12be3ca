use super::types::{Category, ModuleType, Stat, NUM_STATS};
use serde::{Deserialize, Serialize};

/// Per-roll value bounds for a substat. One enhancement roll adds a uniform
/// integer draw from `min..=max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollRange {
    pub min: u32,
    pub max: u32,
}

/// How much one point of a stat is worth in each scoring category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryWeights {
    pub defense: f64,
    pub support: f64,
    pub offense: f64,
}

impl CategoryWeights {
    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Defense => self.defense,
            Category::Support => self.support,
            Category::Offense => self.offense,
        }
    }

    /// Combined worth of one point across all categories.
    pub fn total(&self) -> f64 {
        self.defense + self.support + self.offense
    }
}

/// A set-bonus matrix and the module types it may be equipped on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixDef {
    pub name: String,
    pub allowed_types: Vec<ModuleType>,
}

/// Maximum stacks a matrix may hold on one module.
pub const MAX_MATRIX_COUNT: u8 = 3;

// Indexed by Stat::index(). Flat stats roll large raw values, so their
// category weights below are scaled down to keep scores comparable.
const ROLL_RANGES: [RollRange; NUM_STATS] = [
    RollRange { min: 80, max: 120 }, // HP
    RollRange { min: 12, max: 20 },  // ATK
    RollRange { min: 10, max: 17 },  // DEF
    RollRange { min: 3, max: 6 },    // HP%
    RollRange { min: 3, max: 6 },    // ATK%
    RollRange { min: 4, max: 7 },    // DEF%
    RollRange { min: 2, max: 5 },    // CRIT Rate
    RollRange { min: 4, max: 8 },    // CRIT DMG
    RollRange { min: 3, max: 6 },    // Effect ACC
    RollRange { min: 3, max: 6 },    // Effect RES
    RollRange { min: 2, max: 4 },    // SPD
];

const CATEGORY_WEIGHTS: [CategoryWeights; NUM_STATS] = [
    CategoryWeights { defense: 0.01, support: 0.0, offense: 0.0 }, // HP
    CategoryWeights { defense: 0.0, support: 0.0, offense: 0.05 }, // ATK
    CategoryWeights { defense: 0.05, support: 0.0, offense: 0.0 }, // DEF
    CategoryWeights { defense: 1.0, support: 0.0, offense: 0.0 },  // HP%
    CategoryWeights { defense: 0.0, support: 0.0, offense: 1.0 },  // ATK%
    CategoryWeights { defense: 0.8, support: 0.0, offense: 0.0 },  // DEF%
    CategoryWeights { defense: 0.0, support: 0.0, offense: 1.6 },  // CRIT Rate
    CategoryWeights { defense: 0.0, support: 0.0, offense: 0.8 },  // CRIT DMG
    CategoryWeights { defense: 0.0, support: 1.0, offense: 0.0 },  // Effect ACC
    CategoryWeights { defense: 0.4, support: 0.6, offense: 0.0 },  // Effect RES
    CategoryWeights { defense: 0.0, support: 1.5, offense: 0.0 },  // SPD
];

/// Immutable, process-wide stat catalog. Built once and passed by reference
/// into every engine call; never mutated at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    roll_ranges: [RollRange; NUM_STATS],
    category_weights: [CategoryWeights; NUM_STATS],
    matrices: Vec<MatrixDef>,
}

impl Catalog {
    /// The standard game catalog.
    pub fn standard() -> Self {
        Self {
            roll_ranges: ROLL_RANGES,
            category_weights: CATEGORY_WEIGHTS,
            matrices: standard_matrices(),
        }
    }

    /// Every stat that exists as a substat, in catalog order.
    pub fn substats(&self) -> [Stat; NUM_STATS] {
        Stat::all()
    }

    pub fn roll_range(&self, stat: Stat) -> RollRange {
        self.roll_ranges[stat.index()]
    }

    /// Highest value a substat can reach at 5/5 rolls.
    pub fn max_value(&self, stat: Stat) -> f64 {
        (self.roll_range(stat).max * 5) as f64
    }

    /// Ordered achievable values for `(stat, rolls)`, offered to editors as
    /// the selectable-value list.
    pub fn value_options(&self, stat: Stat, rolls: u8) -> Vec<f64> {
        if rolls == 0 || rolls > 5 {
            return Vec::new();
        }
        let range = self.roll_range(stat);
        (range.min..=range.max)
            .map(|per_roll| (per_roll * rolls as u32) as f64)
            .collect()
    }

    /// Whether `value` is reachable for a substat with this many rolls.
    pub fn is_achievable(&self, stat: Stat, rolls: u8, value: f64) -> bool {
        if rolls == 0 || rolls > 5 {
            return false;
        }
        let range = self.roll_range(stat);
        let min = (range.min * rolls as u32) as f64;
        let max = (range.max * rolls as u32) as f64;
        value >= min && value <= max
    }

    pub fn category_weights(&self, stat: Stat) -> CategoryWeights {
        self.category_weights[stat.index()]
    }

    /// The type's fixed maximum for a main stat, or None if the stat is not
    /// a valid main stat for the type.
    pub fn main_stat_max(&self, module_type: ModuleType, stat: Stat) -> Option<f64> {
        if !module_type.main_stat_options().contains(&stat) {
            return None;
        }
        let value = match stat {
            Stat::Atk => 500.0,
            Stat::Hp => 5000.0,
            Stat::Def => 400.0,
            Stat::CritRate => 32.0,
            Stat::CritDmg => 64.0,
            Stat::AtkPct => 43.0,
            Stat::HpPct => 43.0,
            Stat::DefPct => 54.0,
            Stat::EffectAcc => 45.0,
            Stat::EffectRes => 45.0,
            Stat::Spd => 30.0,
        };
        Some(value)
    }

    pub fn matrix(&self, name: &str) -> Option<&MatrixDef> {
        self.matrices.iter().find(|m| m.name == name)
    }

    /// Matrices equippable on the given module type.
    pub fn matrices_for(&self, module_type: ModuleType) -> Vec<&MatrixDef> {
        self.matrices
            .iter()
            .filter(|m| m.allowed_types.contains(&module_type))
            .collect()
    }
}

fn standard_matrices() -> Vec<MatrixDef> {
    vec![
        MatrixDef {
            name: "Battlewill".to_string(),
            allowed_types: vec![ModuleType::Mask, ModuleType::Core],
        },
        MatrixDef {
            name: "Fury".to_string(),
            allowed_types: vec![ModuleType::Core],
        },
        MatrixDef {
            name: "Lifebloom".to_string(),
            allowed_types: vec![ModuleType::Transistor, ModuleType::Core],
        },
        MatrixDef {
            name: "Stoneward".to_string(),
            allowed_types: vec![ModuleType::Wristwheel, ModuleType::Core],
        },
        MatrixDef {
            name: "Swiftfoot".to_string(),
            allowed_types: vec![
                ModuleType::Mask,
                ModuleType::Transistor,
                ModuleType::Wristwheel,
                ModuleType::Core,
            ],
        },
    ]
}
