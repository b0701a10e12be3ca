use crate::catalog::{Catalog, ModuleType, Stat};
use crate::error::MathicError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const MAX_SUBSTATS: usize = 4;
pub const MAX_SUBSTAT_ROLLS: u8 = 5;
pub const DEFAULT_MAX_ENHANCEMENTS: u8 = 5;
/// Initial rolls granted once all four substat slots are filled, one per slot.
pub const INITIAL_SUBSTAT_ROLLS: u8 = 4;

/// One rolled substat line. Owned by exactly one module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Substat {
    pub stat: Stat,
    pub value: f64,
    pub rolls_used: u8,
}

impl Substat {
    pub fn new(stat: Stat, value: f64, rolls_used: u8) -> Self {
        Self {
            stat,
            value,
            rolls_used,
        }
    }

    /// Whether this line can absorb another roll (individual 5-roll cap).
    pub fn can_enhance(&self) -> bool {
        self.rolls_used < MAX_SUBSTAT_ROLLS
    }

    /// How close this line is to its fully-rolled ceiling, as a percentage.
    pub fn efficiency_percentage(&self, max_possible_value: f64) -> f64 {
        if max_possible_value == 0.0 {
            return 0.0;
        }
        self.value / max_possible_value * 100.0
    }
}

/// An equippable module: one main stat, up to four substats, a bounded
/// enhancement budget, and an optional matrix assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub id: Uuid,
    pub module_type: ModuleType,
    pub slot: u8,
    pub main_stat: Stat,
    pub main_stat_value: f64,
    pub substats: Vec<Substat>,
    /// Rolls applied after each substat's initial roll. Excludes the first
    /// roll every line receives at creation.
    pub total_enhancement_rolls: u8,
    /// Configurable budget of post-initial rolls, 0-5.
    pub max_enhancements: u8,
    /// Count of reinforcement rolls applied; new substat lines do not raise
    /// it. Always equals `total_enhancement_rolls`.
    pub level: u32,
    #[serde(default)]
    pub matrix: Option<String>,
    #[serde(default)]
    pub matrix_count: u8,
}

impl Module {
    /// Factory for a fresh module. The main stat value is auto-filled to the
    /// type's maximum from the catalog.
    pub fn create(
        catalog: &Catalog,
        module_type: ModuleType,
        slot: u8,
        main_stat: Stat,
    ) -> Result<Self, MathicError> {
        let main_stat_value = catalog.main_stat_max(module_type, main_stat).ok_or(
            MathicError::InvalidConfiguration {
                module_type,
                main_stat,
            },
        )?;

        Ok(Self {
            id: Uuid::new_v4(),
            module_type,
            slot,
            main_stat,
            main_stat_value,
            substats: Vec::new(),
            total_enhancement_rolls: 0,
            max_enhancements: DEFAULT_MAX_ENHANCEMENTS,
            level: 0,
            matrix: None,
            matrix_count: 0,
        })
    }

    /// Dynamic roll cap: one initial roll per substat slot plus the
    /// configured enhancement budget.
    pub fn max_total_rolls(&self) -> u8 {
        INITIAL_SUBSTAT_ROLLS + self.max_enhancements
    }

    pub fn substat(&self, stat: Stat) -> Option<&Substat> {
        self.substats.iter().find(|s| s.stat == stat)
    }

    pub fn has_substat(&self, stat: Stat) -> bool {
        self.substat(stat).is_some()
    }

    /// All four substat slots filled and every line at its 5-roll cap.
    pub fn is_fully_rolled(&self) -> bool {
        self.substats.len() == MAX_SUBSTATS && self.substats.iter().all(|s| !s.can_enhance())
    }

    /// Terminal condition for enhancement: every line individually capped,
    /// or the total budget spent.
    pub fn is_enhancement_capped(&self) -> bool {
        self.is_fully_rolled() || self.total_enhancement_rolls >= self.max_total_rolls()
    }

    /// The three-part substat filter: main stat, type-restricted set, and
    /// duplicates are all rejected. Every interface that offers or rolls
    /// substats goes through this.
    pub fn substat_allowed(&self, stat: Stat) -> Result<(), MathicError> {
        if stat == self.main_stat
            || self.module_type.restricted_substats().contains(&stat)
            || self.has_substat(stat)
        {
            return Err(MathicError::RestrictionViolation(stat));
        }
        Ok(())
    }

    /// Main stat plus all substat lines, combined per stat.
    pub fn total_stats(&self) -> Vec<(Stat, f64)> {
        let mut totals: Vec<(Stat, f64)> = vec![(self.main_stat, self.main_stat_value)];
        for substat in &self.substats {
            match totals.iter_mut().find(|(stat, _)| *stat == substat.stat) {
                Some((_, value)) => *value += substat.value,
                None => totals.push((substat.stat, substat.value)),
            }
        }
        totals
    }

    /// Rebuild enhancement tracking from the substat roll counts, capped at
    /// the budget. Used after manual edits and when loading persisted state
    /// whose counters drifted from the actual rolls.
    pub fn sync_enhancement_tracking(&mut self) {
        let post_initial: u8 = if self.substats.len() == MAX_SUBSTATS {
            let rolls: u8 = self.substats.iter().map(|s| s.rolls_used).sum();
            rolls.saturating_sub(INITIAL_SUBSTAT_ROLLS)
        } else {
            0
        };
        self.total_enhancement_rolls = post_initial.min(self.max_total_rolls());
        self.level = self.total_enhancement_rolls as u32;
    }
}
