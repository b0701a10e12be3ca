use serde::{Deserialize, Serialize};
use std::fmt;

pub const NUM_STATS: usize = 11;

/// Every stat a module can carry, as a main stat or substat.
///
/// Serialized under the in-game display names so saved JSON matches the
/// original game data exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stat {
    #[serde(rename = "HP")]
    Hp,
    #[serde(rename = "ATK")]
    Atk,
    #[serde(rename = "DEF")]
    Def,
    #[serde(rename = "HP%")]
    HpPct,
    #[serde(rename = "ATK%")]
    AtkPct,
    #[serde(rename = "DEF%")]
    DefPct,
    #[serde(rename = "CRIT Rate")]
    CritRate,
    #[serde(rename = "CRIT DMG")]
    CritDmg,
    #[serde(rename = "Effect ACC")]
    EffectAcc,
    #[serde(rename = "Effect RES")]
    EffectRes,
    #[serde(rename = "SPD")]
    Spd,
}

impl Stat {
    pub fn all() -> [Stat; NUM_STATS] {
        [
            Stat::Hp,
            Stat::Atk,
            Stat::Def,
            Stat::HpPct,
            Stat::AtkPct,
            Stat::DefPct,
            Stat::CritRate,
            Stat::CritDmg,
            Stat::EffectAcc,
            Stat::EffectRes,
            Stat::Spd,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Stat::Hp => "HP",
            Stat::Atk => "ATK",
            Stat::Def => "DEF",
            Stat::HpPct => "HP%",
            Stat::AtkPct => "ATK%",
            Stat::DefPct => "DEF%",
            Stat::CritRate => "CRIT Rate",
            Stat::CritDmg => "CRIT DMG",
            Stat::EffectAcc => "Effect ACC",
            Stat::EffectRes => "Effect RES",
            Stat::Spd => "SPD",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Stat::Hp => 0,
            Stat::Atk => 1,
            Stat::Def => 2,
            Stat::HpPct => 3,
            Stat::AtkPct => 4,
            Stat::DefPct => 5,
            Stat::CritRate => 6,
            Stat::CritDmg => 7,
            Stat::EffectAcc => 8,
            Stat::EffectRes => 9,
            Stat::Spd => 10,
        }
    }

    /// Percentage stats display with a `%` suffix; flat stats do not.
    pub fn is_percent(&self) -> bool {
        !matches!(self, Stat::Hp | Stat::Atk | Stat::Def)
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Scoring category a stat contributes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Defense,
    Support,
    Offense,
}

/// The four module types. Restriction and main-stat data is attached per
/// variant rather than looked up by string key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleType {
    Mask,
    Transistor,
    Wristwheel,
    Core,
}

impl ModuleType {
    pub fn all() -> [ModuleType; 4] {
        [
            ModuleType::Mask,
            ModuleType::Transistor,
            ModuleType::Wristwheel,
            ModuleType::Core,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ModuleType::Mask => "mask",
            ModuleType::Transistor => "transistor",
            ModuleType::Wristwheel => "wristwheel",
            ModuleType::Core => "core",
        }
    }

    /// Main stats a module of this type may be created with.
    pub fn main_stat_options(&self) -> &'static [Stat] {
        match self {
            ModuleType::Mask => &[Stat::Atk],
            ModuleType::Transistor => &[Stat::Hp],
            ModuleType::Wristwheel => &[Stat::Def],
            ModuleType::Core => &[
                Stat::CritRate,
                Stat::CritDmg,
                Stat::AtkPct,
                Stat::HpPct,
                Stat::DefPct,
                Stat::EffectAcc,
                Stat::EffectRes,
                Stat::Spd,
            ],
        }
    }

    /// Stats that may never appear as a substat on this type, regardless of
    /// how they were set. Core has no restrictions.
    pub fn restricted_substats(&self) -> &'static [Stat] {
        match self {
            ModuleType::Mask => &[Stat::Atk, Stat::EffectRes, Stat::HpPct, Stat::DefPct],
            ModuleType::Transistor => &[Stat::AtkPct, Stat::DefPct, Stat::Hp, Stat::EffectAcc],
            ModuleType::Wristwheel => &[Stat::HpPct, Stat::AtkPct, Stat::CritDmg, Stat::Def],
            ModuleType::Core => &[],
        }
    }

    /// Slot compatibility: mask 1, transistor 2, wristwheel 3, core 4-6.
    pub fn allowed_in_slot(&self, slot: u8) -> bool {
        match self {
            ModuleType::Mask => slot == 1,
            ModuleType::Transistor => slot == 2,
            ModuleType::Wristwheel => slot == 3,
            ModuleType::Core => (4..=6).contains(&slot),
        }
    }
}

impl fmt::Display for ModuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
