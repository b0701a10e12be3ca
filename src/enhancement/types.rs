use crate::catalog::Stat;
use serde::{Deserialize, Serialize};

/// Which branch a successful enhancement took.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnhanceOutcome {
    /// A new substat line was created with its initial roll.
    NewSubstat(Stat),
    /// An existing substat absorbed one more roll.
    Reinforced(Stat),
}

impl EnhanceOutcome {
    /// The stat that was affected, whichever branch occurred.
    pub fn stat(&self) -> Stat {
        match self {
            EnhanceOutcome::NewSubstat(stat) | EnhanceOutcome::Reinforced(stat) => *stat,
        }
    }

    pub fn is_new(&self) -> bool {
        matches!(self, EnhanceOutcome::NewSubstat(_))
    }
}
